//! Per-page-load authentication state.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, error, info, warn};

use crate::dream::{
    self, CheckoutRequest, Credential, DreamApi, DreamFacade, PortalRequest, RedirectTarget,
    TrackResult, UsageSnapshot, User,
};

/// Lifecycle phase of a [`SessionContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initializing,
    Ready,
}

/// Read-only view of the session that pages render from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_ready: bool,
    pub is_signed_in: bool,
    pub user: Option<User>,
}

impl Session {
    /// Plan of the signed-in user, `free` otherwise.
    pub fn plan(&self) -> &str {
        self.user
            .as_ref()
            .map_or(dream::FREE_PLAN, |u| u.plan.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

#[derive(Debug)]
struct State {
    phase: Phase,
    signed_in: bool,
    user: Option<User>,
    credential: Option<Credential>,
    client: Option<Arc<dyn DreamApi>>,
}

#[derive(Debug)]
struct Inner {
    facade: DreamFacade,
    state: RwLock<State>,
}

/// Single source of truth for "is the visitor authenticated, and as whom".
///
/// One container is created per page load and shared by cloning; clones see
/// the same state. Only the container's own operations write it.
///
/// # Example
///
/// ```rust
/// use saas_starter::dream::DreamFacade;
/// use saas_starter::session::{Phase, SessionContainer};
///
/// # #[tokio::main]
/// # async fn main() {
/// let session = SessionContainer::new(DreamFacade::detached());
/// // No client: readiness is still reached, signed out.
/// assert!(session.initialize(None, None).await.is_err());
/// assert_eq!(session.phase(), Phase::Ready);
/// assert!(!session.is_signed_in());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionContainer {
    inner: Arc<Inner>,
}

impl SessionContainer {
    /// Create an uninitialized container.
    pub fn new(facade: DreamFacade) -> Self {
        Self {
            inner: Arc::new(Inner {
                facade,
                state: RwLock::new(State {
                    phase: Phase::Uninitialized,
                    signed_in: false,
                    user: None,
                    credential: None,
                    client: None,
                }),
            }),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> T {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Resolve the visitor's session once per page load.
    ///
    /// Readiness is reached whatever happens. A failed session lookup leaves
    /// the visitor signed out for this page load but keeps the stored
    /// credential; the failure is only logged. A missing client is
    /// returned as [`dream::Error::Configuration`] after readiness is set.
    /// Calls after the first are no-ops.
    pub async fn initialize(
        &self,
        credential: Option<Credential>,
        ticket: Option<&str>,
    ) -> dream::Result<()> {
        let started = self.write(|s| {
            if s.phase == Phase::Uninitialized {
                s.phase = Phase::Initializing;
                true
            } else {
                false
            }
        });
        if !started {
            return Ok(());
        }

        let client = match self.inner.facade.client() {
            Ok(client) => client,
            Err(e) => {
                self.write(|s| s.phase = Phase::Ready);
                return Err(e);
            }
        };

        let resolved = client.resolve_session(credential.as_ref(), ticket).await;

        self.write(|s| {
            match resolved {
                Ok(auth) => {
                    s.signed_in = auth.signed_in;
                    s.user = if auth.signed_in { auth.user } else { None };
                    s.credential = if auth.signed_in {
                        auth.token.or(credential)
                    } else {
                        None
                    };
                }
                Err(e) => {
                    error!(
                        name: "session.init.failed",
                        error = %e,
                        ticket = ticket.is_some(),
                        "Failed to init auth; continuing signed out"
                    );
                    // Signed out for this page load only; the stored
                    // credential is kept for the next one.
                    s.signed_in = false;
                    s.user = None;
                    s.credential = credential;
                }
            }
            s.client = Some(client);
            s.phase = Phase::Ready;
        });

        debug!(
            name: "session.ready",
            signed_in = self.is_signed_in(),
            "Session initialized"
        );
        Ok(())
    }

    /// Invalidate the remote session and clear the local one.
    ///
    /// Local state is cleared even when the remote call fails; that error is
    /// returned. No-op if the container was never initialized.
    pub async fn sign_out(&self) -> dream::Result<()> {
        let (client, credential) = self.read(|s| (s.client.clone(), s.credential.clone()));
        let Some(client) = client else {
            return Ok(());
        };

        let remote = match &credential {
            Some(credential) => client.sign_out(credential).await,
            None => Ok(()),
        };

        self.write(|s| {
            s.signed_in = false;
            s.user = None;
            s.credential = None;
        });

        if let Err(e) = &remote {
            warn!(name: "session.sign_out.remote_failed", error = %e, "Remote sign-out failed");
        } else {
            info!(name: "session.signed_out", "Visitor signed out");
        }
        remote
    }

    /// Refresh the credential, then replace the user record wholesale.
    ///
    /// Sign-in status is not re-derived. No-op if uninitialized or signed out.
    pub async fn refresh_user(&self) -> dream::Result<()> {
        let (client, credential) = self.read(|s| (s.client.clone(), s.credential.clone()));
        let (Some(client), Some(credential)) = (client, credential) else {
            return Ok(());
        };

        let fresh = client.refresh_token(&credential).await?;
        let user = client.get_user(&fresh).await?;

        self.write(|s| {
            s.credential = Some(fresh);
            s.user = user;
        });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.read(|s| s.phase)
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    pub fn is_signed_in(&self) -> bool {
        self.read(|s| s.signed_in)
    }

    pub fn user(&self) -> Option<User> {
        self.read(|s| s.user.clone())
    }

    /// Current credential, to be persisted between page loads.
    pub fn credential(&self) -> Option<Credential> {
        self.read(|s| s.credential.clone())
    }

    /// Snapshot for rendering.
    pub fn snapshot(&self) -> Session {
        self.read(|s| Session {
            is_ready: s.phase == Phase::Ready,
            is_signed_in: s.signed_in,
            user: s.user.clone(),
        })
    }

    /// The facade this container was built from.
    pub fn facade(&self) -> &DreamFacade {
        &self.inner.facade
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authenticated requests
    // ─────────────────────────────────────────────────────────────────────────

    fn authed(&self) -> dream::Result<(Arc<dyn DreamApi>, Credential)> {
        let (client, credential) = self.read(|s| (s.client.clone(), s.credential.clone()));
        let client = client.map_or_else(|| self.inner.facade.client(), Ok)?;
        let credential = credential.ok_or_else(|| dream::Error::Api {
            status: 401,
            code: Some("unauthenticated".to_string()),
            message: "Please sign in to continue".to_string(),
        })?;
        Ok((client, credential))
    }

    pub async fn check_usage(&self) -> dream::Result<UsageSnapshot> {
        let (client, credential) = self.authed()?;
        client.check_usage(&credential).await
    }

    pub async fn track_usage(&self) -> dream::Result<TrackResult> {
        let (client, credential) = self.authed()?;
        client.track_usage(&credential).await
    }

    pub async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> dream::Result<RedirectTarget> {
        let (client, credential) = self.authed()?;
        client.create_checkout(&credential, request).await
    }

    pub async fn open_portal(&self, request: &PortalRequest) -> dream::Result<RedirectTarget> {
        let (client, credential) = self.authed()?;
        client.open_portal(&credential, request).await
    }
}
