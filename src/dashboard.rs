//! Dashboard page state.
//!
//! Holds the usage snapshot, the transient notice, and the one-time handling
//! of the billing provider's `success=true` redirect.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::dream::{self, TrackResult, UsageSnapshot};
use crate::session::SessionContainer;

/// Notice shown after a completed upgrade.
pub const UPGRADE_SUCCESS: &str = "Upgrade successful!";
/// Notice shown after a tracked usage unit.
pub const TRACK_SUCCESS: &str = "Usage tracked successfully!";
/// Notice shown when the quota rejects a request.
pub const LIMIT_REACHED: &str = "Usage limit reached. Please upgrade.";

/// Progress of the billing success redirect within one page load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuccessRedirect {
    /// No success redirect handled yet.
    #[default]
    Idle,
    /// Handling started: waiting, refreshing user, then usage.
    Pending,
    /// Handled; further renders ignore the query parameter.
    Processed,
}

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient page-level message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Map a tracking outcome to the notice the visitor sees.
pub fn track_notice(outcome: &dream::Result<TrackResult>) -> Notice {
    match outcome {
        Ok(result) if result.success => Notice::success(TRACK_SUCCESS),
        Ok(_) => Notice::error(LIMIT_REACHED),
        Err(e) if e.is_limit_reached() => Notice::error(LIMIT_REACHED),
        Err(e) => Notice::error(e.user_message()),
    }
}

/// Page-scoped dashboard state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub success: SuccessRedirect,
    pub usage: Option<UsageSnapshot>,
    pub notice: Option<Notice>,
}

impl DashboardState {
    /// Observe the `success` query flag on a render.
    ///
    /// Returns `true` only for the first render that sees the flag; that
    /// caller owns the success handling.
    pub fn observe_success(&mut self, success_flag: bool) -> bool {
        if success_flag && self.success == SuccessRedirect::Idle {
            self.success = SuccessRedirect::Pending;
            self.notice = Some(Notice::success(UPGRADE_SUCCESS));
            true
        } else {
            false
        }
    }

    /// Whether usage should be fetched by the regular post-init path.
    pub fn wants_initial_usage(&self) -> bool {
        self.success == SuccessRedirect::Idle
    }

    fn finish_success(&mut self) {
        self.success = SuccessRedirect::Processed;
    }
}

/// Drives dashboard state against the visitor's session.
#[derive(Debug, Clone)]
pub struct DashboardController {
    session: SessionContainer,
    settle_delay: Duration,
}

impl DashboardController {
    pub fn new(session: SessionContainer, settle_delay: Duration) -> Self {
        Self {
            session,
            settle_delay,
        }
    }

    /// Fetch the usage snapshot; failures are logged and keep the old one.
    pub async fn fetch_usage(&self, state: &mut DashboardState) {
        if !self.session.is_ready() || !self.session.is_signed_in() {
            return;
        }
        match self.session.check_usage().await {
            Ok(snapshot) => state.usage = Some(snapshot),
            Err(e) => error!(name: "dashboard.usage.failed", error = %e, "Failed to fetch usage"),
        }
    }

    /// Run one page load's worth of dashboard loading.
    ///
    /// With the success flag set (first observation only): wait for the
    /// credential to settle, refresh the user, then refresh usage, in that
    /// order. Otherwise fetch usage once.
    pub async fn load(&self, state: &mut DashboardState, success_flag: bool) {
        if state.observe_success(success_flag) {
            info!(name: "dashboard.upgrade.completed", "Handling billing success redirect");
            if !self.settle_delay.is_zero() {
                tokio::time::sleep(self.settle_delay).await;
            }
            if let Err(e) = self.session.refresh_user().await {
                warn!(
                    name: "dashboard.refresh.failed",
                    error = %e,
                    "Failed to refresh user after upgrade"
                );
            }
            self.fetch_usage(state).await;
            state.finish_success();
        } else if state.wants_initial_usage() {
            self.fetch_usage(state).await;
        }
    }

    /// The demo action: track one unit, then refresh usage on success.
    pub async fn track(&self, state: &mut DashboardState) {
        let outcome = self.session.track_usage().await;
        let notice = track_notice(&outcome);
        if let Err(e) = &outcome {
            warn!(name: "dashboard.track.failed", error = %e, "Usage tracking rejected");
        }
        let tracked = notice.kind == NoticeKind::Success;
        state.notice = Some(notice);
        if tracked {
            self.fetch_usage(state).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_handled_at_most_once() {
        let mut state = DashboardState::default();
        assert!(state.observe_success(true));
        assert!(!state.observe_success(true));
        state.finish_success();
        assert!(!state.observe_success(true));
        assert_eq!(state.success, SuccessRedirect::Processed);
    }

    #[test]
    fn no_flag_leaves_state_idle() {
        let mut state = DashboardState::default();
        assert!(!state.observe_success(false));
        assert!(state.wants_initial_usage());
        assert!(state.notice.is_none());
    }

    #[test]
    fn success_suppresses_initial_fetch() {
        let mut state = DashboardState::default();
        state.observe_success(true);
        assert!(!state.wants_initial_usage());
        assert_eq!(state.notice, Some(Notice::success(UPGRADE_SUCCESS)));
    }

    #[test]
    fn track_notices() {
        let ok = Ok(TrackResult {
            success: true,
            error: None,
        });
        assert_eq!(track_notice(&ok), Notice::success(TRACK_SUCCESS));

        let rejected = Ok(TrackResult::default());
        assert_eq!(track_notice(&rejected), Notice::error(LIMIT_REACHED));

        let over_quota = Err(dream::Error::Api {
            status: 429,
            code: None,
            message: "Too Many Requests".into(),
        });
        assert_eq!(track_notice(&over_quota), Notice::error(LIMIT_REACHED));

        let textual = Err(dream::Error::Api {
            status: 403,
            code: None,
            message: "You have hit your monthly limit".into(),
        });
        assert_eq!(track_notice(&textual), Notice::error(LIMIT_REACHED));

        let other = Err(dream::Error::Api {
            status: 500,
            code: None,
            message: "Database unavailable".into(),
        });
        assert_eq!(track_notice(&other), Notice::error("Database unavailable"));
    }
}
