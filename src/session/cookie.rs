//! Credential cookie handling.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::dream::Credential;

use super::SessionContainer;

/// Name of the cookie that carries the Dream API credential.
pub const SESSION_COOKIE: &str = "dream_session";

/// Read the credential a previous page load stored.
pub fn credential_from(jar: &CookieJar) -> Option<Credential> {
    jar.get(SESSION_COOKIE)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
        .map(Credential::new)
}

/// Persist the container's credential, or remove the cookie when signed out.
pub fn sync(jar: CookieJar, session: &SessionContainer, secure: bool) -> CookieJar {
    let stored = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    match session.credential() {
        Some(credential) if stored.as_deref() == Some(credential.as_str()) => jar,
        Some(credential) => jar.add(
            Cookie::build((SESSION_COOKIE, credential.as_str().to_string()))
                .path("/")
                .http_only(true)
                .secure(secure)
                .same_site(SameSite::Lax)
                .build(),
        ),
        None if stored.is_some() => jar.remove(Cookie::build(SESSION_COOKIE).path("/").build()),
        None => jar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cookie_is_no_credential() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, ""));
        assert!(credential_from(&jar).is_none());
    }

    #[test]
    fn stored_cookie_is_read_back() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "tok"));
        assert_eq!(credential_from(&jar), Some(Credential::new("tok")));
    }
}
