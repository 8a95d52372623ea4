//! Session cookie plumbing for HTTP handlers.
//!
//! The bearer token travels in an `HttpOnly` cookie named `sessionId`; the
//! authoritative session state lives server-side, so clearing the cookie and
//! deleting the record are separate steps the logout handler performs
//! together.

use std::future::{ready, Ready};

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::domain::session::{SessionToken, SESSION_TTL_SECONDS};
use crate::domain::Error;

/// Cookie carrying the session bearer token.
pub const SESSION_COOKIE: &str = "sessionId";

/// Extractor for the session cookie; absence is not itself an error so
/// handlers like logout can stay idempotent.
#[derive(Debug, Clone)]
pub struct SessionCookie(Option<SessionToken>);

impl SessionCookie {
    /// The presented token, or `401` when the cookie is missing.
    pub fn token(&self) -> Result<&SessionToken, Error> {
        self.0
            .as_ref()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// The presented token, if any.
    #[must_use]
    pub fn maybe_token(&self) -> Option<&SessionToken> {
        self.0.as_ref()
    }
}

impl FromRequest for SessionCookie {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| SessionToken::new(cookie.value()).ok());
        ready(Ok(Self(token)))
    }
}

/// Build the login response cookie.
#[must_use]
pub fn session_cookie(token: &SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.as_str().to_owned())
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(CookieDuration::seconds(SESSION_TTL_SECONDS))
        .finish()
}

/// Build the logout cookie that immediately expires client-side state.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(CookieDuration::ZERO)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{web, App, HttpResponse};

    #[test]
    fn login_cookie_carries_token_and_ttl() {
        let token = SessionToken::generate();
        let cookie = session_cookie(&token, false);
        assert_eq!(cookie.name(), "sessionId");
        assert_eq!(cookie.value(), token.as_str());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(CookieDuration::seconds(SESSION_TTL_SECONDS))
        );
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }

    #[actix_web::test]
    async fn missing_cookie_extracts_as_none() {
        let app = actix_test::init_service(App::new().route(
            "/",
            web::get().to(|cookie: SessionCookie| async move {
                match cookie.maybe_token() {
                    Some(_) => HttpResponse::Ok(),
                    None => HttpResponse::NoContent(),
                }
            }),
        ))
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn presented_cookie_extracts_the_token() {
        let app = actix_test::init_service(App::new().route(
            "/",
            web::get().to(|cookie: SessionCookie| async move {
                let token = cookie.token()?;
                Ok::<_, Error>(HttpResponse::Ok().body(token.as_str().to_owned()))
            }),
        ))
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/")
                .cookie(Cookie::new(SESSION_COOKIE, "abc123"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert_eq!(&body[..], b"abc123");
    }
}
