/// Session cookie handling
use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::{IntoResponseParts, ResponseParts},
};
use std::convert::Infallible;
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "songinfo_session";

/// Browser session identified by the `songinfo_session` cookie
///
/// Requests without a valid cookie get a fresh id, which is sent back in a
/// `Set-Cookie` header when the session is part of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    is_new: bool,
}

impl Session {
    /// Session from the request's cookies, or a new one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let existing = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok());

        match existing {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: Uuid::new_v4(),
                is_new: true,
            },
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    fn cookie(&self) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.id
        )
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.is_new {
            if let Ok(value) = HeaderValue::from_str(&self.cookie()) {
                res.headers_mut().append(SET_COOKIE, value);
            }
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cookie_starts_new_session() {
        let session = Session::from_headers(&HeaderMap::new());
        assert!(session.is_new());
    }

    #[test]
    fn existing_cookie_is_reused() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE, id)).unwrap(),
        );

        let session = Session::from_headers(&headers);
        assert!(!session.is_new());
        assert_eq!(session.id(), id);
    }

    #[test]
    fn garbage_cookie_starts_new_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("songinfo_session=not-a-uuid"),
        );
        assert!(Session::from_headers(&headers).is_new());
    }
}
