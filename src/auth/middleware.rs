use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, dev::Payload, web};
use actix_web_httpauth::extractors::basic::BasicAuth;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use std::future::Future;
use std::pin::Pin;

use crate::config::AdminCredentials;

/// Extractor that admits a request only with the configured admin Basic credentials.
pub struct AdminUser(pub String);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Get the expected credentials from app data.
            let expected = req
                .app_data::<web::Data<AdminCredentials>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Admin credentials not configured")
                })?;

            // 2. Parse the `Authorization: Basic ...` header.
            let credentials = BasicAuth::extract(&req)
                .await
                .map_err(|_| unauthorized("Missing or malformed Basic credentials"))?;

            // 3. Compare both parts without short-circuiting.
            let user_ok = constant_time_eq(
                credentials.user_id().as_bytes(),
                expected.username.as_bytes(),
            );
            let pass_ok = constant_time_eq(
                credentials.password().unwrap_or_default().as_bytes(),
                expected.password.as_bytes(),
            );

            if !(user_ok & pass_ok) {
                tracing::warn!(user = credentials.user_id(), "Rejected admin credentials");
                return Err(unauthorized("Invalid credentials"));
            }

            Ok(AdminUser(credentials.user_id().to_string()))
        })
    }
}

fn unauthorized(message: &str) -> Error {
    let response = HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Basic realm=\"meapi\""))
        .json(serde_json::json!({ "error": message }));

    InternalError::from_response(message.to_string(), response).into()
}

/// Compare SHA-256 digests of both inputs in constant time, so neither the
/// contents nor the length of the expected secret show up in timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let digest_a = Sha256::digest(a);
    let digest_b = Sha256::digest(b);
    digest_a.ct_eq(&digest_b).into()
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"change-me", b"change-me"));
        assert!(!constant_time_eq(b"change-me", b"change-mf"));
        assert!(!constant_time_eq(b"change", b"change-me"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
