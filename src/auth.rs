//! Bearer-token authorization for the cars routes.
//!
//! Tokens are HS256 JWTs carrying `sub`, `exp` and a `role` claim that may be
//! a single string or a list. A request passes only when the token verifies
//! and one of its roles equals the configured required role.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::API_NAME;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub role: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(role) => vec![role],
        OneOrMany::Many(roles) => roles,
    })
}

/// The authenticated caller, stored in request extensions after authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub roles: Vec<String>,
}

pub struct JwtAuth {
    decoding_key: DecodingKey,
    validation: Validation,
    required_role: String,
}

impl JwtAuth {
    pub fn new(secret: &str, issuer: Option<&str>, required_role: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_aud = false;
        if let Some(issuer) = issuer {
            // Without `iss` in the required set, tokens lacking the claim skip the issuer check.
            validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            required_role: required_role.into(),
        }
    }

    pub fn required_role(&self) -> &str {
        &self.required_role
    }

    /// Checks an `Authorization` header value and returns the caller it names.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<Principal, AppError> {
        let authorization = authorization
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

        let token = match authorization.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => return Err(AppError::Unauthorized("expected a Bearer token".to_string())),
        };

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))?
            .claims;

        if !claims.role.iter().any(|role| role == &self.required_role) {
            return Err(AppError::Forbidden(format!(
                "subject '{}' lacks role '{}'",
                claims.sub, self.required_role
            )));
        }

        Ok(Principal {
            subject: claims.sub,
            roles: claims.role,
        })
    }
}

/// Middleware rejecting requests that do not carry a token with the required role.
pub async fn require_role(
    State(auth): State<Arc<JwtAuth>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let principal = auth.authorize(authorization)?;
    tracing::debug!("{} Authorized subject: {}", API_NAME, principal.subject);

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
