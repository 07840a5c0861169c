use anyhow::Context;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::TypedHeader;
use chrono::{DateTime, TimeDelta, Utc};
use headers::{authorization::Bearer, Authorization};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    config::Settings,
    error::AppError,
    models::{User, UserType},
    AppState,
};

const TOKEN_ISSUER: &str = "billboard-market";

// --- Claims ---

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub role: UserType,
    pub iss: String,
    pub iat: usize,
    pub exp: usize,
}

// --- Token Issuing & Verification ---

/// Signs a session token for the user.
pub fn issue_token(user: &User, settings: &Settings) -> anyhow::Result<String> {
    let now = Utc::now();
    let ttl = TimeDelta::try_hours(settings.token_ttl_hours).context("Token lifetime is out of range")?;
    let expires = now.checked_add_signed(ttl).context("Token expiry overflows")?;
    let claims = Claims {
        sub: user.id.clone(),
        role: user.user_type,
        iss: TOKEN_ISSUER.to_string(),
        iat: unix_seconds(now)?,
        exp: unix_seconds(expires)?,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .context("Failed to sign session token")
}

fn unix_seconds(at: DateTime<Utc>) -> anyhow::Result<usize> {
    usize::try_from(at.timestamp()).context("Token timestamp precedes the Unix epoch")
}

pub fn verify_token(token: &str, settings: &Settings) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        warn!("Token validation failed: {}", e);
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired".into()),
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => AppError::Unauthorized("Invalid token issuer".into()),
            _ => AppError::Unauthorized("Invalid token".into()),
        }
    })?;

    info!("Token successfully validated for user: {}", decoded.claims.sub);
    Ok(decoded.claims)
}

// --- Axum Extractor ---

// Extracted in every handler that requires a signed-in user
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub role: UserType,
}

impl AuthenticatedUser {
    pub fn require_owner(&self) -> Result<(), AppError> {
        self.require(UserType::Owner)
    }

    pub fn require_advertiser(&self) -> Result<(), AppError> {
        self.require(UserType::Advertiser)
    }

    /// The caller must be acting on their own records.
    pub fn require_self(&self, user_id: &str) -> Result<(), AppError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden("Cannot act on behalf of another user".into()))
        }
    }

    fn require(&self, role: UserType) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            let needed = match role {
                UserType::Owner => "owner",
                UserType::Advertiser => "advertiser",
            };
            Err(AppError::Forbidden(format!("This action requires an {} account", needed)))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|e| {
                warn!("Failed to extract Authorization header: {}", e);
                AppError::Unauthorized("Missing or invalid Authorization header".into())
            })?;

        let app_state = AppState::from_ref(state);
        let claims = verify_token(bearer.token(), &app_state.settings)?;

        Ok(AuthenticatedUser { user_id: claims.sub, role: claims.role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::seed_users;

    #[test]
    fn issued_tokens_verify_with_the_same_secret() {
        let settings = Settings::for_tests("unused.json");
        let owner = seed_users(Utc::now()).remove(0);

        let token = issue_token(&owner, &settings).unwrap();
        let claims = verify_token(&token, &settings).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.role, UserType::Owner);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let settings = Settings::for_tests("unused.json");
        let mut other = settings.clone();
        other.jwt_secret = "someone-else".into();
        let user = seed_users(Utc::now()).remove(1);

        let token = issue_token(&user, &other).unwrap();
        assert!(matches!(verify_token(&token, &settings), Err(AppError::Unauthorized(_))));
        assert!(matches!(verify_token("garbage", &settings), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        let mut settings = Settings::for_tests("unused.json");
        let user = seed_users(Utc::now()).remove(0);

        settings.token_ttl_hours = i64::MAX;
        assert!(issue_token(&user, &settings).is_err());

        settings.token_ttl_hours = -24 * 365 * 100;
        assert!(issue_token(&user, &settings).is_err());
    }

    #[test]
    fn role_checks() {
        let owner = AuthenticatedUser { user_id: "1".into(), role: UserType::Owner };
        assert!(owner.require_owner().is_ok());
        assert!(matches!(owner.require_advertiser(), Err(AppError::Forbidden(_))));
        assert!(owner.require_self("1").is_ok());
        assert!(matches!(owner.require_self("2"), Err(AppError::Forbidden(_))));
    }
}
