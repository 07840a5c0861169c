// Mock account service: login, registration and profile edits against an
// in-memory user list, with the active session kept in the session store.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    auth_middleware::issue_token,
    catalog::simulate_latency,
    config::Settings,
    error::{AppError, AppResult},
    models::{AuthSession, RegisterRequest, User, UserPatch},
    session::SessionStore,
};

pub struct AuthService {
    users: RwLock<Vec<User>>,
    sessions: SessionStore,
    settings: Arc<Settings>,
    latency: Duration,
}

impl AuthService {
    pub fn new(users: Vec<User>, sessions: SessionStore, settings: Arc<Settings>) -> Self {
        let latency = Duration::from_millis(settings.simulated_latency_ms);
        AuthService { users: RwLock::new(users), sessions, settings, latency }
    }

    /// Every mock account shares the configured password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        simulate_latency(self.latency).await;
        let user = self.users.read().await.iter().find(|u| u.email == email).cloned();

        let user = match user {
            Some(user) if password == self.settings.mock_password => user,
            _ => {
                warn!("Failed login attempt for {}", email);
                return Err(AppError::Validation("Invalid email or password".into()));
            }
        };

        let session = self.start_session(user).await?;
        info!("User {} logged in", session.user.id);
        Ok(session)
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthSession> {
        request.validate()?;
        simulate_latency(self.latency).await;

        let user = {
            let mut users = self.users.write().await;
            if users.iter().any(|u| u.email == request.email) {
                return Err(AppError::Conflict("Email already registered".into()));
            }
            let user = User {
                id: (users.len() + 1).to_string(),
                email: request.email,
                full_name: request.full_name,
                user_type: request.user_type,
                phone: request.phone,
                profile_image: None,
                verified: false,
                created_at: Utc::now(),
            };
            users.push(user.clone());
            user
        };

        let session = self.start_session(user).await?;
        info!("Registered user {} as {:?}", session.user.id, session.user.user_type);
        Ok(session)
    }

    /// Merges the editable profile fields and refreshes the stored session user.
    pub async fn update_profile(&self, user_id: &str, patch: UserPatch) -> AppResult<User> {
        simulate_latency(self.latency).await;
        let updated = {
            let mut users = self.users.write().await;
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;
            if let Some(v) = patch.full_name {
                user.full_name = v;
            }
            if let Some(v) = patch.phone {
                user.phone = v;
            }
            if let Some(v) = patch.profile_image {
                user.profile_image = Some(v);
            }
            user.clone()
        };

        self.sessions.save_user(&updated).await?;
        info!("Updated profile for user {}", user_id);
        Ok(updated)
    }

    pub async fn current_user(&self) -> Option<User> {
        self.sessions.current_user().await
    }

    pub async fn token(&self) -> Option<String> {
        self.sessions.token().await
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.sessions.clear().await?;
        info!("Session cleared");
        Ok(())
    }

    async fn start_session(&self, user: User) -> AppResult<AuthSession> {
        let token = issue_token(&user, &self.settings)?;
        self.sessions.save_session(&user, &token).await?;
        Ok(AuthSession { user, token })
    }
}
