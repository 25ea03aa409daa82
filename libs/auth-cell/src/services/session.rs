use std::sync::Arc;

use tracing::{debug, info};

use shared_models::auth::UserProfile;
use shared_utils::session::ProfileStore;

use crate::models::{AuthError, LoginRequest};
use crate::services::directory::find_demo_profile;

/// Mock sign-in over the stored profile.
pub struct SessionService {
    store: Arc<ProfileStore>,
}

impl SessionService {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<UserProfile, AuthError> {
        debug!("Login attempt for {}", request.email);

        if request.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let profile = find_demo_profile(&request.email)
            .ok_or_else(|| AuthError::UnknownUser(request.email.clone()))?;

        self.store.save(&profile).await?;
        info!("{} signed in as {}", profile.email, profile.role);
        Ok(profile)
    }

    pub async fn logout(&self) -> Result<bool, AuthError> {
        Ok(self.store.clear().await?)
    }

    pub async fn current(&self) -> Option<UserProfile> {
        self.store.load().await
    }
}
