//! User profile view model

use std::sync::Arc;

use myflix_core::{ProfileUpdate, UserProfile};
use tracing::error;

use super::ViewError;
use crate::routes::Route;
use crate::state::AppState;

/// Minimum accepted password length on update
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct ProfileViewModel {
    state: Arc<AppState>,
    pub profile: Option<UserProfile>,
}

impl ProfileViewModel {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            profile: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ViewError> {
        self.profile = Some(self.state.users.profile().await?);
        Ok(())
    }

    /// Birthday as `January 5, 1990`, empty when unknown
    pub fn birthday_display(&self) -> String {
        self.profile
            .as_ref()
            .map(UserProfile::birthday_display)
            .unwrap_or_default()
    }

    /// Edit form prefilled from the loaded profile
    pub fn edit_form(&self) -> UpdateUserForm {
        let profile = self.profile.clone().unwrap_or_default();
        UpdateUserForm {
            username: profile.username,
            password: String::new(),
            email: profile.email,
        }
    }

    /// Validate and submit an edit. The snapshot is overwritten with the
    /// server's result.
    pub async fn submit_update(&mut self, form: &UpdateUserForm) -> Result<(), ViewError> {
        let update = form.validate()?;

        let updated = self.state.users.update_profile(&update).await.map_err(|e| {
            error!(error = %e, "Error updating profile");
            e
        })?;

        self.state.session.replace_snapshot(&updated)?;
        self.state.notifier.notify("Profile updated successfully!");
        self.profile = Some(updated);
        Ok(())
    }

    /// Delete the account and end the session
    pub async fn delete_account(&mut self) -> Result<Route, ViewError> {
        let username = self
            .profile
            .as_ref()
            .filter(|p| p.has_identity())
            .map(|p| p.username.clone())
            .or_else(|| self.state.current_username())
            .ok_or(ViewError::Api(myflix_net::ApiError::MissingSession))?;

        self.state.users.delete_account(&username).await?;
        self.state.session.clear()?;
        self.profile = None;
        self.state.notifier.notify("Account deleted.");
        Ok(Route::Welcome)
    }
}

/// Profile edit form
#[derive(Debug, Clone, Default)]
pub struct UpdateUserForm {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl UpdateUserForm {
    /// Username required, password of at least six characters, well-formed email
    pub fn validate(&self) -> Result<ProfileUpdate, ViewError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ViewError::Invalid("Username is required".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ViewError::Invalid(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ViewError::Invalid("A valid email is required".into()));
        }

        Ok(ProfileUpdate {
            username: Some(username.to_string()),
            password: Some(self.password.clone()),
            email: Some(email.to_string()),
            birthday: None,
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
