//! Login and registration view models

use std::sync::Arc;

use myflix_core::{Credentials, Registration};
use tracing::error;

use super::ViewError;
use crate::routes::Route;
use crate::state::AppState;

pub struct LoginForm {
    state: Arc<AppState>,
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            username: String::new(),
            password: String::new(),
        }
    }

    /// Log in, persist the session and return the route to show next
    pub async fn submit(&self) -> Result<Route, ViewError> {
        let credentials = Credentials::new(self.username.trim(), self.password.clone());

        let response = match self.state.registration.login(&credentials).await {
            Ok(r) => r,
            Err(e) => {
                self.state.notifier.notify("Login failed. Please try again.");
                return Err(e.into());
            }
        };

        if let Err(e) = self.state.session.begin(&response.token, &response.user) {
            error!(error = %e, "Failed to persist session");
            self.state.notifier.notify("Login failed. Please try again.");
            return Err(e.into());
        }

        self.state.notifier.notify("Login successful!");
        Ok(Route::Movies)
    }
}

pub struct RegistrationForm {
    state: Arc<AppState>,
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: String,
}

impl RegistrationForm {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            username: String::new(),
            password: String::new(),
            email: String::new(),
            birthday: String::new(),
        }
    }

    fn validate(&self) -> Result<Registration, ViewError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ViewError::Invalid("Username is required".into()));
        }
        if self.password.is_empty() {
            return Err(ViewError::Invalid("Password is required".into()));
        }

        let optional = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };

        Ok(Registration {
            username: username.to_string(),
            password: self.password.clone(),
            email: optional(&self.email),
            birthday: optional(&self.birthday),
        })
    }

    pub async fn submit(&self) -> Result<(), ViewError> {
        let registration = match self.validate() {
            Ok(r) => r,
            Err(e) => {
                self.state.notifier.notify(e.to_string());
                return Err(e);
            }
        };

        match self.state.registration.register(&registration).await {
            Ok(_) => {
                self.state.notifier.notify("User registration successful!");
                Ok(())
            }
            Err(e) => {
                self.state.notifier.notify(e.to_string());
                Err(e.into())
            }
        }
    }
}
