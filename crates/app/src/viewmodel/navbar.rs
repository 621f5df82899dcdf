//! Navigation bar view model

use std::sync::Arc;

use tracing::warn;

use crate::routes::Route;
use crate::state::AppState;

pub struct Navbar {
    state: Arc<AppState>,
    current: Route,
}

impl Navbar {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            current: Route::default(),
        }
    }

    pub fn current_route(&self) -> &Route {
        &self.current
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.current, to = %route, "Navigate");
        self.current = route;
    }

    /// A token is present in the session cache
    pub fn is_authenticated(&self) -> bool {
        self.state.session.is_authenticated()
    }

    /// Forget the session and go back to the welcome page
    pub fn logout(&mut self) {
        if let Err(e) = self.state.session.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        self.navigate(Route::Welcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use myflix_core::UserProfile;
    use myflix_net::testing::ScriptedTransport;

    #[test]
    fn test_logout_clears_session_and_returns_to_welcome() {
        let state = test_support::logged_in(
            Arc::new(ScriptedTransport::new()),
            &UserProfile::new("alice"),
        );

        let mut navbar = Navbar::new(state.clone());
        navbar.navigate(Route::Favorites);
        assert_eq!(navbar.current_route(), &Route::Favorites);
        assert!(navbar.is_authenticated());

        navbar.logout();
        assert!(!navbar.is_authenticated());
        assert!(state.session.snapshot().username.is_empty());
        assert_eq!(navbar.current_route(), &Route::Welcome);
    }
}
