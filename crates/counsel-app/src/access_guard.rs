//! Route guarding by authentication state and role.

use counsel_core::identity::{IdentitySession, Role, User};

/// The navigable views of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Chat,
    TeacherDashboard,
}

impl Route {
    /// The landing view for a freshly authenticated user.
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Student => Self::Chat,
            Role::Teacher => Self::TeacherDashboard,
        }
    }
}

/// What a guarded view should do given the current identity.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    /// Session restore is still in flight; render a waiting state, not an
    /// error.
    Waiting,
    /// No authenticated user; go to the login entry point.
    RedirectToLogin,
    /// Authenticated, but the wrong role for this view; go to the user's
    /// own default view instead of showing an error.
    Redirect(Route),
    /// Render the protected view for this user.
    Authorized(User),
}

/// Gate in front of a protected view.
///
/// The guard never owns identity state; it is handed an [`IdentitySession`]
/// snapshot and answers with a decision. `resolving` always wins over the
/// role check, so a teacher view briefly shows the waiting state during
/// session restore rather than bouncing a teacher to the student view.
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard {
    required_role: Option<Role>,
}

impl AccessGuard {
    /// Guard that admits any authenticated user.
    pub fn any_user() -> Self {
        Self {
            required_role: None,
        }
    }

    /// Guard that admits only users with the given role.
    pub fn require(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }

    /// Decides what the wrapped view should do right now.
    pub fn decide(&self, identity: &IdentitySession) -> AccessDecision {
        if identity.is_resolving() {
            return AccessDecision::Waiting;
        }

        let Some(user) = identity.user() else {
            return AccessDecision::RedirectToLogin;
        };

        if let Some(required) = self.required_role
            && user.role != required
        {
            return AccessDecision::Redirect(Route::default_for(user.role));
        }

        AccessDecision::Authorized(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 1,
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            full_name: None,
            role,
        }
    }

    #[test]
    fn test_waiting_while_unresolved() {
        let guard = AccessGuard::require(Role::Teacher);
        assert_eq!(
            guard.decide(&IdentitySession::Unresolved),
            AccessDecision::Waiting
        );
    }

    #[test]
    fn test_cleared_redirects_to_login() {
        let guard = AccessGuard::any_user();
        assert_eq!(
            guard.decide(&IdentitySession::Cleared),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_wrong_role_redirects_to_own_default() {
        let guard = AccessGuard::require(Role::Teacher);
        let identity = IdentitySession::Resolved(user(Role::Student));
        assert_eq!(
            guard.decide(&identity),
            AccessDecision::Redirect(Route::Chat)
        );
    }

    #[test]
    fn test_matching_role_is_authorized() {
        let guard = AccessGuard::require(Role::Teacher);
        let identity = IdentitySession::Resolved(user(Role::Teacher));
        match guard.decide(&identity) {
            AccessDecision::Authorized(u) => assert_eq!(u.role, Role::Teacher),
            other => panic!("expected Authorized, got {:?}", other),
        }
    }

    #[test]
    fn test_any_user_admits_both_roles() {
        let guard = AccessGuard::any_user();
        for role in [Role::Student, Role::Teacher] {
            let identity = IdentitySession::Resolved(user(role));
            assert!(matches!(
                guard.decide(&identity),
                AccessDecision::Authorized(_)
            ));
        }
    }
}
