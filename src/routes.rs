//! Client-side routes and role-gated navigation

use crate::types::{User, UserRole};

/// A client-side route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Root,
    Dashboard,
    Client,
    PatientDetail(String),
    VisitDetail(String),
    Profile,
    Admin,
    NotFound,
}

impl Route {
    /// Parse a route from a path string; unknown paths map to `NotFound`
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["client"] => Route::Client,
            ["profile"] => Route::Profile,
            ["admin"] => Route::Admin,
            ["patients", id] => Route::PatientDetail(id.to_string()),
            ["visit", id] => Route::VisitDetail(id.to_string()),
            _ => Route::NotFound,
        }
    }

    /// The path string for this route
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Root => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Client => "/client".to_string(),
            Route::PatientDetail(id) => format!("/patients/{}", id),
            Route::VisitDetail(id) => format!("/visit/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }
}

/// The landing route for a role
pub fn home_route(role: UserRole) -> Route {
    match role {
        UserRole::Admin => Route::Admin,
        UserRole::Practitioner => Route::Dashboard,
        UserRole::Client => Route::Client,
    }
}

/// Outcome of resolving a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The route may be rendered
    Allow,

    /// The caller should navigate to the given route instead
    Redirect(Route),
}

/// Resolve a navigation request against the signed-in user
///
/// Unauthenticated access to any protected route redirects to the login
/// page; a role mismatch redirects to the user's landing route.
pub fn resolve(route: &Route, user: Option<&User>) -> Navigation {
    match (route, user) {
        (Route::Login | Route::Register, None) => Navigation::Allow,
        (Route::Login | Route::Register, Some(user)) => {
            Navigation::Redirect(home_route(user.role))
        }
        (Route::NotFound, _) => Navigation::Allow,
        (_, None) => Navigation::Redirect(Route::Login),
        (Route::Root, Some(_)) => Navigation::Redirect(Route::Dashboard),
        (Route::Client, Some(user)) => require_role(user, UserRole::Client),
        (Route::PatientDetail(_) | Route::VisitDetail(_), Some(user)) => {
            require_role(user, UserRole::Practitioner)
        }
        (Route::Admin, Some(user)) => require_role(user, UserRole::Admin),
        (Route::Dashboard | Route::Profile, Some(_)) => Navigation::Allow,
    }
}

fn require_role(user: &User, role: UserRole) -> Navigation {
    if user.role == role {
        Navigation::Allow
    } else {
        Navigation::Redirect(home_route(user.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> User {
        User {
            id: "u-1".to_string(),
            name: "Test User".to_string(),
            role,
            email: None,
            phone: None,
            status: None,
            password: None,
        }
    }

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
        assert_eq!(
            Route::parse("/patients/p-7"),
            Route::PatientDetail("p-7".to_string())
        );
        assert_eq!(
            Route::parse("/visit/v-9"),
            Route::VisitDetail("v-9".to_string())
        );
        assert_eq!(Route::parse("/no/such/page"), Route::NotFound);
    }

    #[test]
    fn path_round_trips() {
        let route = Route::VisitDetail("v-3".to_string());
        assert_eq!(Route::parse(&route.path()), route);
    }

    #[test]
    fn unauthenticated_users_are_sent_to_login() {
        assert_eq!(
            resolve(&Route::Dashboard, None),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(
            resolve(&Route::Admin, None),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(resolve(&Route::Login, None), Navigation::Allow);
    }

    #[test]
    fn root_redirects_to_dashboard() {
        let u = user(UserRole::Practitioner);
        assert_eq!(
            resolve(&Route::Root, Some(&u)),
            Navigation::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn role_mismatch_redirects_home() {
        let client = user(UserRole::Client);
        assert_eq!(
            resolve(&Route::Admin, Some(&client)),
            Navigation::Redirect(Route::Client)
        );
        assert_eq!(
            resolve(&Route::VisitDetail("v-1".to_string()), Some(&client)),
            Navigation::Redirect(Route::Client)
        );

        let practitioner = user(UserRole::Practitioner);
        assert_eq!(
            resolve(&Route::PatientDetail("p-1".to_string()), Some(&practitioner)),
            Navigation::Allow
        );
    }

    #[test]
    fn signed_in_users_skip_login() {
        let admin = user(UserRole::Admin);
        assert_eq!(
            resolve(&Route::Login, Some(&admin)),
            Navigation::Redirect(Route::Admin)
        );
        assert_eq!(
            resolve(&Route::Register, Some(&admin)),
            Navigation::Redirect(Route::Admin)
        );
    }

    #[test]
    fn profile_is_open_to_any_role() {
        for role in [UserRole::Client, UserRole::Practitioner, UserRole::Admin] {
            let u = user(role);
            assert_eq!(resolve(&Route::Profile, Some(&u)), Navigation::Allow);
        }
    }
}
