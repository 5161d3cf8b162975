use crate::domain::user::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Root,
    Student,
    Facility,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

const ADMIN_LINKS: &[NavLink] = &[
    NavLink { name: "Dashboard", href: "/admin" },
    NavLink { name: "User Management", href: "/admin/users" },
    NavLink { name: "Thresholds", href: "/admin/thresholds" },
    NavLink { name: "Audit Logs", href: "/admin/logs" },
];

const FACILITY_LINKS: &[NavLink] = &[
    NavLink { name: "Dashboard", href: "/facility" },
    NavLink { name: "Alerts", href: "/facility/alerts" },
    NavLink { name: "Reports", href: "/facility/reports" },
];

const STUDENT_LINKS: &[NavLink] = &[
    NavLink { name: "Dashboard", href: "/student" },
    NavLink { name: "My Areas", href: "/student/areas" },
    NavLink { name: "Recommendations", href: "/student/recommendations" },
];

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Root => "/",
            Route::Student => "/student",
            Route::Facility => "/facility",
            Route::Admin => "/admin",
        }
    }

    /// `None` means any signed-in user; `Login` is public.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Login | Route::Root => None,
            Route::Student => Some(&[Role::Student, Role::Faculty][..]),
            Route::Facility => Some(&[Role::FacilityManager][..]),
            Route::Admin => Some(&[Role::Admin][..]),
        }
    }

    /// Guard for `user` opening this route. The root route forwards each
    /// role to its own dashboard.
    pub fn guard(&self, user: Option<&User>) -> Access {
        if *self == Route::Login {
            return Access::Allow;
        }
        let Some(user) = user else {
            return Access::Redirect(Route::Login);
        };
        if *self == Route::Root {
            return Access::Redirect(user.role.home_route());
        }
        match self.allowed_roles() {
            Some(roles) if !roles.contains(&user.role) => Access::Redirect(Route::Root),
            _ => Access::Allow,
        }
    }
}

impl Role {
    pub fn home_route(&self) -> Route {
        match self {
            Role::Admin => Route::Admin,
            Role::FacilityManager => Route::Facility,
            Role::Student | Role::Faculty => Route::Student,
        }
    }

    pub fn nav_links(&self) -> &'static [NavLink] {
        match self {
            Role::Admin => ADMIN_LINKS,
            Role::FacilityManager => FACILITY_LINKS,
            Role::Student | Role::Faculty => STUDENT_LINKS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EntityId;
    use std::collections::HashMap;

    fn user(role: Role) -> User {
        User {
            id: EntityId::Number(1),
            name: "Test".to_string(),
            email: "test@campus.edu".to_string(),
            role,
            assigned_areas: vec![],
            status: Some("Active".to_string()),
            last_login: None,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        for route in [Route::Root, Route::Student, Route::Facility, Route::Admin] {
            assert_eq!(route.guard(None), Access::Redirect(Route::Login));
        }
        assert_eq!(Route::Login.guard(None), Access::Allow);
    }

    #[test]
    fn test_root_forwards_to_home() {
        assert_eq!(
            Route::Root.guard(Some(&user(Role::Faculty))),
            Access::Redirect(Route::Student)
        );
        assert_eq!(
            Route::Root.guard(Some(&user(Role::FacilityManager))),
            Access::Redirect(Route::Facility)
        );
        assert_eq!(
            Route::Root.guard(Some(&user(Role::Admin))),
            Access::Redirect(Route::Admin)
        );
    }

    #[test]
    fn test_wrong_role_redirects_to_root() {
        assert_eq!(
            Route::Admin.guard(Some(&user(Role::Student))),
            Access::Redirect(Route::Root)
        );
        assert_eq!(Route::Admin.guard(Some(&user(Role::Admin))), Access::Allow);
        assert_eq!(Route::Student.guard(Some(&user(Role::Faculty))), Access::Allow);
    }

    #[test]
    fn test_every_role_has_links_starting_at_home() {
        for role in Role::ALL {
            let links = role.nav_links();
            assert!(!links.is_empty());
            assert_eq!(links[0].href, role.home_route().path());
        }
        assert_eq!(Role::Admin.nav_links().len(), 4);
    }
}
