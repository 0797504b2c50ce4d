use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::components::Redirect;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const HOME_PATH: &str = "/";

/// Which credential state a route admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RouteAccess {
    /// Only without a credential (login, signup).
    PublicOnly,
    /// Only with a credential.
    ProtectedOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GuardOutcome {
    Render,
    Redirect(&'static str),
}

pub(crate) fn guard_outcome(access: RouteAccess, has_credential: bool) -> GuardOutcome {
    match (access, has_credential) {
        (RouteAccess::ProtectedOnly, true) | (RouteAccess::PublicOnly, false) => {
            GuardOutcome::Render
        }
        (RouteAccess::ProtectedOnly, false) => GuardOutcome::Redirect(LOGIN_PATH),
        (RouteAccess::PublicOnly, true) => GuardOutcome::Redirect(HOME_PATH),
    }
}

fn guarded(access: RouteAccess, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<AppContext>().0.session;

    // Store children so the closure below stays `Fn`.
    let children = StoredValue::new(children);

    move || match guard_outcome(access, session.is_present()) {
        GuardOutcome::Render => children.with_value(|c| c()).into_any(),
        GuardOutcome::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
    }
}

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteAccess::ProtectedOnly, children)
}

#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteAccess::PublicOnly, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_route_needs_credential() {
        assert_eq!(
            guard_outcome(RouteAccess::ProtectedOnly, true),
            GuardOutcome::Render
        );
        assert_eq!(
            guard_outcome(RouteAccess::ProtectedOnly, false),
            GuardOutcome::Redirect("/login")
        );
    }

    #[test]
    fn test_public_route_is_inverse() {
        assert_eq!(
            guard_outcome(RouteAccess::PublicOnly, false),
            GuardOutcome::Render
        );
        assert_eq!(
            guard_outcome(RouteAccess::PublicOnly, true),
            GuardOutcome::Redirect("/")
        );
    }
}
