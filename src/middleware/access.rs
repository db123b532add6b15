//! Role-based route access.
//!
//! Every request passes through [`route_access`]. Protected paths are listed
//! in [`ROUTE_ACCESS_MAP`]; a pattern ending in `(.*)` matches by prefix,
//! any other pattern must equal the path. Reads outside the caller's role
//! redirect to the caller's home, writes outside it are refused with 403.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use schoolboard_core::{AppError, Role};
use tracing::debug;

use crate::metrics::track_access_decision;
use crate::middleware::session::{Session, resolve_session};
use crate::state::AppState;

const ALL: &[Role] = &Role::ALL;
const ADMIN: &[Role] = &[Role::Admin];
const STAFF: &[Role] = &[Role::Admin, Role::Teacher];
const NONE: &[Role] = &[];

#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub pattern: &'static str,
    /// Roles allowed to view the path
    pub read: &'static [Role],
    /// Roles allowed to POST/PUT/PATCH/DELETE on the path
    pub write: &'static [Role],
}

impl RouteRule {
    pub fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix("(.*)") {
            Some(prefix) => path.starts_with(prefix),
            None => path == self.pattern,
        }
    }

    pub fn can_read(&self, role: Role) -> bool {
        self.read.contains(&role)
    }

    pub fn can_write(&self, role: Role) -> bool {
        self.write.contains(&role)
    }
}

pub static ROUTE_ACCESS_MAP: &[RouteRule] = &[
    RouteRule { pattern: "/admin(.*)", read: &[Role::Admin], write: NONE },
    RouteRule { pattern: "/teacher(.*)", read: &[Role::Teacher], write: NONE },
    RouteRule { pattern: "/student(.*)", read: &[Role::Student], write: NONE },
    RouteRule { pattern: "/parent(.*)", read: &[Role::Parent], write: NONE },
    RouteRule { pattern: "/list/teachers(.*)", read: STAFF, write: ADMIN },
    RouteRule { pattern: "/list/students(.*)", read: STAFF, write: ADMIN },
    RouteRule { pattern: "/list/parents(.*)", read: STAFF, write: ADMIN },
    RouteRule { pattern: "/list/subjects(.*)", read: ADMIN, write: ADMIN },
    RouteRule { pattern: "/list/classes(.*)", read: STAFF, write: ADMIN },
    RouteRule { pattern: "/list/lessons(.*)", read: STAFF, write: ADMIN },
    RouteRule { pattern: "/list/exams(.*)", read: ALL, write: STAFF },
    RouteRule { pattern: "/list/assignments(.*)", read: ALL, write: STAFF },
    RouteRule { pattern: "/list/results(.*)", read: ALL, write: STAFF },
    RouteRule { pattern: "/list/attendance(.*)", read: ALL, write: STAFF },
    RouteRule { pattern: "/list/events(.*)", read: ALL, write: ADMIN },
    RouteRule { pattern: "/list/announcements(.*)", read: ALL, write: ADMIN },
    RouteRule { pattern: "/profile(.*)", read: ALL, write: NONE },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Unauthenticated request for a protected path
    SignIn,
    /// Redirect to the caller's own home
    Home(Role),
    Forbidden,
}

impl AccessDecision {
    fn label(&self) -> &'static str {
        match self {
            Self::Allow => "allowed",
            Self::SignIn => "sign_in",
            Self::Home(_) => "home",
            Self::Forbidden => "forbidden",
        }
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// Decides what happens to a request for `path`, in order: signed-in
/// callers are sent home from the sign-in page, anonymous callers are sent
/// to sign in from protected paths, callers outside a matching rule's read
/// roles are sent home, and writes outside the write roles are forbidden.
pub fn decide(
    rules: &[RouteRule],
    path: &str,
    method: &Method,
    session: Option<&Session>,
    sign_in_path: &str,
) -> AccessDecision {
    if path == sign_in_path {
        return match session {
            Some(session) => AccessDecision::Home(session.role),
            None => AccessDecision::Allow,
        };
    }

    let mut matching = rules.iter().filter(|rule| rule.matches(path)).peekable();
    if matching.peek().is_none() {
        return AccessDecision::Allow;
    }

    let Some(session) = session else {
        return AccessDecision::SignIn;
    };

    let matching: Vec<&RouteRule> = matching.collect();
    if matching.iter().any(|rule| !rule.can_read(session.role)) {
        return AccessDecision::Home(session.role);
    }
    if is_mutating(method) && matching.iter().any(|rule| !rule.can_write(session.role)) {
        return AccessDecision::Forbidden;
    }

    AccessDecision::Allow
}

/// Applies [`decide`] with [`ROUTE_ACCESS_MAP`] and stores the resolved
/// [`Session`] in the request extensions for handlers.
pub async fn route_access(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let session = resolve_session(
        req.headers(),
        &state.jwt_config,
        state.access_config.fallback_role,
    );
    let sign_in_path = &state.access_config.sign_in_path;
    let path = req.uri().path().to_string();

    let decision = decide(
        ROUTE_ACCESS_MAP,
        &path,
        req.method(),
        session.as_ref(),
        sign_in_path,
    );
    track_access_decision(decision.label(), session.as_ref().map(|s| s.role.as_str()));

    match decision {
        AccessDecision::Allow => {
            if let Some(session) = session {
                req.extensions_mut().insert(session);
            }
            next.run(req).await
        }
        AccessDecision::SignIn => {
            debug!(path = %path, "Redirecting anonymous request to sign-in");
            Redirect::temporary(sign_in_path).into_response()
        }
        AccessDecision::Home(role) => {
            debug!(path = %path, role = %role, "Redirecting to role home");
            Redirect::temporary(&role.home_path()).into_response()
        }
        AccessDecision::Forbidden => AppError::forbidden(format!(
            "The {} role may not modify {}",
            session.map(|s| s.role.as_str()).unwrap_or("anonymous"),
            path
        ))
        .into_response(),
    }
}
