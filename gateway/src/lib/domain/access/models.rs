use auth::IdentityClaim;

/// Whether a path needs an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

/// A single path pattern.
///
/// `Prefix` is a literal string prefix: `/auth` matches `/auth/login` and also
/// `/authorize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteRule {
    Exact(&'static str),
    Prefix(&'static str),
}

impl RouteRule {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RouteRule::Exact(pattern) => path == *pattern,
            RouteRule::Prefix(pattern) => path.starts_with(pattern),
        }
    }
}

/// Why a request was let through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Path is outside the enforcement scope; nothing was inspected.
    Bypassed,
    /// Path is in scope but classified public.
    Public,
    /// Path is protected and the request carried a valid identity.
    Authenticated(IdentityClaim),
}

/// Outcome of the access gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(Admission),
    /// Protected API path without a valid identity.
    Unauthorized,
    /// Protected page path without a valid identity.
    RedirectToLogin,
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow(_))
    }

    pub fn identity(&self) -> Option<&IdentityClaim> {
        match self {
            GateDecision::Allow(Admission::Authenticated(identity)) => Some(identity),
            _ => None,
        }
    }
}
