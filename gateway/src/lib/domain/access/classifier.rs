use super::models::RouteClass;
use super::models::RouteRule;

/// Ordered public-route rules; anything unmatched is protected.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    public_rules: Vec<RouteRule>,
}

impl RouteClassifier {
    pub fn new(public_rules: Vec<RouteRule>) -> Self {
        Self { public_rules }
    }

    /// Public routes of the marketplace, in evaluation order.
    pub fn marketplace() -> Self {
        Self::new(vec![
            RouteRule::Prefix("/api/auth"),
            RouteRule::Exact("/"),
            RouteRule::Prefix("/marketplace"),
            RouteRule::Prefix("/auth"),
            RouteRule::Prefix("/terms"),
            RouteRule::Prefix("/privacy"),
            RouteRule::Prefix("/help"),
            RouteRule::Exact("/api/simple-test"),
            RouteRule::Exact("/api/test-env"),
        ])
    }

    /// First public rule matching `path`, if any.
    pub fn matching_rule(&self, path: &str) -> Option<&RouteRule> {
        self.public_rules.iter().find(|rule| rule.matches(path))
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        match self.matching_rule(path) {
            Some(_) => RouteClass::Public,
            None => RouteClass::Protected,
        }
    }
}

impl Default for RouteClassifier {
    fn default() -> Self {
        Self::marketplace()
    }
}

/// Path trees the gate runs on at all.
///
/// Each root covers itself and everything beneath it (`/api`, `/api/orders`),
/// but not siblings sharing the prefix (`/apis`). Paths outside every root are
/// never inspected.
#[derive(Debug, Clone)]
pub struct EnforcementScope {
    roots: Vec<&'static str>,
}

impl EnforcementScope {
    pub fn new(roots: Vec<&'static str>) -> Self {
        Self { roots }
    }

    pub fn marketplace() -> Self {
        Self::new(vec!["/dashboard", "/auth", "/api"])
    }

    pub fn intercepts(&self, path: &str) -> bool {
        self.roots.iter().any(|root| {
            path.strip_prefix(root)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

impl Default for EnforcementScope {
    fn default() -> Self {
        Self::marketplace()
    }
}
