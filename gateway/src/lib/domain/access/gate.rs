use auth::IdentityClaim;

use super::classifier::EnforcementScope;
use super::classifier::RouteClassifier;
use super::models::Admission;
use super::models::GateDecision;
use super::models::RouteClass;

/// Per-request access decision.
///
/// Holds only read-only rule sets, so a single instance is shared by every
/// request.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    scope: EnforcementScope,
    classifier: RouteClassifier,
}

impl AccessGate {
    pub fn new(scope: EnforcementScope, classifier: RouteClassifier) -> Self {
        Self { scope, classifier }
    }

    pub fn marketplace() -> Self {
        Self::new(EnforcementScope::marketplace(), RouteClassifier::marketplace())
    }

    /// Decide what happens to a request for `path`.
    ///
    /// `identity` is only called when the path is protected, so public traffic
    /// never pays for token verification.
    pub fn evaluate<F>(&self, path: &str, identity: F) -> GateDecision
    where
        F: FnOnce() -> Option<IdentityClaim>,
    {
        if !self.scope.intercepts(path) {
            return GateDecision::Allow(Admission::Bypassed);
        }

        if self.classifier.classify(path) == RouteClass::Public {
            return GateDecision::Allow(Admission::Public);
        }

        match identity() {
            Some(claim) => GateDecision::Allow(Admission::Authenticated(claim)),
            None if path.starts_with("/api/") => GateDecision::Unauthorized,
            None => GateDecision::RedirectToLogin,
        }
    }
}
