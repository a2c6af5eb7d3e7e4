//! Route-level access control.
//!
//! Decides, per request path, whether the request passes untouched, passes as
//! public, passes with an authenticated identity, or is turned away. Only
//! authentication is established here; per-role authorization is left to the
//! handlers, which read the role from the attached identity.

pub mod classifier;
pub mod gate;
pub mod models;

pub use classifier::EnforcementScope;
pub use classifier::RouteClassifier;
pub use gate::AccessGate;
pub use models::Admission;
pub use models::GateDecision;
pub use models::RouteClass;
pub use models::RouteRule;
