//! Marketplace gateway: route classification, access gate and the
//! authentication endpoints built on the `auth` crate.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::access;
pub use domain::user;
pub use outbound::repositories;
