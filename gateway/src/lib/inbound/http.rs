pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod router;

pub use router::create_router;
pub use router::AppState;
