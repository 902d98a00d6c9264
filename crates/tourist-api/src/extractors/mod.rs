//! Custom Axum extractors.

pub mod path;
pub mod session;

pub use path::PathParams;
pub use session::SignedIn;
