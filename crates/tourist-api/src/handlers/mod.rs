//! Handlers for the gateway's own endpoints. Proxy routes are served by
//! [`crate::proxy::forward`].

pub mod health;
pub mod session;
