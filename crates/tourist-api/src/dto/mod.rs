//! Request and response DTOs for the gateway's own endpoints.

pub mod request;
pub mod response;
