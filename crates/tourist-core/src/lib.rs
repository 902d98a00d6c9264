//! # tourist-core
//!
//! Core crate for the tourist admin gateway. Contains the configuration
//! schema and loader, and the unified error system shared by the auth,
//! API, and CLI crates.
//!
//! This crate has **no** internal dependencies on other gateway crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
