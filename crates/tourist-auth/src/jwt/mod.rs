//! JWT handling: reading claims from backend-issued access tokens and
//! sealing sessions into signed cookies.

pub mod claims;
pub mod decoder;
pub mod sealer;

pub use claims::AccessClaims;
pub use decoder::inspect_access_token;
pub use sealer::SessionSealer;
