//! Session lifecycle: the session model, login/refresh flows, and the
//! per-caller session state machine.

pub mod context;
pub mod manager;
pub mod model;

pub use context::{SessionContext, SessionState};
pub use manager::SessionManager;
pub use model::{Session, SessionFlag, SessionView};
