//! Shared server state.
//!
//! - [`Registry`]: online sessions plus ban/mute sets behind one lock
//! - [`SessionHandle`]: how other tasks reach a connection
//! - [`broadcast`]: snapshot-then-send fan-out
//! - [`Hub`]: the bundle every connection task receives

pub mod broadcast;
mod hub;
mod registry;
mod session;
mod uid;

pub use hub::Hub;
pub use registry::{RegisterError, Registry};
pub use session::{CloseReason, Closer, SessionHandle};
pub use uid::{SessionId, SessionIdGenerator};
