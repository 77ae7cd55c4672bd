//! Core types for timeflies
//!
//! Shared vocabulary between the application layer and its frontends:
//! positioned letter markers, the wire codec used to talk to the echo peer,
//! and the [`env::Environment`] abstraction over time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
pub mod error;
pub mod marker;
pub mod system_env;
pub mod wire;

pub use error::WireError;
pub use marker::{Marker, Position};
pub use system_env::SystemEnv;
pub use wire::WireMessage;
