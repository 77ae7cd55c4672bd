//! Terminal UI for timeflies
//!
//! A thin shell over [`timeflies_app::Driver`] that provides terminal I/O.
//! All orchestration logic lives in the generic [`timeflies_app::Runtime`].
//!
//! This crate only handles terminal input and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use terminal::{TerminalDriver, TerminalError};
pub use timeflies_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime, RuntimeConfig};
