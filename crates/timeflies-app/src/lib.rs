//! Application layer for timeflies
//!
//! Pure state machines and a generic runtime for the letter-tracking demo:
//! characters of a display string trail the pointer with a staggered delay,
//! either locally or mirrored through an echo peer.
//!
//! # Components
//!
//! - [`update`]: pure transition function over [`Model`]
//! - [`App`]: UI state machine (events in, actions out)
//! - [`view::project`]: render tree projection
//! - [`MarkerStream`]: per-character trailing tasks with cancel-on-drop
//! - [`peer`]: in-process echo peer
//! - [`Driver`]: Trait for frontend-specific I/O
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod config;
mod driver;
mod error;
mod event;
mod input;
pub mod markers;
pub mod model;
pub mod peer;
mod runtime;
pub mod state;
pub mod view;

pub use action::AppAction;
pub use app::App;
pub use config::{DEFAULT_STAGGER, RuntimeConfig};
pub use driver::Driver;
pub use error::LinkError;
pub use event::AppEvent;
pub use input::KeyInput;
pub use markers::{MarkerRoute, MarkerStream, PointerFeed};
pub use model::{Model, Msg, update};
pub use runtime::Runtime;
pub use state::{DisplayText, LetterMap, LetterSource, PeerState, TrackingMode};
