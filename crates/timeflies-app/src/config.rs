//! Runtime configuration.

use std::time::Duration;

use crate::{peer::EchoConfig, view::OverlayLayout};

/// Default delay between consecutive letters.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

/// Runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Letter `i` trails the pointer by `stagger × i`.
    pub stagger: Duration,
    /// Echo peer settings used when remote tracking starts.
    pub echo: EchoConfig,
    /// Overlay letter placement.
    pub layout: OverlayLayout,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stagger: DEFAULT_STAGGER,
            echo: EchoConfig::default(),
            layout: OverlayLayout::default(),
        }
    }
}
