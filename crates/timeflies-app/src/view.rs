//! Declarative render tree.
//!
//! [`project`] is a pure function from [`App`] to a [`View`]. Frontends only
//! draw the view; every visual depends solely on the current state.

use crate::{
    App,
    state::{DisplayText, PeerState, TrackingMode},
};

/// Placement of overlay letters relative to their sampled position.
///
/// Letter `i` is drawn at `x = base_x + i × letter_spacing + offset_x`,
/// `y = base_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    /// Horizontal distance between consecutive letters, in view units.
    pub letter_spacing: u32,
    /// Horizontal offset from the pointer, in view units.
    pub offset_x: u32,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self { letter_spacing: 10, offset_x: 15 }
    }
}

/// Render tree for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Text row.
    pub headline: Headline,
    /// Feature status table, local tracking first.
    pub features: [FeatureRow; 2],
    /// Positioned overlay letters, ordered by index.
    pub overlay: Vec<OverlaySpan>,
    /// Echo peer link status.
    pub peer: PeerState,
    /// Transient status message.
    pub status: Option<String>,
}

/// Text row: the shown text or the edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Headline {
    /// Text is displayed.
    Showing {
        /// Displayed text.
        text: String,
    },
    /// Text is being edited.
    Editing {
        /// Edit buffer.
        text: String,
        /// Cursor position, in characters.
        cursor: usize,
    },
}

/// One row of the feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    /// Feature name.
    pub label: &'static str,
    /// Key toggling the feature.
    pub key: char,
    /// Switch state.
    pub enabled: bool,
}

/// A letter drawn at an absolute position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySpan {
    /// Character index.
    pub index: usize,
    /// Character drawn.
    pub ch: char,
    /// Horizontal position, in view units.
    pub x: u32,
    /// Vertical position, in view units.
    pub y: u32,
}

/// Project the application state to a render tree.
pub fn project(app: &App, layout: &OverlayLayout) -> View {
    let model = app.model();

    let headline = match &model.text {
        DisplayText::Showing(text) => Headline::Showing { text: text.clone() },
        DisplayText::Editing(text) => {
            Headline::Editing { text: text.clone(), cursor: app.edit_cursor() }
        },
    };

    let mode = app.tracking_mode();
    let features = [
        FeatureRow { label: "Local tracking", key: 'l', enabled: mode == TrackingMode::Local },
        FeatureRow { label: "Remote tracking", key: 'r', enabled: mode == TrackingMode::Remote },
    ];

    let overlay = model
        .letters
        .markers()
        .map(|markers| {
            markers
                .iter()
                .map(|(&index, marker)| {
                    let step = u32::try_from(index)
                        .unwrap_or(u32::MAX)
                        .saturating_mul(layout.letter_spacing);
                    OverlaySpan {
                        index,
                        ch: marker.ch,
                        x: marker.position.x.saturating_add(step).saturating_add(layout.offset_x),
                        y: marker.position.y,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    View {
        headline,
        features,
        overlay,
        peer: app.peer_state(),
        status: app.status_message().map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use timeflies_core::{Marker, Position};

    use super::*;
    use crate::{AppEvent, KeyInput, MarkerRoute};

    fn sample(app: &mut App, index: usize, ch: char, x: u32, y: u32) {
        let _ = app.handle(AppEvent::MarkerSampled {
            route: MarkerRoute::Local,
            index,
            marker: Marker::new(ch, Position::new(x, y)),
        });
    }

    #[test]
    fn overlay_offsets_letters_from_pointer() {
        let mut app = App::new("hi");
        let _ = app.handle(AppEvent::Key(KeyInput::Char('l')));
        sample(&mut app, 0, 'h', 100, 40);
        sample(&mut app, 1, 'i', 200, 60);

        let view = project(&app, &OverlayLayout::default());

        assert_eq!(view.overlay, vec![
            OverlaySpan { index: 0, ch: 'h', x: 115, y: 40 },
            OverlaySpan { index: 1, ch: 'i', x: 225, y: 60 },
        ]);
    }

    #[test]
    fn custom_layout_is_applied() {
        let mut app = App::new("ab");
        let _ = app.handle(AppEvent::Key(KeyInput::Char('l')));
        sample(&mut app, 1, 'b', 0, 0);

        let layout = OverlayLayout { letter_spacing: 20, offset_x: 0 };
        let view = project(&app, &layout);

        assert_eq!(view.overlay, vec![OverlaySpan { index: 1, ch: 'b', x: 20, y: 0 }]);
    }

    #[test]
    fn disabled_tracking_has_no_overlay() {
        let app = App::new("hi");
        let view = project(&app, &OverlayLayout::default());

        assert!(view.overlay.is_empty());
        assert!(view.features.iter().all(|row| !row.enabled));
    }

    #[test]
    fn feature_switches_follow_mode() {
        let mut app = App::new("hi");
        let _ = app.handle(AppEvent::Key(KeyInput::Char('r')));
        let view = project(&app, &OverlayLayout::default());

        assert!(!view.features[0].enabled);
        assert!(view.features[1].enabled);
        assert_eq!(view.features[1].key, 'r');
    }

    #[test]
    fn headline_shows_edit_buffer_and_cursor() {
        let mut app = App::new("hey");
        let _ = app.handle(AppEvent::Key(KeyInput::Char('e')));
        let _ = app.handle(AppEvent::Key(KeyInput::Left));

        let view = project(&app, &OverlayLayout::default());
        assert_eq!(view.headline, Headline::Editing { text: "hey".into(), cursor: 2 });
    }
}
