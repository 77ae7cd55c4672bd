//! Application state machine.
//!
//! [`App`] wraps the pure [`Model`] and turns [`AppEvent`]s into
//! [`AppAction`]s for the runtime to execute. It never performs I/O: marker
//! streams and the peer link are started and stopped by the runtime in
//! response to the actions returned here.
//!
//! # Responsibilities
//!
//! - Maps keys to model messages (and edits the text at a cursor).
//! - Derives marker stream and peer link effects from mode changes.
//! - Routes marker samples locally or to the peer depending on the mode.
//! - Tracks peer status and a transient status line.

use timeflies_core::WireMessage;

use crate::{
    AppAction, AppEvent, KeyInput, MarkerRoute,
    model::{Model, Msg, update},
    state::{DisplayText, PeerState, TrackingMode},
};

/// Application state machine.
#[derive(Debug, Clone)]
pub struct App {
    /// Display string and tracked letters.
    model: Model,
    /// Cursor position in the edit buffer, in characters.
    edit_cursor: usize,
    /// Echo peer link status.
    peer: PeerState,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App showing `text` with tracking disabled.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            model: Model::new(text),
            edit_cursor: 0,
            peer: PeerState::Offline,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize => vec![AppAction::Render],
            // Pointer samples feed the marker streams, not the model
            AppEvent::PointerMoved(_) => vec![],
            AppEvent::MarkerSampled { route, index, marker } => {
                match (route, self.tracking_mode()) {
                    (MarkerRoute::Local, TrackingMode::Local) => {
                        self.dispatch(Msg::MarkerObserved { index, marker })
                    },
                    (MarkerRoute::Remote, TrackingMode::Remote) => {
                        vec![AppAction::Publish(WireMessage::MarkerObserved { index, marker })]
                    },
                    _ => {
                        tracing::trace!(?route, index, "dropping stale marker sample");
                        vec![]
                    },
                }
            },
            AppEvent::PeerMessage(message) => match message {
                WireMessage::TextChanged { text } => self.dispatch(Msg::RemoteTextChanged(text)),
                WireMessage::MarkerObserved { index, marker } => {
                    self.dispatch(Msg::RemoteMarkerObserved { index, marker })
                },
            },
            // Mode changes own the status line; the peer state has its own slot
            AppEvent::PeerConnected => {
                self.peer = PeerState::Online;
                vec![AppAction::Render]
            },
            AppEvent::PeerDisconnected => {
                self.peer = PeerState::Offline;
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Apply a model message and derive effects.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<AppAction> {
        let before = self.tracking_mode();
        let was_editing = self.model.text.is_editing();
        let remote_text = matches!(msg, Msg::RemoteTextChanged(_));
        let submitted = match &msg {
            Msg::SubmitEdit(text) => Some(text.clone()),
            _ => None,
        };

        let model = std::mem::take(&mut self.model);
        self.model = update(msg, model);

        let after = self.tracking_mode();
        let mut actions = Vec::new();

        if before != after {
            actions.extend(self.tracking_changed(before, after));
        } else if after == TrackingMode::Remote && remote_text {
            actions.push(self.start_markers(MarkerRoute::Remote));
        }

        if let (Some(text), TrackingMode::Remote) = (submitted, after) {
            actions.push(AppAction::Publish(WireMessage::TextChanged { text }));
        }

        if self.model.text.is_editing() {
            let len = self.model.text.text().chars().count();
            self.edit_cursor = if was_editing { self.edit_cursor.min(len) } else { len };
        }

        actions.push(AppAction::Render);
        actions
    }

    /// Handle keyboard input.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if key == KeyInput::Interrupt {
            return vec![AppAction::Quit];
        }

        match &self.model.text {
            DisplayText::Showing(_) => match key {
                KeyInput::Char('e') | KeyInput::Enter => self.dispatch(Msg::RequestEdit),
                KeyInput::Char('l') => self.dispatch(Msg::ToggleLocalTracking),
                KeyInput::Char('r') => self.dispatch(Msg::ToggleRemoteTracking),
                KeyInput::Char('q') | KeyInput::Esc => vec![AppAction::Quit],
                _ => vec![],
            },
            DisplayText::Editing(text) => {
                let mut chars: Vec<char> = text.chars().collect();
                let cursor = self.edit_cursor.min(chars.len());

                match key {
                    KeyInput::Char(c) => {
                        chars.insert(cursor, c);
                        self.edit_cursor = cursor.saturating_add(1);
                        self.dispatch(Msg::EditedText(chars.into_iter().collect()))
                    },
                    KeyInput::Backspace => {
                        if cursor == 0 {
                            return vec![];
                        }
                        chars.remove(cursor - 1);
                        self.edit_cursor = cursor - 1;
                        self.dispatch(Msg::EditedText(chars.into_iter().collect()))
                    },
                    KeyInput::Delete => {
                        if cursor >= chars.len() {
                            return vec![];
                        }
                        chars.remove(cursor);
                        self.dispatch(Msg::EditedText(chars.into_iter().collect()))
                    },
                    KeyInput::Left => {
                        self.edit_cursor = cursor.saturating_sub(1);
                        vec![AppAction::Render]
                    },
                    KeyInput::Right => {
                        self.edit_cursor = (cursor + 1).min(chars.len());
                        vec![AppAction::Render]
                    },
                    KeyInput::Home => {
                        self.edit_cursor = 0;
                        vec![AppAction::Render]
                    },
                    KeyInput::End => {
                        self.edit_cursor = chars.len();
                        vec![AppAction::Render]
                    },
                    KeyInput::Enter | KeyInput::Esc => {
                        let text = text.clone();
                        self.dispatch(Msg::SubmitEdit(text))
                    },
                    KeyInput::Interrupt => vec![AppAction::Quit],
                }
            },
        }
    }

    /// Effects of a tracking mode change.
    fn tracking_changed(&mut self, before: TrackingMode, after: TrackingMode) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let leaving_remote = before == TrackingMode::Remote;

        match after {
            TrackingMode::Disabled => {
                actions.push(AppAction::StopMarkers);
                if leaving_remote {
                    actions.push(AppAction::DisconnectPeer);
                }
                self.status_message = Some("Tracking off".into());
            },
            TrackingMode::Local => {
                if leaving_remote {
                    actions.push(AppAction::DisconnectPeer);
                }
                actions.push(self.start_markers(MarkerRoute::Local));
                self.status_message = Some("Local tracking on".into());
            },
            TrackingMode::Remote => {
                actions.push(AppAction::ConnectPeer);
                actions.push(self.start_markers(MarkerRoute::Remote));
                self.status_message = Some("Remote tracking on".into());
            },
        }

        tracing::debug!(?before, ?after, "tracking mode changed");
        actions
    }

    fn start_markers(&self, route: MarkerRoute) -> AppAction {
        AppAction::StartMarkers { text: self.model.text.text().to_owned(), route }
    }

    /// Display string and tracked letters.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Current tracking mode.
    pub fn tracking_mode(&self) -> TrackingMode {
        self.model.letters.mode()
    }

    /// Cursor position in the edit buffer, in characters.
    pub fn edit_cursor(&self) -> usize {
        self.edit_cursor
    }

    /// Echo peer link status.
    pub fn peer_state(&self) -> PeerState {
        self.peer
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
