//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`MarkerStream`]: the active letter-trailing stream, if any
//! - [`PeerHandle`]: the echo peer link, held only in remote mode
//! - [`Driver`]: frontend-specific I/O

use timeflies_core::{WireMessage, env::Environment};

use crate::{
    App, AppAction, AppEvent, Driver, LinkError, MarkerRoute, MarkerStream, PointerFeed,
    RuntimeConfig,
    markers::{MarkerEvent, PointerSample},
    peer::{self, PeerHandle},
    view,
};

/// Generic runtime that orchestrates App, marker streams, the peer and a
/// Driver.
///
/// # Type Parameters
///
/// - `D`: Frontend I/O driver
/// - `E`: Environment providing the clock for pointer samples and delays
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    env: E,
    app: App,
    config: RuntimeConfig,
    pointer: PointerFeed<E::Instant>,
    markers: Option<MarkerStream>,
    peer: Option<PeerHandle>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a runtime showing `text` with tracking disabled.
    pub fn new(driver: D, env: E, text: impl Into<String>, config: RuntimeConfig) -> Self {
        Self {
            driver,
            env,
            app: App::new(text),
            config,
            pointer: PointerFeed::new(),
            markers: None,
            peer: None,
        }
    }

    /// Run the main event loop until the app quits or input closes.
    ///
    /// Marker streams and the peer link are torn down before returning,
    /// whether the loop ended normally or with an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to read input or render.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = match self.render() {
            Ok(()) => self.event_loop().await,
            Err(e) => Err(e),
        };

        self.markers = None;
        self.peer = None;
        self.driver.stop();
        tracing::debug!("runtime stopped");
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        loop {
            let should_quit = tokio::select! {
                // Driver input
                event = self.driver.poll_event() => match event? {
                    Some(event) => self.handle_event(event)?,
                    None => true,
                },

                // Marker samples
                sampled = next_marker(&mut self.markers) => match sampled {
                    Some((route, MarkerEvent { index, marker })) => {
                        let actions = self.app.handle(AppEvent::MarkerSampled { route, index, marker });
                        self.process_actions(actions)?
                    },
                    None => {
                        self.markers = None;
                        false
                    },
                },

                // Echoed frames
                frame = next_frame(&mut self.peer) => match frame {
                    Some(frame) => self.handle_frame(&frame)?,
                    None => self.peer_lost()?,
                },
            };

            if should_quit {
                return Ok(());
            }
        }
    }

    /// Handle an event and return whether to quit.
    fn handle_event(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        if let AppEvent::PointerMoved(position) = event {
            self.pointer.publish(PointerSample { position, at: self.env.now() });
        }

        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// Handle a frame echoed by the peer.
    fn handle_frame(&mut self, frame: &[u8]) -> Result<bool, D::Error> {
        let event = match WireMessage::decode(frame) {
            Ok(message) => AppEvent::PeerMessage(message),
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable peer frame");
                AppEvent::Error { message: LinkError::from(e).to_string() }
            },
        };

        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// The peer task ended while we still held the link.
    fn peer_lost(&mut self) -> Result<bool, D::Error> {
        tracing::warn!("echo peer link closed");
        self.peer = None;

        let mut actions = self.app.handle(AppEvent::PeerDisconnected);
        actions.extend(self.app.handle(AppEvent::Error { message: LinkError::Closed.to_string() }));
        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit. Actions may produce events which
    /// produce further actions; these are processed iteratively.
    fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.render()?,
                    AppAction::Quit => return Ok(true),
                    AppAction::StartMarkers { text, route } => self.start_markers(&text, route),
                    AppAction::StopMarkers => self.markers = None,
                    AppAction::ConnectPeer => {
                        self.peer = Some(peer::spawn_echo_peer(self.config.echo));
                        tracing::info!(latency = ?self.config.echo.latency, "echo peer connected");
                        pending_actions.extend(self.app.handle(AppEvent::PeerConnected));
                    },
                    AppAction::DisconnectPeer => {
                        if self.peer.take().is_some() {
                            tracing::info!("echo peer disconnected");
                        }
                        pending_actions.extend(self.app.handle(AppEvent::PeerDisconnected));
                    },
                    AppAction::Publish(message) => {
                        if let Err(e) = self.publish(&message) {
                            tracing::warn!(error = %e, kind = message.kind(), "publish failed");
                            pending_actions
                                .extend(self.app.handle(AppEvent::Error { message: e.to_string() }));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Replace the active marker stream.
    fn start_markers(&mut self, text: &str, route: MarkerRoute) {
        // Drop first so the old stream's letters stop before new ones start
        self.markers = None;
        self.markers =
            Some(MarkerStream::spawn(&self.env, text, &self.pointer, self.config.stagger, route));
    }

    /// Fire-and-forget publish on the peer link.
    fn publish(&self, message: &WireMessage) -> Result<(), LinkError> {
        self.peer.as_ref().ok_or(LinkError::NotConnected)?.publish(message)
    }

    /// Render the current state.
    fn render(&mut self) -> Result<(), D::Error> {
        let view = view::project(&self.app, &self.config.layout);
        self.driver.render(&view)
    }
}

/// Next sample of the active stream. Pending forever without one.
async fn next_marker(markers: &mut Option<MarkerStream>) -> Option<(MarkerRoute, MarkerEvent)> {
    match markers {
        Some(stream) => {
            let route = stream.route();
            stream.next().await.map(|event| (route, event))
        },
        None => std::future::pending().await,
    }
}

/// Next echoed frame. Pending forever without a link.
async fn next_frame(peer: &mut Option<PeerHandle>) -> Option<Vec<u8>> {
    match peer {
        Some(peer) => peer.from_peer.recv().await,
        None => std::future::pending().await,
    }
}
