//! Marker stream generator.
//!
//! A [`MarkerStream`] makes every character of a string trail the pointer:
//! each pointer sample is re-emitted for character `i` once `stagger × i` has
//! elapsed since the sample was taken.
//!
//! # Cancellation
//!
//! One task per character runs inside a [`JoinSet`]. Dropping the stream
//! aborts every task, so pending delays never fire after tracking is turned
//! off or the stream is replaced. Each stream owns its output channel, which
//! keeps samples of a replaced stream out of its successor.

use std::time::Duration;

use timeflies_core::{Marker, Position, env::Environment};
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinSet,
};

/// Capacity of the pointer broadcast channel.
const POINTER_CAPACITY: usize = 256;

/// Capacity of a stream's output channel.
const OUTPUT_CAPACITY: usize = 256;

/// Where samples of a marker stream are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRoute {
    /// Applied directly to the local model.
    Local,
    /// Published to the echo peer.
    Remote,
}

/// A pointer position and when it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSample<I> {
    /// Pointer position in view units.
    pub position: Position,
    /// Observation time.
    pub at: I,
}

/// A marker emitted by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerEvent {
    /// Character index.
    pub index: usize,
    /// Character and its delayed position.
    pub marker: Marker,
}

/// Fan-out of pointer samples to marker streams.
#[derive(Debug, Clone)]
pub struct PointerFeed<I> {
    tx: broadcast::Sender<PointerSample<I>>,
}

impl<I: Clone + Send + 'static> PointerFeed<I> {
    /// Create a feed with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(POINTER_CAPACITY);
        Self { tx }
    }

    /// Publish a sample to every current subscriber.
    pub fn publish(&self, sample: PointerSample<I>) {
        // No subscribers while tracking is disabled
        let _ = self.tx.send(sample);
    }

    /// Receive samples published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PointerSample<I>> {
        self.tx.subscribe()
    }
}

impl<I: Clone + Send + 'static> Default for PointerFeed<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Running marker stream for one string.
#[derive(Debug)]
pub struct MarkerStream {
    route: MarkerRoute,
    text: String,
    events: mpsc::Receiver<MarkerEvent>,
    tasks: JoinSet<()>,
}

impl MarkerStream {
    /// Spawn one trailing task per character of `text`.
    ///
    /// Must be called from within a tokio runtime. Tasks subscribe to
    /// `pointer` before this returns, so no sample published afterwards is
    /// missed.
    pub fn spawn<E: Environment>(
        env: &E,
        text: &str,
        pointer: &PointerFeed<E::Instant>,
        stagger: Duration,
        route: MarkerRoute,
    ) -> Self {
        let (tx, events) = mpsc::channel(OUTPUT_CAPACITY);
        let mut tasks = JoinSet::new();

        for (index, ch) in text.chars().enumerate() {
            let delay = stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            tasks.spawn(trail_pointer(
                env.clone(),
                index,
                ch,
                delay,
                pointer.subscribe(),
                tx.clone(),
            ));
        }

        tracing::debug!(?route, letters = tasks.len(), "marker stream started");
        Self { route, text: text.to_owned(), events, tasks }
    }

    /// Destination of this stream's samples.
    pub fn route(&self) -> MarkerRoute {
        self.route
    }

    /// Text this stream tracks.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Next emitted marker. `None` once every character task has finished.
    ///
    /// Cancel-safe.
    pub async fn next(&mut self) -> Option<MarkerEvent> {
        self.events.recv().await
    }
}

impl Drop for MarkerStream {
    fn drop(&mut self) {
        tracing::debug!(route = ?self.route, "marker stream cancelled");
        self.tasks.abort_all();
    }
}

/// Re-emit every pointer sample for one character after its delay.
async fn trail_pointer<E: Environment>(
    env: E,
    index: usize,
    ch: char,
    delay: Duration,
    mut samples: broadcast::Receiver<PointerSample<E::Instant>>,
    sink: mpsc::Sender<MarkerEvent>,
) {
    loop {
        let sample = match samples.recv().await {
            Ok(sample) => sample,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::trace!(index, skipped, "letter lagged behind pointer");
                continue;
            },
            Err(broadcast::error::RecvError::Closed) => break,
        };

        env.sleep_until(sample.at + delay).await;

        let event = MarkerEvent { index, marker: Marker::new(ch, sample.position) };
        if sink.send(event).await.is_err() {
            break;
        }
    }
}
