//! In-process echo peer.
//!
//! Stands in for the remote server: frames flow through mpsc channels and
//! are sent back unchanged after a configurable latency. The peer decides
//! what gets echoed, so malformed frames are dropped rather than reflected.

use std::{collections::VecDeque, time::Duration};

use timeflies_core::WireMessage;
use tokio::{sync::mpsc, time::Instant};

use crate::LinkError;

/// Capacity of each direction of the link.
const LINK_CAPACITY: usize = 256;

/// Echo peer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoConfig {
    /// Delay before each frame is echoed.
    pub latency: Duration,
}

/// Handle to a running echo peer.
pub struct PeerHandle {
    /// Send frames to the peer.
    pub to_peer: mpsc::Sender<Vec<u8>>,
    /// Receive frames from the peer.
    pub from_peer: mpsc::Receiver<Vec<u8>>,
    /// Abort handle to stop the peer task.
    abort_handle: tokio::task::AbortHandle,
}

impl PeerHandle {
    /// Encode and queue `message` without waiting.
    pub fn publish(&self, message: &WireMessage) -> Result<(), LinkError> {
        let frame = message.encode()?;
        self.to_peer.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => LinkError::Congested { kind: message.kind() },
            mpsc::error::TrySendError::Closed(_) => LinkError::Closed,
        })
    }

    /// Stop the peer.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for PeerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn an in-process echo peer.
///
/// Must be called from within a tokio runtime. The peer runs until stopped,
/// dropped, or until the sending side of the link is closed. Each frame is
/// due `latency` after it arrived, independent of the frames queued ahead of
/// it, and frames are echoed in arrival order.
pub fn spawn_echo_peer(config: EchoConfig) -> PeerHandle {
    let (client_tx, mut peer_rx) = mpsc::channel::<Vec<u8>>(LINK_CAPACITY);
    let (peer_tx, client_rx) = mpsc::channel::<Vec<u8>>(LINK_CAPACITY);

    let handle = tokio::spawn(async move {
        let mut in_flight: VecDeque<(Instant, Vec<u8>)> = VecDeque::new();
        let mut inbound_open = true;

        while inbound_open || !in_flight.is_empty() {
            let next_due = in_flight.front().map(|(due, _)| *due);

            tokio::select! {
                frame = peer_rx.recv(), if inbound_open => match frame {
                    Some(frame) => {
                        if let Some(due) = admit(&frame, config.latency) {
                            in_flight.push_back((due, frame));
                        }
                    },
                    None => inbound_open = false,
                },

                () = sleep_until_due(next_due) => {
                    if let Some((_, frame)) = in_flight.pop_front() {
                        if peer_tx.send(frame).await.is_err() {
                            break;
                        }
                    }
                },
            }
        }
        tracing::debug!("echo peer stopped");
    });

    PeerHandle { to_peer: client_tx, from_peer: client_rx, abort_handle: handle.abort_handle() }
}

/// Deadline for an inbound frame. `None` if the frame is malformed.
fn admit(frame: &[u8], latency: Duration) -> Option<Instant> {
    match WireMessage::decode(frame) {
        Ok(message) => {
            tracing::trace!(kind = message.kind(), len = frame.len(), "echoing frame");
            Some(Instant::now() + latency)
        },
        Err(e) => {
            tracing::warn!(error = %e, "echo peer dropped malformed frame");
            None
        },
    }
}

/// Sleep until the oldest frame is due. Pending forever with nothing queued.
async fn sleep_until_due(due: Option<Instant>) {
    match due {
        Some(due) => tokio::time::sleep_until(due).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use timeflies_core::{Marker, Position};

    use super::*;

    /// Timer wheel rounding under the paused clock.
    const TIMER_SLACK: Duration = Duration::from_millis(5);

    #[tokio::test]
    async fn echoes_published_message() {
        let mut peer = spawn_echo_peer(EchoConfig::default());
        let message = WireMessage::TextChanged { text: "time flies".into() };

        peer.publish(&message).unwrap();
        let frame = peer.from_peer.recv().await.unwrap();

        assert_eq!(WireMessage::decode(&frame).unwrap(), message);
    }

    #[tokio::test]
    async fn drops_malformed_frames() {
        let mut peer = spawn_echo_peer(EchoConfig::default());
        let message = WireMessage::MarkerObserved {
            index: 1,
            marker: Marker::new('i', Position::new(10, 20)),
        };

        peer.to_peer.send(vec![0xff, 0xfe]).await.unwrap();
        peer.publish(&message).unwrap();

        let frame = peer.from_peer.recv().await.unwrap();
        assert_eq!(WireMessage::decode(&frame).unwrap(), message);
    }

    #[tokio::test(start_paused = true)]
    async fn applies_latency() {
        let mut peer = spawn_echo_peer(EchoConfig { latency: Duration::from_millis(250) });
        let start = tokio::time::Instant::now();

        peer.publish(&WireMessage::TextChanged { text: "x".into() }).unwrap();
        let _ = peer.from_peer.recv().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn stopped_peer_closes_link() {
        let mut peer = spawn_echo_peer(EchoConfig::default());
        peer.stop();

        assert!(peer.from_peer.recv().await.is_none());
        assert_eq!(
            peer.publish(&WireMessage::TextChanged { text: "late".into() }),
            Err(LinkError::Closed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn latency_applies_per_frame_not_cumulatively() {
        let latency = Duration::from_millis(100);
        let mut peer = spawn_echo_peer(EchoConfig { latency });
        let start = tokio::time::Instant::now();

        for i in 0..5 {
            peer.publish(&WireMessage::TextChanged { text: i.to_string() }).unwrap();
        }

        for i in 0..5 {
            let frame = peer.from_peer.recv().await.unwrap();
            assert_eq!(WireMessage::decode(&frame).unwrap(), WireMessage::TextChanged {
                text: i.to_string()
            });
        }

        let elapsed = start.elapsed();
        assert!(elapsed >= latency);
        assert!(elapsed < latency * 2, "echoes took {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn later_frames_wait_only_their_own_latency() {
        let latency = Duration::from_millis(100);
        let mut peer = spawn_echo_peer(EchoConfig { latency });
        let start = tokio::time::Instant::now();

        peer.publish(&WireMessage::TextChanged { text: "a".into() }).unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        peer.publish(&WireMessage::TextChanged { text: "b".into() }).unwrap();

        let _ = peer.from_peer.recv().await.unwrap();
        let first = start.elapsed();
        assert!(first >= latency && first < latency + TIMER_SLACK, "first after {first:?}");

        let _ = peer.from_peer.recv().await.unwrap();
        let second = start.elapsed() - Duration::from_millis(40);
        assert!(second >= latency && second < latency + TIMER_SLACK, "second after {second:?}");
    }

    #[tokio::test]
    async fn full_link_reports_congestion() {
        let peer = spawn_echo_peer(EchoConfig { latency: Duration::from_secs(60) });
        let message = WireMessage::TextChanged { text: "x".into() };

        // The peer task has not run yet, so the inbound queue only fills up
        for _ in 0..LINK_CAPACITY {
            peer.publish(&message).unwrap();
        }

        assert_eq!(peer.publish(&message), Err(LinkError::Congested { kind: message.kind() }));
    }
}
