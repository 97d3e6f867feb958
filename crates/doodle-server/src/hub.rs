//! Fan-out hub shared by all relay sessions.

use axum::extract::ws::Message;
use dashmap::DashSet;
use tokio::sync::broadcast;
use uuid::Uuid;

/// A frame published by one peer.
#[derive(Debug, Clone)]
pub struct Frame {
    pub from: Uuid,
    pub message: Message,
}

/// One broadcast channel for every connected peer.
///
/// Every session receives every frame, including its own; sessions skip the
/// frames they published. Frames are never inspected.
pub struct Hub {
    tx: broadcast::Sender<Frame>,
    peers: DashSet<Uuid>,
}

impl Hub {
    /// `capacity` frames are buffered per peer before a slow peer starts lagging.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            peers: DashSet::new(),
        }
    }

    /// Register a peer. The receiver is subscribed before the peer is counted,
    /// so anything published after `join` returns reaches it.
    pub fn join(&self) -> (Uuid, broadcast::Receiver<Frame>) {
        let rx = self.tx.subscribe();
        let id = Uuid::new_v4();
        self.peers.insert(id);
        (id, rx)
    }

    pub fn leave(&self, id: Uuid) {
        self.peers.remove(&id);
    }

    /// Publish a frame to every session. Returns the number of sessions it was queued for.
    pub fn publish(&self, from: Uuid, message: Message) -> usize {
        self.tx.send(Frame { from, message }).unwrap_or(0)
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }
}
