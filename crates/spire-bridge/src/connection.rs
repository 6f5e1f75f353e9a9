//! Connection manager and command ingestion
//!
//! One inbound peer at a time. The accept loop swaps the active connection
//! under a short exclusive lock; the superseded peer's tasks are aborted,
//! which force-closes its socket. Each connection runs two background
//! tasks: a reader that decodes frames into commands and feeds the shared
//! queue, and a writer that frames outbound snapshots. The tick thread's
//! `send` only pushes onto the writer's channel and never blocks on I/O.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use spire_rl_core::{frame, Command};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::queue::CommandQueue;

type ActiveSlot = Arc<Mutex<Option<ActiveConnection>>>;

/// Handles for the currently active peer
struct ActiveConnection {
    id: u64,
    peer: SocketAddr,
    outbound: mpsc::UnboundedSender<Vec<u8>>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Drop for ActiveConnection {
    fn drop(&mut self) {
        // Aborting drops the socket halves, which unblocks and closes
        // everything tied to this peer.
        self.reader.abort();
        self.writer.abort();
    }
}

/// Owns the active-connection slot shared by the accept loop, the reader
/// and writer tasks, and the tick thread's send path
#[derive(Clone)]
pub struct ConnectionManager {
    active: ActiveSlot,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            active: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.active.lock().expect("connection slot poisoned").is_some()
    }

    /// Hand one payload to the active peer's writer task
    ///
    /// No-op when no peer is attached; the bridge is designed to run with
    /// zero consumers. A dead writer clears the slot so a half-dead peer is
    /// never left referenced.
    pub fn send(&self, payload: Vec<u8>) {
        let mut guard = self.active.lock().expect("connection slot poisoned");
        if let Some(conn) = guard.as_ref() {
            if conn.outbound.send(payload).is_err() {
                warn!(peer = %conn.peer, "send failed, dropping connection");
                *guard = None;
            }
        }
    }

    /// Run the accept loop forever, swapping the active peer on each accept
    pub async fn accept_loop(
        &self,
        listener: TcpListener,
        queue: Arc<CommandQueue>,
        max_frame_len: usize,
    ) {
        let mut next_id: u64 = 0;
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("accept failed: {e}");
                    continue;
                }
            };
            next_id += 1;
            let id = next_id;
            if let Err(e) = stream.set_nodelay(true) {
                debug!(%peer, "failed to set TCP_NODELAY: {e}");
            }
            info!(%peer, "peer connected");

            let (read_half, write_half) = stream.into_split();
            let (outbound, outbound_rx) = mpsc::unbounded_channel();
            let reader = tokio::spawn(reader_task(
                read_half,
                Arc::clone(&queue),
                Arc::clone(&self.active),
                id,
                max_frame_len,
            ));
            let writer = tokio::spawn(writer_task(
                write_half,
                outbound_rx,
                Arc::clone(&self.active),
                id,
            ));

            let previous = self
                .active
                .lock()
                .expect("connection slot poisoned")
                .replace(ActiveConnection {
                    id,
                    peer,
                    outbound,
                    reader,
                    writer,
                });
            if let Some(previous) = previous {
                info!(peer = %previous.peer, "replaced by new peer");
            }
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Command ingestion: decode frames into commands and feed the queue
///
/// Protocol errors discard the frame and keep the peer; I/O errors are
/// fatal for this connection only.
async fn reader_task(
    mut read_half: OwnedReadHalf,
    queue: Arc<CommandQueue>,
    slot: ActiveSlot,
    id: u64,
    max_frame_len: usize,
) {
    loop {
        match frame::read_frame(&mut read_half, max_frame_len).await {
            Ok(payload) => match Command::decode(&payload) {
                Ok(Command::Unknown(kind)) => {
                    warn!(kind, "unknown command discriminant, ignored");
                }
                Ok(command) => {
                    debug!(?command, "enqueued command");
                    queue.push(command);
                }
                Err(e) => {
                    warn!("malformed command payload, frame discarded: {e}");
                }
            },
            Err(e) => {
                debug!("connection read failed: {e}");
                break;
            }
        }
    }
    clear_if_current(&slot, id);
}

/// Frame and write outbound payloads until the channel or socket dies
async fn writer_task(
    mut write_half: OwnedWriteHalf,
    mut outbound_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    slot: ActiveSlot,
    id: u64,
) {
    while let Some(payload) = outbound_rx.recv().await {
        if let Err(e) = frame::write_frame(&mut write_half, &payload).await {
            warn!("connection write failed: {e}");
            clear_if_current(&slot, id);
            return;
        }
    }
}

/// Clear the slot if it still holds this connection
fn clear_if_current(slot: &ActiveSlot, id: u64) {
    let taken = {
        let mut guard = slot.lock().expect("connection slot poisoned");
        match guard.as_ref() {
            Some(conn) if conn.id == id => guard.take(),
            _ => None,
        }
    };
    if let Some(conn) = taken {
        info!(peer = %conn.peer, "peer disconnected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spire_rl_core::Snapshot;
    use std::time::Duration;
    use tokio::net::TcpStream;
    use tokio::time::sleep;

    const MAX: usize = 1024 * 1024;

    async fn start_manager() -> (ConnectionManager, Arc<CommandQueue>, SocketAddr) {
        let manager = ConnectionManager::new();
        let queue = Arc::new(CommandQueue::new());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let loop_manager = manager.clone();
        let loop_queue = Arc::clone(&queue);
        tokio::spawn(async move {
            loop_manager.accept_loop(listener, loop_queue, MAX).await;
        });
        (manager, queue, addr)
    }

    async fn wait_until(mut check: impl FnMut() -> bool) {
        for _ in 0..200 {
            if check() {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached within 2s");
    }

    #[tokio::test]
    async fn commands_flow_into_the_queue() {
        let (manager, queue, addr) = start_manager().await;
        let mut peer = TcpStream::connect(addr).await.unwrap();
        wait_until(|| manager.is_connected()).await;

        let payload = Command::EndTurn.encode().unwrap();
        frame::write_frame(&mut peer, &payload).await.unwrap();
        wait_until(|| !queue.is_empty()).await;
        assert_eq!(queue.pop(), Some(Command::EndTurn));
    }

    #[tokio::test]
    async fn malformed_payload_keeps_the_connection() {
        let (manager, queue, addr) = start_manager().await;
        let mut peer = TcpStream::connect(addr).await.unwrap();
        wait_until(|| manager.is_connected()).await;

        frame::write_frame(&mut peer, b"{ not json").await.unwrap();
        let payload = Command::Reset.encode().unwrap();
        frame::write_frame(&mut peer, &payload).await.unwrap();

        wait_until(|| !queue.is_empty()).await;
        assert_eq!(queue.pop(), Some(Command::Reset));
        assert!(manager.is_connected());
    }

    #[tokio::test]
    async fn unknown_discriminant_is_never_enqueued() {
        let (manager, queue, addr) = start_manager().await;
        let mut peer = TcpStream::connect(addr).await.unwrap();
        wait_until(|| manager.is_connected()).await;

        frame::write_frame(&mut peer, br#"{"action_type":"WARP"}"#)
            .await
            .unwrap();
        let payload = Command::SkipReward.encode().unwrap();
        frame::write_frame(&mut peer, &payload).await.unwrap();

        wait_until(|| !queue.is_empty()).await;
        assert_eq!(queue.pop(), Some(Command::SkipReward));
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn new_peer_supersedes_the_old_one() {
        let (manager, queue, addr) = start_manager().await;
        let mut first = TcpStream::connect(addr).await.unwrap();
        wait_until(|| manager.is_connected()).await;

        let mut second = TcpStream::connect(addr).await.unwrap();
        // The first peer's socket is force-closed: its next read ends.
        let result = frame::read_frame(&mut first, MAX).await;
        assert!(result.is_err());

        // The second peer is live: it receives what the bridge sends.
        let snapshot = Snapshot::default();
        manager.send(snapshot.encode().unwrap());
        let payload = frame::read_frame(&mut second, MAX).await.unwrap();
        assert!(Snapshot::decode(&payload).is_ok());

        // And its commands still arrive.
        let payload = Command::EndTurn.encode().unwrap();
        frame::write_frame(&mut second, &payload).await.unwrap();
        wait_until(|| !queue.is_empty()).await;
    }

    #[tokio::test]
    async fn send_without_peer_is_a_noop() {
        let (manager, _queue, _addr) = start_manager().await;
        assert!(!manager.is_connected());
        manager.send(b"dropped on the floor".to_vec());
        assert!(!manager.is_connected());
    }

    #[tokio::test]
    async fn peer_disconnect_clears_the_slot() {
        let (manager, _queue, addr) = start_manager().await;
        let peer = TcpStream::connect(addr).await.unwrap();
        wait_until(|| manager.is_connected()).await;
        drop(peer);
        wait_until(|| !manager.is_connected()).await;
    }
}
