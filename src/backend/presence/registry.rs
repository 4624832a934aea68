/**
 * Presence Registry
 *
 * The in-memory mapping of logged-in users to live connections. One entry
 * per user: registering again (reconnect) replaces the previous entry, and
 * removal is guarded by the connection ID so a stale connection's
 * disconnect cannot evict a fresh registration.
 *
 * Delivery goes through each connection's unbounded mpsc sender; the
 * socket's writer task drains that channel into the peer. A failed send
 * means the connection's writer is gone, so the entry is evicted on the
 * spot.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::event::ServerEvent;

/// A unique identifier for a single WebSocket connection
pub type ConnectionId = Uuid;

/// A live connection bound to a user
#[derive(Clone, Debug)]
struct Connection {
    conn_id: ConnectionId,
    sender: mpsc::UnboundedSender<ServerEvent>,
}

/// The shared presence registry
///
/// Cheap to clone; all clones share the same map.
#[derive(Clone, Default)]
pub struct PresenceRegistry {
    inner: Arc<Mutex<HashMap<Uuid, Connection>>>,
}

impl PresenceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Bind a connection to a user
    ///
    /// Replaces any previous connection for the same user and returns the
    /// new connection ID. The replaced connection stops receiving relayed
    /// events immediately.
    pub fn register(
        &self,
        user_id: Uuid,
        sender: mpsc::UnboundedSender<ServerEvent>,
    ) -> ConnectionId {
        let conn_id = Uuid::new_v4();
        let replaced = self
            .inner
            .lock()
            .unwrap()
            .insert(user_id, Connection { conn_id, sender });

        match replaced {
            Some(old) => tracing::info!(
                "User {} reconnected: connection {} replaces {}",
                user_id,
                conn_id,
                old.conn_id
            ),
            None => tracing::info!("User {} online on connection {}", user_id, conn_id),
        }

        conn_id
    }

    /// Unbind a departing connection
    ///
    /// Removes the user's entry only if it still points at `conn_id`;
    /// returns whether an entry was removed. A stale connection (already
    /// replaced by a reconnect) is a no-op.
    pub fn unregister(&self, user_id: Uuid, conn_id: ConnectionId) -> bool {
        let mut map = self.inner.lock().unwrap();
        match map.get(&user_id) {
            Some(current) if current.conn_id == conn_id => {
                map.remove(&user_id);
                tracing::info!("User {} offline (connection {})", user_id, conn_id);
                true
            }
            _ => {
                tracing::debug!(
                    "Stale disconnect for user {} (connection {}), keeping current entry",
                    user_id,
                    conn_id
                );
                false
            }
        }
    }

    /// Snapshot of all currently online users
    pub fn online_users(&self) -> Vec<Uuid> {
        self.inner.lock().unwrap().keys().copied().collect()
    }

    /// Whether a user has a live connection
    pub fn is_online(&self, user_id: Uuid) -> bool {
        self.inner.lock().unwrap().contains_key(&user_id)
    }

    /// Number of online users
    pub fn online_count(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Deliver an event to one user, if online
    ///
    /// Returns `true` when the event was handed to the connection's writer.
    /// Returns `false` (and drops the event) when the user is offline; a
    /// dead writer also evicts the entry.
    pub fn send_to(&self, user_id: Uuid, event: ServerEvent) -> bool {
        let mut map = self.inner.lock().unwrap();
        let Some(connection) = map.get(&user_id) else {
            return false;
        };

        if connection.sender.send(event).is_ok() {
            true
        } else {
            // Writer task is gone; the socket cleanup will usually have
            // removed this already, but evict here in case it races
            tracing::debug!("Evicting dead connection for user {}", user_id);
            map.remove(&user_id);
            false
        }
    }

    /// Deliver an event to every live connection
    ///
    /// Returns the number of connections that accepted the event.
    pub fn broadcast(&self, event: ServerEvent) -> usize {
        let senders: Vec<mpsc::UnboundedSender<ServerEvent>> = self
            .inner
            .lock()
            .unwrap()
            .values()
            .map(|c| c.sender.clone())
            .collect();

        senders
            .iter()
            .filter(|sender| sender.send(event.clone()).is_ok())
            .count()
    }

    /// Broadcast the current online-users snapshot to every connection
    ///
    /// Called after every registration and every effective disconnect.
    pub fn broadcast_snapshot(&self) -> usize {
        let snapshot = ServerEvent::online_users(self.online_users());
        let delivered = self.broadcast(snapshot);
        tracing::debug!(
            "Presence snapshot ({} online) delivered to {} connections",
            self.online_count(),
            delivered
        );
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> (
        mpsc::UnboundedSender<ServerEvent>,
        mpsc::UnboundedReceiver<ServerEvent>,
    ) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn test_register_marks_user_online() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let (tx, _rx) = channel();

        registry.register(user, tx);
        assert!(registry.is_online(user));
        assert_eq!(registry.online_users(), vec![user]);
    }

    #[test]
    fn test_unregister_removes_entry() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let (tx, _rx) = channel();

        let conn = registry.register(user, tx);
        assert!(registry.unregister(user, conn));
        assert!(!registry.is_online(user));
        assert_eq!(registry.online_count(), 0);
    }

    #[test]
    fn test_reconnect_replaces_connection() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let (tx1, mut rx1) = channel();
        let (tx2, mut rx2) = channel();

        let _stale = registry.register(user, tx1);
        let _fresh = registry.register(user, tx2);

        // Only the fresh connection receives relayed events
        assert!(registry.send_to(user, ServerEvent::online_users(vec![])));
        assert!(rx2.try_recv().is_ok());
        assert!(rx1.try_recv().is_err());
    }

    #[test]
    fn test_stale_disconnect_keeps_fresh_registration() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();

        let stale = registry.register(user, tx1);
        let _fresh = registry.register(user, tx2);

        // The replaced connection disconnects later; the user stays online
        assert!(!registry.unregister(user, stale));
        assert!(registry.is_online(user));
    }

    #[test]
    fn test_send_to_offline_user_is_dropped() {
        let registry = PresenceRegistry::new();
        let event = ServerEvent::message(Uuid::new_v4(), Uuid::new_v4(), "hi".to_string());
        assert!(!registry.send_to(Uuid::new_v4(), event));
    }

    #[test]
    fn test_send_to_dead_writer_evicts_entry() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let (tx, rx) = channel();
        drop(rx);

        registry.register(user, tx);
        let event = ServerEvent::message(Uuid::new_v4(), Uuid::new_v4(), "hi".to_string());
        assert!(!registry.send_to(user, event));
        assert!(!registry.is_online(user));
    }

    #[test]
    fn test_broadcast_reaches_every_connection() {
        let registry = PresenceRegistry::new();
        let (tx_a, mut rx_a) = channel();
        let (tx_b, mut rx_b) = channel();

        registry.register(Uuid::new_v4(), tx_a);
        registry.register(Uuid::new_v4(), tx_b);

        let delivered = registry.broadcast_snapshot();
        assert_eq!(delivered, 2);

        for rx in [&mut rx_a, &mut rx_b] {
            match rx.try_recv().unwrap() {
                ServerEvent::OnlineUsers { users } => assert_eq!(users.len(), 2),
                other => panic!("Expected OnlineUsers, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_snapshot_has_each_user_once() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();

        registry.register(user, tx1);
        registry.register(user, tx2);

        assert_eq!(registry.online_users(), vec![user]);
    }
}
