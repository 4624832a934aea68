/**
 * WebSocket Handler
 *
 * Implements the persistent bidirectional channel behind `GET /ws`.
 *
 * # Connection Lifecycle
 *
 * 1. The HTTP request is upgraded to a WebSocket
 * 2. A writer task drains the connection's mpsc channel into the socket
 * 3. The read loop parses client events:
 *    - `add_user` binds the connection in the presence registry and
 *      broadcasts the online snapshot to everyone
 *    - `send_message` forwards the payload to the receiver's connection if
 *      one is live, otherwise drops it
 * 4. On close, read error, or writer death, the binding is removed (guarded
 *    by connection ID) and the snapshot is re-broadcast
 *
 * Events before `add_user` on a connection cannot be attributed to a user
 * and are ignored with a warning.
 */

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::event::{ClientEvent, ServerEvent};

use super::registry::{ConnectionId, PresenceRegistry};

/// WebSocket upgrade handler (GET /ws)
pub async fn handle_socket_upgrade(
    State(registry): State<PresenceRegistry>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// Drive one WebSocket connection until it closes
async fn handle_socket(socket: WebSocket, registry: PresenceRegistry) {
    let (mut sink, mut stream) = socket.split();

    // Per-connection delivery channel, drained by a dedicated writer task.
    // The registry holds the sender; relayed events and snapshots arrive
    // here from any handler thread.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize server event: {:?}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                // Peer is gone; the read loop will observe the close
                break;
            }
        }
    });

    // The user this connection is bound to, once add_user arrives
    let mut session: Option<(Uuid, ConnectionId)> = None;

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                handle_client_event(text.as_str(), &registry, &tx, &mut session);
            }
            Ok(Message::Close(_)) => {
                tracing::debug!("Client sent close frame");
                break;
            }
            // Ping/pong are answered by the protocol layer; binary frames
            // are not part of the wire protocol
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("WebSocket read error: {:?}", e);
                break;
            }
        }
    }

    // Disconnect: unbind (connection-ID guarded) and re-broadcast presence
    if let Some((user_id, conn_id)) = session {
        if registry.unregister(user_id, conn_id) {
            registry.broadcast_snapshot();
        }
    }

    writer.abort();
}

/// Dispatch one parsed client event
fn handle_client_event(
    text: &str,
    registry: &PresenceRegistry,
    tx: &mpsc::UnboundedSender<ServerEvent>,
    session: &mut Option<(Uuid, ConnectionId)>,
) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed client event: {:?}", e);
            return;
        }
    };

    match event {
        ClientEvent::AddUser { user_id } => {
            // Re-binding the same connection to another user unbinds the
            // previous registration first
            if let Some((previous_user, conn_id)) = session.take() {
                if previous_user != user_id {
                    registry.unregister(previous_user, conn_id);
                }
            }

            let conn_id = registry.register(user_id, tx.clone());
            *session = Some((user_id, conn_id));
            registry.broadcast_snapshot();
        }
        ClientEvent::SendMessage {
            receiver_id,
            chat_id,
            body,
        } => {
            let Some((sender_id, _)) = *session else {
                tracing::warn!("send_message before add_user, ignoring");
                return;
            };

            let delivered =
                registry.send_to(receiver_id, ServerEvent::message(sender_id, chat_id, body));

            if !delivered {
                // Best effort: the receiver is offline, the message is
                // dropped here (the REST store is the durable path)
                tracing::debug!(
                    "Receiver {} offline, dropping relayed message from {}",
                    receiver_id,
                    sender_id
                );
            }
        }
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
    fn test_add_user_binds_and_broadcasts() {
        let registry = PresenceRegistry::new();
        let (tx, mut rx) = channel();
        let mut session = None;
        let user = Uuid::new_v4();

        let event = serde_json::to_string(&ClientEvent::AddUser { user_id: user }).unwrap();
        handle_client_event(&event, &registry, &tx, &mut session);

        assert!(session.is_some());
        assert!(registry.is_online(user));

        // The registering connection receives the snapshot too
        match rx.try_recv().unwrap() {
            ServerEvent::OnlineUsers { users } => assert_eq!(users, vec![user]),
            other => panic!("Expected OnlineUsers, got {:?}", other),
        }
    }

    #[test]
    fn test_send_message_relays_to_receiver() {
        let registry = PresenceRegistry::new();
        let sender_user = Uuid::new_v4();
        let receiver_user = Uuid::new_v4();
        let chat_id = Uuid::new_v4();

        let (sender_tx, _sender_rx) = channel();
        let (receiver_tx, mut receiver_rx) = channel();

        let sender_conn = registry.register(sender_user, sender_tx.clone());
        registry.register(receiver_user, receiver_tx);

        let mut session = Some((sender_user, sender_conn));
        let event = serde_json::to_string(&ClientEvent::SendMessage {
            receiver_id: receiver_user,
            chat_id,
            body: "hello there".to_string(),
        })
        .unwrap();
        handle_client_event(&event, &registry, &sender_tx, &mut session);

        match receiver_rx.try_recv().unwrap() {
            ServerEvent::Message {
                sender_id,
                chat_id: got_chat,
                body,
                ..
            } => {
                assert_eq!(sender_id, sender_user);
                assert_eq!(got_chat, chat_id);
                assert_eq!(body, "hello there");
            }
            other => panic!("Expected Message, got {:?}", other),
        }
    }

    #[test]
    fn test_send_message_without_session_is_ignored() {
        let registry = PresenceRegistry::new();
        let receiver_user = Uuid::new_v4();
        let (receiver_tx, mut receiver_rx) = channel();
        registry.register(receiver_user, receiver_tx);

        let (tx, _rx) = channel();
        let mut session = None;

        let event = serde_json::to_string(&ClientEvent::SendMessage {
            receiver_id: receiver_user,
            chat_id: Uuid::new_v4(),
            body: "spoofed".to_string(),
        })
        .unwrap();
        handle_client_event(&event, &registry, &tx, &mut session);

        assert!(receiver_rx.try_recv().is_err());
    }

    #[test]
    fn test_send_message_to_offline_receiver_is_dropped() {
        let registry = PresenceRegistry::new();
        let sender_user = Uuid::new_v4();
        let (tx, mut rx) = channel();
        let conn = registry.register(sender_user, tx.clone());
        let _ = rx.try_recv(); // ignore anything pending

        let mut session = Some((sender_user, conn));
        let event = serde_json::to_string(&ClientEvent::SendMessage {
            receiver_id: Uuid::new_v4(),
            chat_id: Uuid::new_v4(),
            body: "into the void".to_string(),
        })
        .unwrap();

        // Must not panic, must not echo anything back to the sender
        handle_client_event(&event, &registry, &tx, &mut session);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_rebind_to_other_user_releases_previous() {
        let registry = PresenceRegistry::new();
        let (tx, _rx) = channel();
        let mut session = None;

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let add_first = serde_json::to_string(&ClientEvent::AddUser { user_id: first }).unwrap();
        handle_client_event(&add_first, &registry, &tx, &mut session);

        let add_second = serde_json::to_string(&ClientEvent::AddUser { user_id: second }).unwrap();
        handle_client_event(&add_second, &registry, &tx, &mut session);

        assert!(!registry.is_online(first));
        assert!(registry.is_online(second));
        assert_eq!(session.map(|(user, _)| user), Some(second));
    }

    #[test]
    fn test_malformed_event_is_ignored() {
        let registry = PresenceRegistry::new();
        let (tx, _rx) = channel();
        let mut session = None;

        handle_client_event("{not json", &registry, &tx, &mut session);
        handle_client_event(r#"{"type":"unknown"}"#, &registry, &tx, &mut session);

        assert!(session.is_none());
        assert_eq!(registry.online_count(), 0);
    }
}
