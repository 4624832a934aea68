//! Presence registry integration tests
//!
//! Exercises the presence map and point-to-point relay the way the socket
//! layer drives it: register, broadcast snapshots, relay between peers,
//! and reconnect/disconnect churn.

use snapfeed::backend::presence::registry::PresenceRegistry;
use snapfeed::shared::event::ServerEvent;
use tokio::sync::mpsc;
use uuid::Uuid;

fn connect() -> (
    mpsc::UnboundedSender<ServerEvent>,
    mpsc::UnboundedReceiver<ServerEvent>,
) {
    mpsc::unbounded_channel()
}

#[tokio::test]
async fn test_connect_relay_disconnect_flow() {
    let registry = PresenceRegistry::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let chat = Uuid::new_v4();

    // Alice connects
    let (alice_tx, mut alice_rx) = connect();
    let alice_conn = registry.register(alice, alice_tx);
    registry.broadcast_snapshot();

    match alice_rx.recv().await.unwrap() {
        ServerEvent::OnlineUsers { users } => assert_eq!(users, vec![alice]),
        other => panic!("Expected OnlineUsers, got {:?}", other),
    }

    // Bob connects; both see a two-user snapshot
    let (bob_tx, mut bob_rx) = connect();
    let bob_conn = registry.register(bob, bob_tx);
    registry.broadcast_snapshot();

    for rx in [&mut alice_rx, &mut bob_rx] {
        match rx.recv().await.unwrap() {
            ServerEvent::OnlineUsers { users } => {
                assert_eq!(users.len(), 2);
                assert!(users.contains(&alice) && users.contains(&bob));
            }
            other => panic!("Expected OnlineUsers, got {:?}", other),
        }
    }

    // Alice relays a message to Bob
    assert!(registry.send_to(bob, ServerEvent::message(alice, chat, "hi bob".to_string())));
    match bob_rx.recv().await.unwrap() {
        ServerEvent::Message {
            sender_id, body, ..
        } => {
            assert_eq!(sender_id, alice);
            assert_eq!(body, "hi bob");
        }
        other => panic!("Expected Message, got {:?}", other),
    }

    // Bob disconnects; Alice sees the shrunken snapshot
    assert!(registry.unregister(bob, bob_conn));
    registry.broadcast_snapshot();
    match alice_rx.recv().await.unwrap() {
        ServerEvent::OnlineUsers { users } => assert_eq!(users, vec![alice]),
        other => panic!("Expected OnlineUsers, got {:?}", other),
    }

    // Relaying to Bob now drops the message
    assert!(!registry.send_to(bob, ServerEvent::message(alice, chat, "gone".to_string())));

    assert!(registry.unregister(alice, alice_conn));
    assert_eq!(registry.online_count(), 0);
}

#[tokio::test]
async fn test_reconnect_churn_keeps_single_presence_entry() {
    let registry = PresenceRegistry::new();
    let user = Uuid::new_v4();

    // First connection, then a reconnect before the old socket closes
    let (old_tx, mut old_rx) = connect();
    let old_conn = registry.register(user, old_tx);

    let (new_tx, mut new_rx) = connect();
    let _new_conn = registry.register(user, new_tx);

    assert_eq!(registry.online_users(), vec![user]);

    // Relayed traffic goes to the new connection only
    let chat = Uuid::new_v4();
    assert!(registry.send_to(user, ServerEvent::message(Uuid::new_v4(), chat, "x".to_string())));
    assert!(new_rx.try_recv().is_ok());
    assert!(old_rx.try_recv().is_err());

    // The old socket's delayed disconnect must not knock the user offline
    assert!(!registry.unregister(user, old_conn));
    assert!(registry.is_online(user));
}

#[tokio::test]
async fn test_concurrent_registrations() {
    let registry = PresenceRegistry::new();

    let mut handles = Vec::new();
    for _ in 0..32 {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            let user = Uuid::new_v4();
            let (tx, _rx) = connect();
            let conn = registry.register(user, tx);
            registry.broadcast_snapshot();
            (user, conn)
        }));
    }

    let mut sessions = Vec::new();
    for handle in handles {
        sessions.push(handle.await.unwrap());
    }

    assert_eq!(registry.online_count(), 32);

    for (user, conn) in sessions {
        assert!(registry.unregister(user, conn));
    }
    assert_eq!(registry.online_count(), 0);
}
