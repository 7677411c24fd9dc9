//! Broadcast delivery to connected clients.

use tungstenite::protocol::Message;

use super::WsActor;

impl WsActor {
    /// Send a message to every connected client, at most once each.
    ///
    /// Clients that fail to take the message are dropped, not retried; a
    /// browser that missed a reload reconnects on its next page load.
    pub(super) fn broadcast(&self, msg: Message) {
        let mut clients = self.clients.lock();
        let count = clients.len();

        if count == 0 {
            crate::debug!("ws"; "no clients connected");
            return;
        }

        clients.retain_mut(|ws| match ws.send(msg.clone()) {
            Ok(()) => true,
            Err(e) => {
                crate::debug!("ws"; "dropping client: {e}");
                false
            }
        });

        crate::debug!("ws"; "broadcast to {count} clients");
    }
}
