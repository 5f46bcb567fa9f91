//! In-process presence registry for the real-time side-channel.
//!
//! Mutation discipline: every write goes through the connection-event path
//! (connect, disconnect, join, leave). REST handlers and emission helpers
//! only read. Call sites touch nothing but this API, so the backing can be
//! replaced by a distributed store without changing them.

use std::collections::HashSet;

use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct PresenceRegistry {
    /// user id -> socket id of the live connection
    connections: DashMap<Uuid, String>,
    /// match id -> user ids currently inside the chat room
    rooms: DashMap<Uuid, HashSet<Uuid>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, user_id: Uuid, socket_id: String) {
        self.connections.insert(user_id, socket_id);
    }

    /// Drops the connection and sweeps the user out of every room.
    /// Returns the user that was attached to the socket, if any.
    pub fn disconnect(&self, socket_id: &str) -> Option<Uuid> {
        let user_id = self
            .connections
            .iter()
            .find(|entry| entry.value() == socket_id)
            .map(|entry| *entry.key())?;

        self.connections.remove(&user_id);
        for mut room in self.rooms.iter_mut() {
            room.value_mut().remove(&user_id);
        }
        Some(user_id)
    }

    pub fn join_room(&self, match_id: Uuid, user_id: Uuid) {
        self.rooms.entry(match_id).or_default().insert(user_id);
    }

    pub fn leave_room(&self, match_id: Uuid, user_id: Uuid) {
        if let Some(mut members) = self.rooms.get_mut(&match_id) {
            members.remove(&user_id);
        }
    }

    pub fn is_online(&self, user_id: Uuid) -> bool {
        self.connections.contains_key(&user_id)
    }

    pub fn room_members(&self, match_id: Uuid) -> Vec<Uuid> {
        self.rooms
            .get(&match_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_join_disconnect_lifecycle() {
        let presence = PresenceRegistry::new();
        let user = Uuid::now_v7();
        let match_id = Uuid::now_v7();

        presence.connect(user, "sid-1".into());
        assert!(presence.is_online(user));

        presence.join_room(match_id, user);
        assert_eq!(presence.room_members(match_id), vec![user]);

        let dropped = presence.disconnect("sid-1");
        assert_eq!(dropped, Some(user));
        assert!(!presence.is_online(user));
        assert!(presence.room_members(match_id).is_empty());
    }

    #[test]
    fn leave_room_only_affects_that_room() {
        let presence = PresenceRegistry::new();
        let user = Uuid::now_v7();
        let room_a = Uuid::now_v7();
        let room_b = Uuid::now_v7();

        presence.connect(user, "sid-1".into());
        presence.join_room(room_a, user);
        presence.join_room(room_b, user);

        presence.leave_room(room_a, user);
        assert!(presence.room_members(room_a).is_empty());
        assert_eq!(presence.room_members(room_b), vec![user]);
        assert!(presence.is_online(user));
    }

    #[test]
    fn disconnect_of_unknown_socket_is_a_no_op() {
        let presence = PresenceRegistry::new();
        assert_eq!(presence.disconnect("ghost"), None);
    }
}
