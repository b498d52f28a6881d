//! Dungeon floors - a chain of rooms from the start to the exit

use crate::constants::{BASE_ROOM_COUNT, BATTLE_ROOM_THRESHOLD, SHOP_ROOM_THRESHOLD};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id of the room every floor starts in
pub const START_ROOM_ID: &str = "start";
/// Id of the final boss room appended after the chain
pub const EXIT_ROOM_ID: &str = "exit";

/// Floor navigation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("No room with id '{0}'")]
    UnknownRoom(String),
    #[error("Room '{from}' is not connected to '{to}'")]
    NotConnected { from: String, to: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Start,
    Battle,
    Shop,
    Treasure,
    Boss,
    /// Non-combat way out; generated floors end on a boss room instead
    Exit,
}

impl RoomType {
    /// Whether entering the room starts a fight
    pub fn has_battle(self) -> bool {
        matches!(self, RoomType::Battle | RoomType::Boss)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RoomType,
    /// Layout position, for display only
    pub x: i32,
    pub y: i32,
    /// Ids of adjacent rooms; every edge is recorded on both ends
    pub connections: Vec<String>,
    pub visited: bool,
    pub cleared: bool,
}

impl Room {
    fn new(id: String, kind: RoomType, x: i32, y: i32) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            connections: Vec::new(),
            visited: false,
            cleared: false,
        }
    }

    pub fn is_connected_to(&self, id: &str) -> bool {
        self.connections.iter().any(|c| c == id)
    }
}

/// One dungeon floor. `current_room_id` always names a room on the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub level: u32,
    pub rooms: Vec<Room>,
    pub current_room_id: String,
}

fn roll_room_type(rng: &mut impl Rng) -> RoomType {
    let roll: f64 = rng.gen();
    if roll < BATTLE_ROOM_THRESHOLD {
        RoomType::Battle
    } else if roll < SHOP_ROOM_THRESHOLD {
        RoomType::Shop
    } else {
        RoomType::Treasure
    }
}

fn link(rooms: &mut [Room], a: usize, b: usize) {
    let a_id = rooms[a].id.clone();
    let b_id = rooms[b].id.clone();
    rooms[a].connections.push(b_id);
    rooms[b].connections.push(a_id);
}

/// Generate floor `level`.
///
/// The floor is a path: `start`, then `room_1 .. room_{n-1}` for
/// `n = 5 + level`, with the last of those forced to `Boss`, then `exit`,
/// which is a second boss room.
/// Other rooms are 70% battle, 15% shop, 15% treasure.
pub fn generate_floor(level: u32, rng: &mut impl Rng) -> Floor {
    let room_count = BASE_ROOM_COUNT + level as usize;
    let mut rooms = Vec::with_capacity(room_count + 1);

    let mut start = Room::new(START_ROOM_ID.to_string(), RoomType::Start, 0, 0);
    start.visited = true;
    start.cleared = true;
    rooms.push(start);

    let (mut x, mut y) = (1, 0);
    for i in 1..room_count {
        let kind = if i == room_count - 1 {
            RoomType::Boss
        } else {
            roll_room_type(rng)
        };
        rooms.push(Room::new(format!("room_{}", i), kind, x, y));
        link(&mut rooms, i - 1, i);

        if rng.gen_bool(0.5) {
            x += 1;
        } else {
            y += if rng.gen_bool(0.5) { 1 } else { -1 };
        }
    }

    rooms.push(Room::new(EXIT_ROOM_ID.to_string(), RoomType::Boss, x + 1, y));
    let last = rooms.len() - 1;
    link(&mut rooms, last - 1, last);

    tracing::info!(level, rooms = rooms.len(), "floor generated");

    Floor {
        level,
        rooms,
        current_room_id: START_ROOM_ID.to_string(),
    }
}

impl Floor {
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.room(&self.current_room_id)
    }

    /// Rooms connected to the current one
    pub fn available_rooms(&self) -> Vec<&Room> {
        self.current_room()
            .map(|current| {
                current
                    .connections
                    .iter()
                    .filter_map(|id| self.room(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Move along a connection and mark the target visited
    pub fn move_to_room(&mut self, id: &str) -> Result<(), MapError> {
        if self.room(id).is_none() {
            return Err(MapError::UnknownRoom(id.to_string()));
        }
        let current = self
            .current_room()
            .ok_or_else(|| MapError::UnknownRoom(self.current_room_id.clone()))?;
        if !current.is_connected_to(id) {
            return Err(MapError::NotConnected {
                from: current.id.clone(),
                to: id.to_string(),
            });
        }

        if let Some(room) = self.room_mut(id) {
            room.visited = true;
        }
        self.current_room_id = id.to_string();
        tracing::debug!(room = %id, "moved");
        Ok(())
    }

    pub fn clear_room(&mut self, id: &str) -> Result<(), MapError> {
        let room = self
            .room_mut(id)
            .ok_or_else(|| MapError::UnknownRoom(id.to_string()))?;
        room.cleared = true;
        Ok(())
    }

    /// Whether the player reached the exit room
    pub fn is_complete(&self) -> bool {
        self.current_room_id == EXIT_ROOM_ID
    }
}
