// player.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner identity. The map only ever compares these for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: usize, name: &str) -> Self {
        Self {
            id: PlayerId(id),
            name: name.to_string(),
        }
    }
}
