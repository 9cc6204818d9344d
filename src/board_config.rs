// board_config.rs
use crate::board::Board;
use crate::error::MapError;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ownership layout for a board, usually loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub players: Vec<PlayerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub id: usize,
    pub name: String,
    pub territories: Vec<PlayerTerritoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTerritoryConfig {
    pub name: String,
    pub armies: i64,
}

impl BoardConfig {
    /// Clears `board` and hands each listed territory to its player. Territories
    /// nobody claims stay unowned. Every entry is checked before the board is
    /// touched, so on error `board` is left as it was.
    pub fn apply(&self, board: &mut Board) -> Result<Vec<Player>, MapError> {
        let mut assigned_territories = HashSet::new();
        let mut assignments = Vec::new();

        for player_config in &self.players {
            for territory_config in &player_config.territories {
                if !assigned_territories.insert(territory_config.name.as_str()) {
                    return Err(MapError::DuplicateAssignment(territory_config.name.clone()));
                }
                board.graph.territory(&territory_config.name)?;
                let armies = u16::try_from(territory_config.armies)
                    .map_err(|_| MapError::InvalidArmyCount(territory_config.armies))?;
                assignments.push((
                    territory_config.name.as_str(),
                    PlayerId(player_config.id),
                    armies,
                ));
            }
        }

        board.reset(true);
        for (name, owner, armies) in assignments {
            let territory = board.graph.territory_mut(name)?;
            territory.set_owner(Some(owner));
            territory.set_troops(armies);
        }

        for name in board.graph.names() {
            if !assigned_territories.contains(name) {
                log::warn!("Territory not assigned: {}", name);
            }
        }

        Ok(self
            .players
            .iter()
            .map(|player| Player::new(player.id, &player.name))
            .collect())
    }

    pub fn to_board_and_players(&self) -> Result<(Board, Vec<Player>), MapError> {
        let mut board = Board::classic()?;
        let players = self.apply(&mut board)?;
        Ok((board, players))
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerConfig, MapError> {
        self.players
            .iter()
            .find(|player| player.id == id.0)
            .ok_or(MapError::UnknownPlayer(id.0))
    }

    pub fn from_json(data: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load_from_file(filename: &str) -> Result<Self, MapError> {
        let data = std::fs::read_to_string(filename)?;
        Self::from_json(&data)
    }
}
