// session.rs
use crate::board::Board;
use crate::board_config::BoardConfig;
use crate::error::MapError;
use crate::player::{Player, PlayerId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::ops::RangeInclusive;

pub const PLAYER_COUNT: RangeInclusive<usize> = 2..=6;

#[derive(Debug, Deserialize, Clone)]
pub struct SetTroopsData {
    pub territory: String,
    pub armies: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SetOwnerData {
    pub territory: String,
    pub player_id: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResetData {
    pub reset_owner: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NewBoardData {
    pub config_file: Option<String>,
    pub num_players: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum Request {
    GetBoard,
    GetTerritory(String),
    ClosestEnemy(String),
    Connected { from: String, to: String },
    FortifyTargets(String),
    SetTroops(SetTroopsData),
    SetOwner(SetOwnerData),
    Reset(ResetData),
    NewBoard(NewBoardData),
}

/// One game's map and the players who can own it. Guarded by a single lock.
#[derive(Debug)]
pub struct Session {
    pub board: Board,
    pub players: Vec<Player>,
}

impl Session {
    pub fn random(num_players: usize, seed: Option<u64>) -> Result<Self, MapError> {
        if !PLAYER_COUNT.contains(&num_players) {
            return Err(MapError::InvalidPlayerCount(num_players));
        }
        let mut board = Board::classic()?;
        let players: Vec<Player> = (0..num_players)
            .map(|i| Player::new(i, &format!("Player {}", i + 1)))
            .collect();
        let armies = initial_armies(num_players);
        match seed {
            Some(seed) => board.shuffle_and_distribute_territories(
                &players,
                armies,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => {
                board.shuffle_and_distribute_territories(&players, armies, &mut rand::thread_rng())
            }
        }
        Ok(Self { board, players })
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self, MapError> {
        let (board, players) = config.to_board_and_players()?;
        Ok(Self { board, players })
    }

    /// Runs one request against the session. A failed request leaves the session
    /// as it was.
    pub fn handle(&mut self, request: Request) -> Result<Value, MapError> {
        let value = match request {
            Request::GetBoard => serde_json::to_value(&self.board)?,
            Request::GetTerritory(name) => serde_json::to_value(self.board.graph.territory(&name)?)?,
            Request::ClosestEnemy(name) => {
                let distance = self.board.graph.closest_enemy_distance(&name)?;
                json!({ "territory": name, "distance": distance })
            }
            Request::Connected { from, to } => {
                let connected = self.board.graph.is_connected(&from, &to)?;
                json!({ "from": from, "to": to, "connected": connected })
            }
            Request::FortifyTargets(name) => {
                let targets = self.board.graph.connected_territories(&name)?;
                json!({ "territory": name, "targets": targets })
            }
            Request::SetTroops(data) => {
                let territory = self.board.graph.territory_mut(&data.territory)?;
                territory.try_set_troops(data.armies)?;
                serde_json::to_value(&*territory)?
            }
            Request::SetOwner(data) => {
                let owner = match data.player_id {
                    Some(id) if !self.players.iter().any(|p| p.id == PlayerId(id)) => {
                        return Err(MapError::UnknownPlayer(id));
                    }
                    id => id.map(PlayerId),
                };
                let territory = self.board.graph.territory_mut(&data.territory)?;
                territory.set_owner(owner);
                serde_json::to_value(&*territory)?
            }
            Request::Reset(data) => {
                self.board.reset(data.reset_owner);
                serde_json::to_value(&self.board)?
            }
            Request::NewBoard(data) => {
                *self = match data.config_file {
                    Some(path) => Session::from_config(&BoardConfig::load_from_file(&path)?)?,
                    None => Session::random(data.num_players.unwrap_or(6), data.seed)?,
                };
                log::info!("new board with {} players", self.players.len());
                json!({ "board": &self.board, "players": &self.players })
            }
        };
        Ok(value)
    }
}

fn initial_armies(num_players: usize) -> u16 {
    match num_players {
        0..=3 => 35,
        4 => 30,
        5 => 25,
        _ => 20,
    }
}
