// error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("unknown territory: '{0}'")]
    UnknownTerritory(String),

    #[error("territory '{0}' cannot border itself")]
    SelfBorder(String),

    #[error("duplicate territory: '{0}'")]
    DuplicateTerritory(String),

    #[error("invalid army count: {0}")]
    InvalidArmyCount(i64),

    #[error("territory '{0}' has no owner")]
    Unowned(String),

    #[error("territory '{0}' is assigned more than once")]
    DuplicateAssignment(String),

    #[error("unknown player id: {0}")]
    UnknownPlayer(usize),

    #[error("a board needs 2 to 6 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
