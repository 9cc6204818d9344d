// lib.rs
pub mod board;
pub mod board_config;
pub mod continent;
pub mod error;
pub mod graph;
pub mod player;
pub mod session;
pub mod territory;
pub mod world;
