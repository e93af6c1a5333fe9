pub mod config;
pub mod frontend;
pub mod game;
pub mod quiz;
