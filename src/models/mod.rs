pub mod admin;
pub mod backup;
pub mod board;
pub mod common;
pub mod display;
pub mod game;
pub mod square;
pub mod winner;
