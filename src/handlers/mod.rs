pub mod admin;
pub mod backup;
pub mod boards;
pub mod error;
pub mod games;
pub mod health;
pub mod squares;
pub mod winners;
