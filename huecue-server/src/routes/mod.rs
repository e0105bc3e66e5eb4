//! HTTP route handlers

pub mod board;
pub mod delta_e;
pub mod game;
pub mod status;
pub mod zones;
