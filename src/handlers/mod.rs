//! API handlers

pub mod blocked;
pub mod export;
pub mod health;
pub mod logs;
pub mod stats;
