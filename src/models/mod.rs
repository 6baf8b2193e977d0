//! Data models

pub mod blocked_ip;
pub mod detection;
pub mod threat_log;

pub use blocked_ip::*;
pub use detection::*;
pub use threat_log::*;
