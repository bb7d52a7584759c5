//! Arena bot - per-tick decision policy for a tile-based last-standing
//! shooter, served to a match runner over WebSocket.

pub mod app;
pub mod config;
pub mod http;
pub mod model;
pub mod session;
pub mod strategy;
pub mod util;
pub mod ws;
