//! WebSocket endpoint the match runner connects to

pub mod handler;
pub mod protocol;

pub use handler::ws_handler;
pub use protocol::{ClientMsg, ServerMsg};
