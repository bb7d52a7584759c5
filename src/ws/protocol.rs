//! WebSocket protocol message definitions
//! These are the wire types between the match runner and the bot host

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{CustomData, Game, UnitAction};

/// Messages sent from the match runner to the bot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    /// World snapshot for the current tick
    PlayerView {
        /// Player whose units this bot controls
        my_id: i32,
        game: Game,
    },

    /// Ping for latency measurement
    Ping {
        /// Runner timestamp
        t: u64,
    },

    /// Match is over; the bot should close the connection
    Finish,
}

/// Messages sent from the bot to the match runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Welcome message after connection
    Welcome {
        session_id: Uuid,
        server_time: u64,
    },

    /// Debug draw command produced while deciding
    CustomData {
        data: CustomData,
    },

    /// One action per controlled unit, keyed by unit id
    Actions {
        tick: u64,
        actions: BTreeMap<i32, UnitAction>,
    },

    /// Pong response
    Pong {
        /// Echo back runner timestamp
        t: u64,
    },

    /// Error message
    Error {
        code: String,
        message: String,
    },
}
