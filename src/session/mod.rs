//! Bot session - one runner connection and the memory of its match

pub mod registry;

pub use registry::{SessionHandle, SessionRegistry, SessionSummary};

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::model::{Game, Unit};
use crate::strategy::{DebugSink, NoopDebug, PersistentMemory, RecordingDebug, Strategy};
use crate::util::rate_limit::ConnectionRateLimiter;
use crate::util::time::Timer;
use crate::ws::protocol::{ClientMsg, ServerMsg};

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to decode client message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode server message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Drives the decision policy for every unit the runner hands us
pub struct BotSession {
    strategy: Arc<Strategy>,
    memory: PersistentMemory,
    forward_debug: bool,
    handle: Arc<SessionHandle>,
    finished: bool,
}

impl BotSession {
    pub fn new(strategy: Arc<Strategy>, handle: Arc<SessionHandle>, forward_debug: bool) -> Self {
        Self {
            strategy,
            memory: PersistentMemory::new(),
            forward_debug,
            handle,
            finished: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.handle.id
    }

    /// True once the runner has sent `finish`
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn memory(&self) -> &PersistentMemory {
        &self.memory
    }

    /// Answer one inbound text frame. Every frame gets at least one reply:
    /// frames over the rate limit get `rate_limited`, undecodable ones get
    /// `bad_message`, so a runner waiting on replies never stalls.
    pub fn handle_frame(&mut self, text: &str, limiter: &ConnectionRateLimiter) -> Vec<ServerMsg> {
        if !limiter.check_message() {
            warn!(session_id = %self.handle.id, "Rate limited runner message");
            return vec![ServerMsg::Error {
                code: "rate_limited".to_string(),
                message: "message rate limit exceeded".to_string(),
            }];
        }

        match self.handle_text(text) {
            Ok(replies) => replies,
            Err(e) => {
                warn!(session_id = %self.handle.id, error = %e, "Failed to parse runner message");
                vec![ServerMsg::Error {
                    code: "bad_message".to_string(),
                    message: e.to_string(),
                }]
            }
        }
    }

    /// Decode one text frame and answer it
    pub fn handle_text(&mut self, text: &str) -> Result<Vec<ServerMsg>, SessionError> {
        let msg = serde_json::from_str::<ClientMsg>(text).map_err(SessionError::Decode)?;
        Ok(self.handle_message(msg))
    }

    /// Answer one decoded message
    pub fn handle_message(&mut self, msg: ClientMsg) -> Vec<ServerMsg> {
        match msg {
            ClientMsg::PlayerView { my_id, game } => self.decide(my_id, &game),
            ClientMsg::Ping { t } => vec![ServerMsg::Pong { t }],
            ClientMsg::Finish => {
                info!(
                    session_id = %self.handle.id,
                    ticks = self.handle.ticks(),
                    agents = self.memory.agent_count(),
                    "Runner finished the match"
                );
                self.finished = true;
                Vec::new()
            }
        }
    }

    fn decide(&mut self, my_id: i32, game: &Game) -> Vec<ServerMsg> {
        let timer = Timer::new();

        let mut mine: Vec<&Unit> = game.units.iter().filter(|u| u.player_id == my_id).collect();
        mine.sort_by_key(|u| u.id);

        let mut recorder = RecordingDebug::new();
        let mut noop = NoopDebug;
        let sink: &mut dyn DebugSink = if self.forward_debug {
            &mut recorder
        } else {
            &mut noop
        };

        let mut actions = BTreeMap::new();
        for unit in mine {
            let action = self.strategy.get_action(unit, game, &mut self.memory, sink);
            actions.insert(unit.id, action);
        }

        let elapsed = timer.elapsed_micros();
        self.handle.record_tick(actions.len(), elapsed);
        debug!(
            session_id = %self.handle.id,
            tick = game.current_tick,
            units = actions.len(),
            elapsed_micros = elapsed,
            "Answered player view"
        );

        let mut replies: Vec<ServerMsg> = recorder
            .drain()
            .into_iter()
            .map(|data| ServerMsg::CustomData { data })
            .collect();
        replies.push(ServerMsg::Actions {
            tick: game.current_tick,
            actions,
        });
        replies
    }
}

/// Serialize a server message to its wire text
pub fn encode(msg: &ServerMsg) -> Result<String, SessionError> {
    serde_json::to_string(msg).map_err(SessionError::Encode)
}
