//! Debug visualization sinks
//!
//! The strategy always emits its draw commands; a sink decides whether to
//! keep them.

use crate::model::CustomData;

/// Write-only receiver of draw commands
pub trait DebugSink {
    fn draw(&mut self, data: CustomData);
}

/// Discards everything; used in production
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDebug;

impl DebugSink for NoopDebug {
    fn draw(&mut self, _data: CustomData) {}
}

/// Keeps every command in order
#[derive(Debug, Default, Clone)]
pub struct RecordingDebug {
    pub commands: Vec<CustomData>,
}

impl RecordingDebug {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every `Log` command
    pub fn logs(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                CustomData::Log { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn drain(&mut self) -> Vec<CustomData> {
        std::mem::take(&mut self.commands)
    }
}

impl DebugSink for RecordingDebug {
    fn draw(&mut self, data: CustomData) {
        self.commands.push(data);
    }
}
