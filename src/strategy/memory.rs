//! State carried across ticks for the lifetime of a match

use std::collections::HashMap;

use crate::model::Vec2;

/// Where and when an agent last saw an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    /// Enemy centre
    pub position: Vec2,
    pub tick: u64,
}

impl Sighting {
    /// Average per-tick displacement from this sighting to `position` seen
    /// at `tick`. Repeated sightings within one tick count as one tick apart.
    pub fn velocity_to(&self, position: Vec2, tick: u64) -> Vec2 {
        let elapsed = tick.saturating_sub(self.tick).max(1);
        (position - self.position) * (1.0 / elapsed as f64)
    }
}

/// Match-lifetime memory shared by every agent a side controls.
///
/// Owned by the caller and handed to each decision by `&mut`. Entries are
/// never evicted; the store is bounded by the roster size.
#[derive(Debug, Clone, Default)]
pub struct PersistentMemory {
    /// Last aim vector per agent id
    last_aim: HashMap<i32, Vec2>,
    /// Last sighting per (agent id, enemy id)
    sightings: HashMap<(i32, i32), Sighting>,
}

impl PersistentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous aim of an agent, zero before its first sighting of an enemy
    pub fn last_aim(&self, agent_id: i32) -> Vec2 {
        self.last_aim.get(&agent_id).copied().unwrap_or_default()
    }

    pub fn remember_aim(&mut self, agent_id: i32, aim: Vec2) {
        self.last_aim.insert(agent_id, aim);
    }

    /// Where and when this agent last saw the enemy, if it has before
    pub fn last_sighting(&self, agent_id: i32, enemy_id: i32) -> Option<Sighting> {
        self.sightings.get(&(agent_id, enemy_id)).copied()
    }

    pub fn last_enemy_position(&self, agent_id: i32, enemy_id: i32) -> Option<Vec2> {
        self.last_sighting(agent_id, enemy_id).map(|s| s.position)
    }

    pub fn remember_enemy(&mut self, agent_id: i32, enemy_id: i32, position: Vec2, tick: u64) {
        self.sightings
            .insert((agent_id, enemy_id), Sighting { position, tick });
    }

    /// Number of agents with a remembered aim
    pub fn agent_count(&self) -> usize {
        self.last_aim.len()
    }

    /// Number of tracked (agent, enemy) pairs
    pub fn tracked_enemy_count(&self) -> usize {
        self.sightings.len()
    }
}
