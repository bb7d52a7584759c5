//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::model::WeaponType;

/// Host configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Forward debug draw commands to the runner
    pub forward_debug: bool,
    /// Max inbound messages per second per connection
    pub tick_rate_limit: u32,
    /// Decision tunables
    pub strategy: StrategyConfig,
}

/// Tunables of the per-tick decision policy
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyConfig {
    /// Weapon the agent tries to end up holding
    pub best_weapon: WeaponType,
    /// Distance added to a health pack an enemy can reach first
    pub contested_pack_penalty: f64,
    /// Upper bound on lead extrapolation, in ticks
    pub lead_cap_ticks: f64,
    /// Length of the idle patrol window; direction flips halfway through
    pub patrol_period_ticks: u64,
    /// Horizontal dead zone around the POI for the wall-ahead jump
    pub arrival_margin: f64,
    /// Enemy distance below which the agent keeps jumping
    pub close_combat_distance: f64,
    /// Fraction of the max jump time under which a platform hop is suppressed
    pub jump_stabilize_ratio: f64,
    /// Samples along a shot ray. Fewer steps are faster but can step over
    /// thin obstacles.
    pub ray_steps: u32,
    /// Also validate both edges of the spread cone
    pub check_spread_edges: bool,
    /// Margin added around the agent when looking for loot to pick up
    pub pickup_margin: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            best_weapon: WeaponType::AssaultRifle,
            contested_pack_penalty: 100.0,
            lead_cap_ticks: 8.0,
            patrol_period_ticks: 100,
            arrival_margin: 0.5,
            close_combat_distance: 1.8,
            jump_stabilize_ratio: 0.8,
            ray_steps: 1000,
            check_spread_edges: false,
            pickup_margin: 0.5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Hosting platforms provide PORT, fall back to SERVER_ADDR or default
        let server_addr = if let Ok(port) = env::var("PORT") {
            format!("0.0.0.0:{}", port)
        } else {
            env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        };

        Ok(Self {
            server_addr: server_addr
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            forward_debug: parse_var("FORWARD_DEBUG", false)?,
            tick_rate_limit: parse_var("TICK_RATE_LIMIT", 120)?,

            strategy: StrategyConfig::from_env()?,
        })
    }
}

impl StrategyConfig {
    /// Defaults overridden by any tunables present in the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let ray_steps = parse_var("RAY_STEPS", defaults.ray_steps)?;
        if ray_steps == 0 {
            return Err(ConfigError::Invalid("RAY_STEPS"));
        }

        let patrol_period_ticks = parse_var("PATROL_PERIOD_TICKS", defaults.patrol_period_ticks)?;
        if patrol_period_ticks == 0 {
            return Err(ConfigError::Invalid("PATROL_PERIOD_TICKS"));
        }

        let lead_cap_ticks = parse_var("LEAD_CAP_TICKS", defaults.lead_cap_ticks)?;
        if !lead_cap_ticks.is_finite() || lead_cap_ticks < 0.0 {
            return Err(ConfigError::Invalid("LEAD_CAP_TICKS"));
        }

        Ok(Self {
            ray_steps,
            patrol_period_ticks,
            lead_cap_ticks,
            check_spread_edges: parse_var("CHECK_SPREAD_EDGES", defaults.check_spread_edges)?,
            ..defaults
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::Invalid(name)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Invalid server address format")]
    InvalidAddress,
}
