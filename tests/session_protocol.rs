use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};

use arena_bot::config::StrategyConfig;
use arena_bot::model::{Game, JumpState, Level, Properties, Tile, Unit, Vec2, Weapon, WeaponType};
use arena_bot::session::{encode, BotSession, SessionError, SessionRegistry};
use arena_bot::strategy::Strategy;
use arena_bot::util::rate_limit::ConnectionRateLimiter;
use arena_bot::ws::protocol::ServerMsg;

fn unit(player_id: i32, id: i32, x: f64) -> Unit {
    Unit {
        player_id,
        id,
        health: 100,
        position: Vec2::new(x, 1.0),
        size: Vec2::new(0.9, 1.8),
        jump_state: JumpState::default(),
        weapon: Some(Weapon::new(WeaponType::AssaultRifle)),
    }
}

fn game(tick: u64) -> Game {
    Game {
        current_tick: tick,
        properties: Properties::default(),
        level: Level::filled(24, 8, Tile::Empty),
        units: vec![unit(2, 9, 20.0), unit(1, 4, 8.0), unit(1, 2, 3.0)],
        loot_boxes: vec![],
    }
}

fn player_view(tick: u64) -> Result<String> {
    let msg = json!({
        "type": "player_view",
        "my_id": 1,
        "game": serde_json::to_value(game(tick))?,
    });
    Ok(msg.to_string())
}

/// Replies as they would appear on the wire
fn wire(replies: &[ServerMsg]) -> Result<Vec<Value>> {
    replies
        .iter()
        .map(|msg| Ok(serde_json::from_str(&encode(msg)?)?))
        .collect()
}

fn new_session(registry: &SessionRegistry, forward_debug: bool) -> BotSession {
    let strategy = Arc::new(Strategy::new(StrategyConfig::default()));
    BotSession::new(strategy, registry.open(), forward_debug)
}

#[test]
fn player_view_yields_one_action_per_owned_unit() -> Result<()> {
    let registry = SessionRegistry::new();
    let mut session = new_session(&registry, false);

    let replies = wire(&session.handle_text(&player_view(12)?)?)?;
    assert_eq!(replies.len(), 1);

    let reply = &replies[0];
    assert_eq!(reply["type"], "actions");
    assert_eq!(reply["tick"], 12);

    let actions = reply["actions"].as_object().expect("actions map");
    let ids: Vec<&str> = actions.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["2", "4"]);
    for action in actions.values() {
        assert!(action["velocity"].is_number());
        assert!(action["aim"]["x"].is_number());
        assert_eq!(action["plant_mine"], false);
    }

    let handle = registry.get(&session.id()).expect("session is registered");
    assert_eq!(handle.ticks(), 1);
    assert_eq!(handle.actions(), 2);
    Ok(())
}

#[test]
fn debug_forwarding_emits_custom_data_first() -> Result<()> {
    let registry = SessionRegistry::new();
    let mut session = new_session(&registry, true);

    let replies = wire(&session.handle_text(&player_view(0)?)?)?;
    let (last, draws) = replies.split_last().expect("at least the actions reply");

    assert_eq!(last["type"], "actions");
    assert!(!draws.is_empty());
    for draw in draws {
        assert_eq!(draw["type"], "custom_data");
        assert!(draw["data"]["kind"].is_string());
    }
    assert!(draws.iter().any(|d| d["data"]["kind"] == "log"));
    Ok(())
}

#[test]
fn memory_carries_across_views() -> Result<()> {
    let registry = SessionRegistry::new();
    let mut session = new_session(&registry, false);

    for tick in 0..3 {
        session.handle_text(&player_view(tick)?)?;
    }
    assert_eq!(session.memory().agent_count(), 2);
    assert_eq!(session.memory().tracked_enemy_count(), 2);
    assert_eq!(registry.total_ticks(), 3);
    Ok(())
}

#[test]
fn ping_is_echoed() -> Result<()> {
    let registry = SessionRegistry::new();
    let mut session = new_session(&registry, false);

    let replies = wire(&session.handle_text(r#"{"type":"ping","t":1234}"#)?)?;
    assert_eq!(replies, vec![json!({"type": "pong", "t": 1234})]);
    Ok(())
}

#[test]
fn finish_ends_the_session() -> Result<()> {
    let registry = SessionRegistry::new();
    let mut session = new_session(&registry, false);

    assert!(session.handle_text(r#"{"type":"finish"}"#)?.is_empty());
    assert!(session.is_finished());
    Ok(())
}

#[test]
fn malformed_messages_are_decode_errors() {
    let registry = SessionRegistry::new();
    let mut session = new_session(&registry, false);

    for bad in ["not json", r#"{"type":"teleport"}"#, r#"{"type":"player_view","my_id":1}"#] {
        assert!(matches!(session.handle_text(bad), Err(SessionError::Decode(_))));
    }
    assert!(!session.is_finished());
}

#[test]
fn every_frame_gets_a_reply_even_when_limited() -> Result<()> {
    let registry = SessionRegistry::new();
    let mut session = new_session(&registry, false);
    let limiter = ConnectionRateLimiter::new(2);

    let view = wire(&session.handle_frame(&player_view(0)?, &limiter))?;
    assert_eq!(view.len(), 1);
    assert_eq!(view[0]["type"], "actions");

    let bad = wire(&session.handle_frame("not json", &limiter))?;
    assert_eq!(bad.len(), 1);
    assert_eq!(bad[0]["type"], "error");
    assert_eq!(bad[0]["code"], "bad_message");

    let limited = wire(&session.handle_frame(&player_view(1)?, &limiter))?;
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0]["type"], "error");
    assert_eq!(limited[0]["code"], "rate_limited");

    // The dropped view never reached the policy
    assert_eq!(registry.get(&session.id()).expect("registered").ticks(), 1);
    Ok(())
}
