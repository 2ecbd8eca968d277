//! Registry behavior through the engine: dynamic registration, overwrites,
//! unregistration, and the static help table.

mod common;

use common::engine;
use hacksim::game::commands::CommandAction;
use hacksim::game::registry::{CommandSpec, ValidationRule};

#[tokio::test]
async fn dynamically_registered_alias_dispatches() {
    let (mut engine, _) = engine(41);
    engine.registry_mut().register(
        CommandSpec::new("nmap", "Scan a target IP address", "nmap <IP>", CommandAction::Scan)
            .with_validation(ValidationRule {
                min_args: Some(1),
                max_args: Some(1),
                check: None,
            }),
    );
    let out = engine.process("nmap 10.0.0.9").await.unwrap();
    assert!(out.contains("SCAN RESULTS FOR: 10.0.0.9"));
}

#[tokio::test]
async fn handlers_guard_missing_args_without_a_validation_rule() {
    // Validation rules are optional on a spec; a handler reached with zero
    // args must answer with its usage message, not index past the end.
    let (mut engine, _) = engine(51);
    for (name, action) in [
        ("nmap", CommandAction::Scan),
        ("nc", CommandAction::Connect),
        ("pwn", CommandAction::Hack),
        ("take", CommandAction::Accept),
    ] {
        engine
            .registry_mut()
            .register(CommandSpec::new(name, "bare", name, action));
    }
    let out = engine.process("nmap").await.unwrap();
    assert!(out.contains("Target IP required"), "got: {out}");
    let out = engine.process("nc").await.unwrap();
    assert!(out.contains("Target IP required"), "got: {out}");
    let out = engine.process("pwn").await.unwrap();
    assert!(out.contains("Target IP required"), "got: {out}");
    let out = engine.process("take").await.unwrap();
    assert!(out.contains("Mission ID or index required"), "got: {out}");
    // Nothing mutated along the way.
    assert!(engine.board().active().is_none());
    assert_eq!(engine.board().available().len(), 3);
}

#[tokio::test]
async fn unregistered_command_stops_dispatching() {
    let (mut engine, _) = engine(42);
    assert!(engine.registry_mut().unregister("scan"));
    let out = engine.process("scan 10.0.0.9").await.unwrap();
    assert!(out.contains("Command not found: scan"));
}

#[tokio::test]
async fn unregistering_alias_keeps_primary_name() {
    let (mut engine, _) = engine(43);
    assert!(engine.registry_mut().unregister("cls"));
    assert!(engine.process("cls").await.unwrap().contains("Command not found"));
    assert_eq!(engine.process("clear").await.unwrap(), hacksim::game::CLEAR_SENTINEL);
}

#[tokio::test]
async fn reregistering_overwrites_only_that_key() {
    let (mut engine, _) = engine(44);
    // Repoint "scan" at the help action; its old behavior is gone.
    engine.registry_mut().register(CommandSpec::new(
        "scan",
        "Help instead",
        "scan",
        CommandAction::Help,
    ));
    let out = engine.process("scan").await.unwrap();
    assert!(out.contains("Available Commands:"));
}

#[tokio::test]
async fn custom_predicate_runs_after_bounds() {
    fn even_arg_count(args: &[String]) -> Result<(), String> {
        if args.len() % 2 == 0 {
            Ok(())
        } else {
            Err("Error: arguments must come in pairs".to_string())
        }
    }
    let (mut engine, _) = engine(45);
    engine.registry_mut().register(
        CommandSpec::new("pair", "Pairs only", "pair <a> <b>...", CommandAction::Help)
            .with_validation(ValidationRule {
                min_args: Some(2),
                max_args: None,
                check: Some(even_arg_count),
            }),
    );
    // Count bound fails first; predicate never runs.
    let out = engine.process("pair x").await.unwrap();
    assert!(out.contains("at least 2"));
    // Bounds pass, predicate rejects.
    let out = engine.process("pair x y z").await.unwrap();
    assert!(out.contains("pairs"));
    // Both pass.
    let out = engine.process("pair x y").await.unwrap();
    assert!(out.contains("Available Commands:"));
}

#[tokio::test]
async fn help_ignores_dynamic_registrations() {
    let (mut engine, _) = engine(46);
    engine.registry_mut().register(CommandSpec::new(
        "nmap",
        "Scan a target IP address",
        "nmap <IP>",
        CommandAction::Scan,
    ));
    let out = engine.process("help").await.unwrap();
    assert!(!out.contains("nmap"));
    // And a live-but-unlisted lookup misses the static table too.
    let out = engine.process("help nmap").await.unwrap();
    assert!(out.contains("No help available"));
}

#[tokio::test]
async fn help_for_known_command() {
    let (mut engine, _) = engine(47);
    let out = engine.process("help accept").await.unwrap();
    assert!(out.contains("Usage: accept <ID|index>"));
}

#[tokio::test]
async fn info_shows_player_stats() {
    let (mut engine, _) = engine(48);
    let out = engine.process("info").await.unwrap();
    assert!(out.contains("PLAYER INFO"));
    assert!(out.contains("1000"));
    assert!(out.contains("0/100"));
}

#[tokio::test]
async fn game_shows_session_summary() {
    let (mut engine, _) = engine(52);
    let out = engine.process("game").await.unwrap();
    assert!(out.contains("GAME INFO"));
    assert!(out.contains(env!("CARGO_PKG_VERSION")));
    assert!(out.contains("Play Time"));

    engine.set_play_time_base(3725);
    let out = engine.process("game").await.unwrap();
    assert!(out.contains("1h 2m"), "got: {out}");
}

#[tokio::test]
async fn version_banner() {
    let (mut engine, _) = engine(49);
    let out = engine.process("version").await.unwrap();
    assert!(out.contains("hacksim v"));
}

#[tokio::test]
async fn no_args_commands_reject_extra_tokens() {
    let (mut engine, _) = engine(50);
    let out = engine.process("status now please").await.unwrap();
    assert!(out.contains("at most 0"));
}
