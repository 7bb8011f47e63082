//! Headless beatbrawl bout.
//!
//! Runs the combat core without a host: a scripted player lands a perfect
//! punch on every beat of its window while the enemy plays its seeded
//! pattern. Same seed, same bout — useful for eyeballing determinism and the
//! turn flow.

use std::time::Duration;

use bevy::prelude::*;

use beatbrawl_simulation::{
    create_headless_app, BeatClock, CombatConfig, Enemy, Health, InputAction, Player,
    PlayerInputEvent, RoundLost, RoundWon, TurnArbiter,
};

fn main() {
    let seed = 42;
    let config = CombatConfig::default();
    let period_ms = config.period_ms() as u64;
    println!("Starting beatbrawl headless bout (seed: {seed})");

    let mut app = match create_headless_app(seed, config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("invalid config: {err}");
            std::process::exit(1);
        }
    };
    app.world_mut().resource_mut::<BeatClock>().start();

    for beat in 1..=200u32 {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_millis(period_ms));
        app.world_mut().run_schedule(FixedUpdate);

        // Scripted player: a perfectly timed punch whenever the window is
        // open and the beat that just fired left a fresh boundary.
        let can_attack = app.world().resource::<TurnArbiter>().can_player_attack();
        let last_beat = app.world().resource::<BeatClock>().last_beat_ms();
        if can_attack {
            if let Some(at_ms) = last_beat {
                app.world_mut().send_event(PlayerInputEvent {
                    action: InputAction::Punch,
                    at_ms,
                });
                app.world_mut()
                    .resource_mut::<Time<Fixed>>()
                    .advance_by(Duration::ZERO);
                app.world_mut().run_schedule(FixedUpdate);
            }
        }

        if beat % 10 == 0 {
            let player_hp = health_of::<Player>(&mut app);
            let enemy_hp = health_of::<Enemy>(&mut app);
            println!("Beat {beat}: player {player_hp} hp, enemy {enemy_hp} hp");
        }

        if drained::<RoundWon>(&mut app) {
            let round = app.world().resource::<TurnArbiter>().round();
            println!("Round won! Restarting the clock for round {round}");
            app.world_mut().resource_mut::<BeatClock>().start();
        }
        if drained::<RoundLost>(&mut app) {
            println!("Player defeated on beat {beat}");
            break;
        }
    }

    println!("Bout complete!");
}

fn health_of<M: Component>(app: &mut App) -> u32 {
    let mut q = app.world_mut().query_filtered::<&Health, With<M>>();
    q.single(app.world()).map(|h| h.current).unwrap_or(0)
}

fn drained<E: Event>(app: &mut App) -> bool {
    app.world_mut()
        .resource_mut::<Events<E>>()
        .drain()
        .next()
        .is_some()
}
