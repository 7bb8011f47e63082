//! Round settlement: deaths end the round, never the process.
//!
//! A defeated enemy comes back for the next round with 1.5x health; a
//! defeated player ends the session. Either way the clock pauses and the
//! host decides what plays next — the core only announces.

use bevy::prelude::*;

use crate::beat::BeatClock;
use crate::combat::arbiter::TurnArbiter;
use crate::combat::events::{CombatantDied, RoundLost, RoundWon};
use crate::components::{Enemy, EnemyArms, Health, Player, PlayerAction};
use crate::logger;

pub fn settle_rounds(
    mut deaths: EventReader<CombatantDied>,
    mut arbiter: ResMut<TurnArbiter>,
    mut clock: ResMut<BeatClock>,
    mut players: Query<&mut PlayerAction, With<Player>>,
    mut enemies: Query<(&mut Health, &mut EnemyArms), With<Enemy>>,
    player_markers: Query<(), With<Player>>,
    mut won_events: EventWriter<RoundWon>,
    mut lost_events: EventWriter<RoundLost>,
) {
    for death in deaths.read() {
        if player_markers.contains(death.entity) {
            logger::log_info("player defeated: session over");
            clock.pause();
            arbiter.reset();
            lost_events.write(RoundLost);
            continue;
        }

        let Ok((mut health, mut arms)) = enemies.get_mut(death.entity) else {
            continue;
        };

        let won_round = arbiter.round();
        logger::log_info(&format!(
            "round {} won: enemy returns with {} hp",
            won_round,
            (health.max as f32 * 1.5).round() as u32
        ));

        // Pause until the host restarts the clock for the next song; the
        // opponent scales up and every in-flight limb timer is cancelled.
        clock.pause();
        health.scale_max(1.5);
        arms.reset();
        if let Ok(mut action) = players.single_mut() {
            action.reset();
        }
        arbiter.advance_round();
        won_events.write(RoundWon { round: won_round });
    }
}
