//! Player input handling: dodges any time, punches only inside the player's
//! attack window, judged synchronously against the beat grid.

use bevy::prelude::*;

use crate::beat::{classify, is_on_beat, BeatClock};
use crate::combat::arbiter::TurnArbiter;
use crate::combat::events::{
    ActionStateChanged, ActionStateKind, AttackMissed, CombatantDied, DamageDealt, InputAction,
    PlayerInputEvent, TimingJudged,
};
use crate::components::{Enemy, Health, Player, PlayerAction};
use crate::config::CombatConfig;
use crate::logger;

/// System: consume discrete input events.
///
/// Dodges are free-form defense — allowed in any phase, refused only while
/// another action is mid-flight (expected overlap, silently ignored). A
/// punch is judged at its input timestamp: on-beat deals the quality-mapped
/// damage; off-beat flags the miss that cedes initiative at the next tick.
pub fn handle_player_input(
    mut inputs: EventReader<PlayerInputEvent>,
    mut arbiter: ResMut<TurnArbiter>,
    clock: Res<BeatClock>,
    config: Res<CombatConfig>,
    mut players: Query<(Entity, &mut PlayerAction), With<Player>>,
    mut enemies: Query<(Entity, &mut Health), (With<Enemy>, Without<Player>)>,
    mut state_changes: EventWriter<ActionStateChanged>,
    mut timing_events: EventWriter<TimingJudged>,
    mut miss_events: EventWriter<AttackMissed>,
    mut damage_events: EventWriter<DamageDealt>,
    mut death_events: EventWriter<CombatantDied>,
) {
    let half_beat = clock.period_ms() / 2.0;

    for input in inputs.read() {
        let Ok((player_entity, mut action)) = players.single_mut() else {
            continue;
        };

        match input.action {
            InputAction::DodgeLeft | InputAction::DodgeRight => {
                let direction = input.action.dodge_direction();
                if !action.begin_dodge(direction, half_beat) {
                    continue;
                }
                state_changes.write(ActionStateChanged {
                    entity: player_entity,
                    direction,
                    state: ActionStateKind::Dodging,
                });
            }
            InputAction::Punch => {
                if !action.is_idle() {
                    continue;
                }
                let Ok((enemy_entity, mut enemy_health)) = enemies.single_mut() else {
                    continue;
                };
                if !arbiter.can_player_attack() || !enemy_health.is_alive() {
                    continue;
                }

                let direction = action.next_punch_direction();
                action.begin_punch(direction, half_beat);
                state_changes.write(ActionStateChanged {
                    entity: player_entity,
                    direction,
                    state: ActionStateKind::Punching,
                });

                let timing = &config.timing;
                if is_on_beat(input.at_ms, clock.last_beat_ms(), clock.period_ms(), timing) {
                    let quality =
                        classify(input.at_ms, clock.last_beat_ms(), clock.period_ms(), timing);
                    let amount = config.damage_per_quality.for_quality(quality);
                    enemy_health.take_damage(amount);

                    logger::log(&format!(
                        "player punch {:?}: {} damage ({} hp left)",
                        quality, amount, enemy_health.current
                    ));
                    timing_events.write(TimingJudged { quality });
                    damage_events.write(DamageDealt {
                        target: enemy_entity,
                        amount,
                    });
                    if !enemy_health.is_alive() {
                        death_events.write(CombatantDied {
                            entity: enemy_entity,
                        });
                    }
                } else {
                    logger::log("player punch off-beat: miss");
                    arbiter.flag_miss();
                    miss_events.write(AttackMissed);
                }
            }
        }
    }
}

/// System: return the player's action to idle when its half-beat runs out.
/// Frozen alongside the clock, like the enemy arm timers.
pub fn tick_player_action(
    time: Res<Time<Fixed>>,
    clock: Res<BeatClock>,
    mut players: Query<(Entity, &mut PlayerAction), With<Player>>,
    mut state_changes: EventWriter<ActionStateChanged>,
) {
    if !clock.is_running() {
        return;
    }
    let delta_ms = time.delta_secs_f64() * 1000.0;

    for (entity, mut action) in players.iter_mut() {
        if action.tick(delta_ms) {
            state_changes.write(ActionStateChanged {
                entity,
                direction: crate::components::Direction::None,
                state: ActionStateKind::Idle,
            });
        }
    }
}
