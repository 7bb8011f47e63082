//! Beat-driven enemy behavior: limb policy, scheduled transitions, and
//! punch resolution against the player's dodge.

use bevy::prelude::*;
use rand::Rng;

use crate::beat::{BeatClock, BeatTick};
use crate::combat::arbiter::{BeatDecision, TurnArbiter};
use crate::combat::events::{
    ActionStateChanged, ActionStateKind, CombatantDied, DamageDealt, EnemyPunch, PhaseSwitched,
    PunchDodged,
};
use crate::components::{Arm, ArmPhase, Direction, Enemy, EnemyArms, Health, Player, PlayerAction};
use crate::config::CombatConfig;
use crate::logger;
use crate::DeterministicRng;

/// What the policy picks for one arm on one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmAction {
    WindUp,
    Punch,
    Pass,
}

/// The per-limb action policy — a biased random walk, not a fixed pattern.
///
/// Deterministic branches:
/// - a ready arm always punches (and `last_attack` never strands one),
/// - the forced last beat starts no new wind-ups,
/// - while the other arm telegraphs and double punches are forbidden, idle
///   arms pass,
/// - mid-transition arms pass.
///
/// The only random branch: an unconstrained idle arm winds up or passes with
/// equal probability, drawn from the injected seeded RNG.
pub fn possible_action_for(
    arm: ArmPhase,
    other_arm: ArmPhase,
    last_attack: bool,
    forbid_double_punches: bool,
    rng: &mut impl Rng,
) -> ArmAction {
    match arm {
        ArmPhase::WindUpComplete => ArmAction::Punch,
        ArmPhase::Idle if last_attack => ArmAction::Pass,
        ArmPhase::Idle if forbid_double_punches && other_arm == ArmPhase::WindingUp => {
            ArmAction::Pass
        }
        ArmPhase::Idle => {
            if rng.gen_bool(0.5) {
                ArmAction::WindUp
            } else {
                ArmAction::Pass
            }
        }
        _ => ArmAction::Pass,
    }
}

/// Runs the policy over both arms (left first) and applies the transitions.
/// Returns the actions that actually took effect, in application order.
///
/// Wind-up and punch each last half a beat, so a full telegraph-to-hit cycle
/// spans one beat of reaction time at any tempo.
pub fn enemy_on_beat(
    arms: &mut EnemyArms,
    period_ms: f64,
    forbid_double_punches: bool,
    last_attack: bool,
    rng: &mut impl Rng,
) -> Vec<(Direction, ArmAction)> {
    let half_beat = period_ms / 2.0;
    let mut applied = Vec::new();

    let right_phase = arms.right.phase;
    apply_arm_action(
        &mut arms.left,
        right_phase,
        Direction::Left,
        half_beat,
        forbid_double_punches,
        last_attack,
        rng,
        &mut applied,
    );

    let left_phase = arms.left.phase;
    apply_arm_action(
        &mut arms.right,
        left_phase,
        Direction::Right,
        half_beat,
        forbid_double_punches,
        last_attack,
        rng,
        &mut applied,
    );

    applied
}

#[allow(clippy::too_many_arguments)]
fn apply_arm_action(
    arm: &mut Arm,
    other_phase: ArmPhase,
    side: Direction,
    half_beat_ms: f64,
    forbid_double_punches: bool,
    last_attack: bool,
    rng: &mut impl Rng,
    applied: &mut Vec<(Direction, ArmAction)>,
) {
    let action = possible_action_for(
        arm.phase,
        other_phase,
        last_attack,
        forbid_double_punches,
        rng,
    );
    let took_effect = match action {
        ArmAction::WindUp => arm.begin_wind_up(half_beat_ms),
        ArmAction::Punch => arm.begin_punch(half_beat_ms),
        ArmAction::Pass => false,
    };
    if took_effect {
        applied.push((side, action));
    }
}

/// System: the per-beat handler. Consumes `BeatTick`, asks the arbiter what
/// the beat is for, and either drives the limb policy or announces the phase
/// switch.
pub fn drive_attack_phase(
    mut beat_ticks: EventReader<BeatTick>,
    mut arbiter: ResMut<TurnArbiter>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<CombatConfig>,
    clock: Res<BeatClock>,
    mut enemies: Query<(Entity, &mut EnemyArms), With<Enemy>>,
    mut punches: EventWriter<EnemyPunch>,
    mut state_changes: EventWriter<ActionStateChanged>,
    mut phase_switches: EventWriter<PhaseSwitched>,
) {
    for tick in beat_ticks.read() {
        let Ok((entity, mut arms)) = enemies.single_mut() else {
            continue;
        };

        match arbiter.on_beat_tick(arms.any_winding()) {
            BeatDecision::DriveEnemy { last_attack } => {
                let applied = enemy_on_beat(
                    &mut arms,
                    clock.period_ms(),
                    config.forbid_double_punches,
                    last_attack,
                    &mut rng.rng,
                );
                for (side, action) in applied {
                    match action {
                        ArmAction::WindUp => {
                            state_changes.write(ActionStateChanged {
                                entity,
                                direction: side,
                                state: ActionStateKind::WindingUp,
                            });
                        }
                        ArmAction::Punch => {
                            punches.write(EnemyPunch { direction: side });
                            state_changes.write(ActionStateChanged {
                                entity,
                                direction: side,
                                state: ActionStateKind::Punching,
                            });
                        }
                        ArmAction::Pass => {}
                    }
                }
            }
            BeatDecision::SwitchPhase(phase) => {
                logger::log_info(&format!(
                    "beat {}: initiative -> {:?} (round {})",
                    tick.beat,
                    phase,
                    arbiter.round()
                ));
                phase_switches.write(PhaseSwitched { phase });
            }
            BeatDecision::Grace | BeatDecision::HoldWindow => {}
        }
    }
}

/// System: count limb phase timers down and announce the automatic
/// transitions (wind-up completing, punch retracting). Frozen while the
/// clock is paused, so a menu overlay never lets a telegraph outrun the beat
/// grid it was scheduled against.
pub fn tick_enemy_arms(
    time: Res<Time<Fixed>>,
    clock: Res<BeatClock>,
    mut enemies: Query<(Entity, &mut EnemyArms), With<Enemy>>,
    mut state_changes: EventWriter<ActionStateChanged>,
) {
    if !clock.is_running() {
        return;
    }
    let delta_ms = time.delta_secs_f64() * 1000.0;

    for (entity, mut arms) in enemies.iter_mut() {
        let arms = &mut *arms;
        for (side, arm) in [
            (Direction::Left, &mut arms.left),
            (Direction::Right, &mut arms.right),
        ] {
            if let Some(new_phase) = arm.tick(delta_ms) {
                let state = match new_phase {
                    ArmPhase::WindUpComplete => ActionStateKind::WindUpComplete,
                    _ => ActionStateKind::Idle,
                };
                state_changes.write(ActionStateChanged {
                    entity,
                    direction: side,
                    state,
                });
            }
        }
    }
}

/// System: resolve enemy punches against the player's dodge. A punch is a
/// clean dodge only when the dodge direction matches the punch direction
/// exactly; anything else connects.
pub fn resolve_enemy_punches(
    mut punches: EventReader<EnemyPunch>,
    config: Res<CombatConfig>,
    mut players: Query<(Entity, &mut Health, &PlayerAction), With<Player>>,
    mut damage_events: EventWriter<DamageDealt>,
    mut dodge_events: EventWriter<PunchDodged>,
    mut death_events: EventWriter<CombatantDied>,
) {
    for punch in punches.read() {
        let Ok((entity, mut health, action)) = players.single_mut() else {
            continue;
        };

        if punch.direction != Direction::None && action.dodge_direction() == punch.direction {
            logger::log(&format!("player dodged the {:?} punch", punch.direction));
            dodge_events.write(PunchDodged {
                direction: punch.direction,
            });
            continue;
        }

        health.take_damage(config.enemy_damage);
        damage_events.write(DamageDealt {
            target: entity,
            amount: config.enemy_damage,
        });
        if !health.is_alive() {
            death_events.write(CombatantDied { entity });
        }
    }
}
