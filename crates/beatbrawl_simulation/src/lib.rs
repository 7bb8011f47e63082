//! beatbrawl simulation core
//!
//! A beat-synchronized turn-based combat engine: a player and an enemy trade
//! timed attacks on a musical grid. The crate is the strategic layer only —
//! beat clock, timing judge, turn arbitration, enemy limb state machines —
//! and talks to the outside world exclusively through Bevy events. Rendering,
//! audio playback and menus belong to whatever host embeds it.
//!
//! Determinism: fixed timestep, a single ordered system chain, and a seeded
//! RNG resource. Two bouts with the same seed, config and input script play
//! out identically.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod beat;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;

pub use beat::{classify, is_on_beat, BeatClock, BeatPlugin, BeatQuality, BeatTick};
pub use combat::{
    ActionStateChanged, ActionStateKind, ArmAction, AttackMissed, AttackPhase, BeatDecision,
    CombatPlugin, CombatantDied, DamageDealt, EnemyPunch, InputAction, PhaseSwitched,
    PlayerInputEvent, PunchDodged, RoundLost, RoundWon, TimingJudged, TurnArbiter,
};
pub use components::*;
pub use config::{CombatConfig, ConfigError, DamagePerQuality, TimingConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};

/// Seeded RNG resource feeding the enemy action policy.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Main simulation plugin: beat clock + combat coordination on a 60Hz fixed
/// timestep.
///
/// Expects `CombatConfig`, `BeatClock` and `TurnArbiter` resources to be in
/// place (use [`create_headless_app`] for the validated front door, or insert
/// them yourself when embedding into a larger app).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((BeatPlugin, CombatPlugin));
    }
}

/// Builds a minimal headless app for one combat session: validated config,
/// seeded RNG, clock and arbiter resources, both combatants spawned. The
/// clock starts paused; the host calls `BeatClock::start` when the music
/// does.
pub fn create_headless_app(seed: u64, config: CombatConfig) -> Result<App, ConfigError> {
    config.validate()?;
    logger::init_logger();

    let clock = BeatClock::new(config.tempo_bpm)?;
    let arbiter = TurnArbiter::new(&config);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(clock)
        .insert_resource(arbiter)
        .insert_resource(config.clone())
        .add_plugins(SimulationPlugin);

    spawn_combatants(app.world_mut(), &config);
    Ok(app)
}

/// Spawns the two combatants with config-sized health pools. Returns
/// (player, enemy).
pub fn spawn_combatants(world: &mut World, config: &CombatConfig) -> (Entity, Entity) {
    let player = world
        .spawn((Player, Health::new(config.player_max_health)))
        .id();
    let enemy = world
        .spawn((Enemy, Health::new(config.enemy_max_health)))
        .id();
    (player, enemy)
}
