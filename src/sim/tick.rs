//! Frame advance and game state machine
//!
//! `advance` is the single per-frame entry point. Inside it the order is
//! fixed: taps, spawner, physics, resolver, phase transition.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::physics;
use super::resolver;
use super::spawner::Spawner;
use super::state::{Collision, GameEvent, GamePhase, GameState, InputEvent};
use crate::error::ConfigResult;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::settings::SimConfig;

/// Result of one `advance` call: the updated state and what happened, in order
#[derive(Debug)]
pub struct Frame<'a> {
    pub state: &'a GameState,
    pub events: Vec<GameEvent>,
}

impl Frame<'_> {
    /// The run ended during this frame
    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

/// Clamp a host frame delta into `[0, max_dt]`. NaN and negatives become 0.
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        if dt != 0.0 {
            debug!("Ignoring invalid frame delta {}", dt);
        }
        0.0
    } else if dt > max_dt {
        debug!("Clamping frame delta {} to {}", dt, max_dt);
        max_dt
    } else {
        dt
    }
}

/// One self-contained game: state, tuning, randomness and session scores
#[derive(Debug, Clone)]
pub struct Simulation<R: Rng = Pcg32> {
    config: SimConfig,
    spawner: Spawner,
    state: GameState,
    leaderboard: HighScores,
    runs: u32,
    rng: R,
}

impl Simulation<Pcg32> {
    /// Deterministic simulation seeded from `seed`
    pub fn new(config: SimConfig, seed: u64) -> ConfigResult<Self> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Simulation with a random seed
    pub fn unseeded(config: SimConfig) -> ConfigResult<Self> {
        Self::new(config, rand::random())
    }
}

impl<R: Rng> Simulation<R> {
    /// Simulation drawing gap placement from `rng`
    pub fn with_rng(config: SimConfig, rng: R) -> ConfigResult<Self> {
        let spawner = Spawner::new(&config)?;
        let state = GameState::new(&config);
        Ok(Self {
            config,
            spawner,
            state,
            leaderboard: HighScores::new(),
            runs: 0,
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    /// Finished runs of this session, best first
    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    /// Idle -> Running. No-op in any other phase.
    pub fn start(&mut self) -> Option<GameEvent> {
        if self.state.phase != GamePhase::Idle {
            return None;
        }
        Some(self.begin_run())
    }

    /// GameOver -> Running. No-op in any other phase.
    pub fn reset(&mut self) -> Option<GameEvent> {
        if self.state.phase != GamePhase::GameOver {
            return None;
        }
        Some(self.begin_run())
    }

    /// Jump while Running; starts from Idle and resets from GameOver
    pub fn jump(&mut self) -> Option<GameEvent> {
        match self.state.phase {
            GamePhase::Idle => self.start(),
            GamePhase::GameOver => self.reset(),
            GamePhase::Running => {
                self.state.actor.vel = self.config.jump_impulse;
                Some(GameEvent::Jumped)
            }
        }
    }

    /// Apply `inputs` in order, then advance the simulation by `dt` seconds
    pub fn advance(&mut self, dt: f32, inputs: &[InputEvent]) -> Frame<'_> {
        let mut events = Vec::new();

        for input in inputs {
            match input {
                InputEvent::Tap => events.extend(self.jump()),
            }
        }

        let dt = clamp_dt(dt, self.config.max_frame_dt);
        if self.state.phase == GamePhase::Running && dt > 0.0 {
            self.spawner.update(&mut self.state, dt, &mut self.rng);
            let boundary = physics::step(&mut self.state, &self.config, dt);
            let resolution = resolver::resolve(&mut self.state, &self.config, &mut events);
            self.state.elapsed += dt;

            if let Some(cause) = boundary.or(resolution.collision) {
                events.extend(self.end_run(cause));
            }
        }

        Frame {
            state: &self.state,
            events,
        }
    }

    fn begin_run(&mut self) -> GameEvent {
        self.state.reset_run(&self.config);
        self.state.phase = GamePhase::Running;
        self.runs += 1;
        info!("Run {} started (high score {})", self.runs, self.state.high_score);
        GameEvent::Started
    }

    /// Running -> GameOver, at most once per run
    fn end_run(&mut self, cause: Collision) -> Option<GameEvent> {
        if self.state.phase != GamePhase::Running {
            return None;
        }
        self.state.phase = GamePhase::GameOver;

        self.state.record_high_score();
        let rank = self.leaderboard.add_score(HighScoreEntry {
            score: self.state.score,
            run: self.runs,
            elapsed: self.state.elapsed,
            pairs_spawned: self.state.pairs_spawned,
        });

        info!(
            "Game over ({:?}): score {}, high score {}{}",
            cause,
            self.state.score,
            self.state.high_score,
            if rank == Some(1) { " (new best)" } else { "" }
        );
        if let Some(rank) = rank {
            debug!("Run {} placed #{} on the leaderboard", self.runs, rank);
        }

        Some(GameEvent::GameOver {
            cause,
            score: self.state.score,
            high_score: self.state.high_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRAVITY, JUMP_IMPULSE as JUMP};
    use crate::sim::state::Edge;

    fn sim() -> Simulation {
        Simulation::new(SimConfig::default(), 12345).expect("valid config")
    }

    fn running() -> Simulation {
        let mut sim = sim();
        assert_eq!(sim.start(), Some(GameEvent::Started));
        sim
    }

    /// Push the actor past the top edge so the next frame ends the run
    fn crash(sim: &mut Simulation) {
        sim.state.actor.pos.y = -5.0;
    }

    /// Put one pair at `x` with its gap around the actor
    fn place_pair_around_actor(sim: &mut Simulation, x: f32) {
        let gap_top = sim.state.actor.pos.y + sim.state.actor.size.y / 2.0
            - sim.config.gap_size / 2.0;
        sim.spawner.spawn_pair(&mut sim.state, gap_top);
        for obstacle in &mut sim.state.obstacles {
            obstacle.pos.x = x;
        }
    }

    #[test]
    fn test_starts_idle_and_frozen() {
        let mut sim = sim();
        assert_eq!(sim.phase(), GamePhase::Idle);
        let y0 = sim.state.actor.pos.y;
        let frame = sim.advance(1.0, &[]);
        assert!(frame.events.is_empty());
        assert_eq!(frame.state.actor.pos.y, y0);
        assert!(frame.state.obstacles.is_empty());
    }

    #[test]
    fn test_tap_while_idle_starts() {
        let mut sim = sim();
        let frame = sim.advance(0.016, &[InputEvent::Tap]);
        assert_eq!(frame.events, vec![GameEvent::Started]);
        assert_eq!(frame.state.phase, GamePhase::Running);
        // Start does not also jump
        assert!(frame.state.actor.vel > 0.0);
    }

    #[test]
    fn test_invalid_commands_are_noops() {
        let mut sim = sim();
        assert_eq!(sim.reset(), None);
        assert_eq!(sim.phase(), GamePhase::Idle);

        sim.start();
        assert_eq!(sim.start(), None);
        assert_eq!(sim.reset(), None);
        assert_eq!(sim.phase(), GamePhase::Running);
    }

    #[test]
    fn test_jump_then_advance() {
        let mut sim = running();
        let y0 = sim.state.actor.pos.y;
        assert_eq!(sim.jump(), Some(GameEvent::Jumped));

        let dt = 0.1;
        let frame = sim.advance(dt, &[]);
        let expected_vel = JUMP + GRAVITY * dt;
        assert!((frame.state.actor.vel - expected_vel).abs() < 1e-3);
        assert!(frame.state.actor.pos.y < y0);
    }

    #[test]
    fn test_tap_emits_jumped_in_order() {
        let mut sim = running();
        let frame = sim.advance(0.016, &[InputEvent::Tap, InputEvent::Tap]);
        assert_eq!(frame.events, vec![GameEvent::Jumped, GameEvent::Jumped]);
    }

    #[test]
    fn test_bottom_edge_exact_ends_run() {
        let mut sim = running();
        // Land exactly on the bottom edge this frame
        let dt = 0.05;
        sim.state.actor.vel = 0.0;
        let drop = GRAVITY * dt * dt;
        sim.state.actor.pos.y = sim.config.playfield_height - sim.state.actor.size.y - drop;

        let frame = sim.advance(dt, &[]);
        assert!(frame.game_over());
        assert!(matches!(
            frame.events.last(),
            Some(GameEvent::GameOver {
                cause: Collision::Boundary(Edge::Bottom),
                ..
            })
        ));
        assert_eq!(sim.phase(), GamePhase::GameOver);

        // Frozen afterwards
        let before = serde_json::to_string(sim.state()).expect("serializable");
        let frame = sim.advance(0.05, &[]);
        assert!(frame.events.is_empty());
        let after = serde_json::to_string(frame.state).expect("serializable");
        assert_eq!(before, after);
    }

    #[test]
    fn test_pass_through_gap_scores_once() {
        let mut sim = running();
        // Pair just ahead of the actor's left edge, gap around the actor
        let x = sim.config.actor_x - sim.config.obstacle_width + 1.0;
        place_pair_around_actor(&mut sim, x);

        let mut scored = Vec::new();
        for _ in 0..5 {
            let frame = sim.advance(0.02, &[]);
            assert!(!frame.game_over());
            scored.extend(
                frame
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::Scored { .. }))
                    .copied(),
            );
        }
        assert_eq!(scored, vec![GameEvent::Scored { score: 1 }]);
        assert_eq!(sim.score(), 1);
    }

    #[test]
    fn test_obstacle_hit_ends_run_once() {
        let mut sim = running();
        let gap_top = sim.config.max_gap_top();
        sim.spawner.spawn_pair(&mut sim.state, gap_top);
        let upper_id = sim.state.obstacles[0].id;
        for obstacle in &mut sim.state.obstacles {
            obstacle.pos.x = sim.config.actor_x;
        }
        sim.state.score = 3;

        let frame = sim.advance(0.016, &[]);
        assert_eq!(
            frame.events,
            vec![GameEvent::GameOver {
                cause: Collision::Obstacle { id: upper_id },
                score: 3,
                high_score: 3,
            }]
        );
        assert_eq!(sim.high_score(), 3);
        assert_eq!(sim.leaderboard().top_score(), Some(3));

        // Still overlapping, but frozen: no second game over
        for _ in 0..3 {
            assert!(sim.advance(0.016, &[]).events.is_empty());
        }
        assert_eq!(sim.leaderboard().entries.len(), 1);
    }

    #[test]
    fn test_tap_after_game_over_resets() {
        let mut sim = running();
        sim.state.score = 5;
        crash(&mut sim);
        assert!(sim.advance(0.016, &[]).game_over());

        let frame = sim.advance(0.016, &[InputEvent::Tap]);
        assert_eq!(frame.events, vec![GameEvent::Started]);
        assert_eq!(frame.state.phase, GamePhase::Running);
        assert_eq!(frame.state.score, 0);
        assert_eq!(frame.state.high_score, 5);
        assert!(frame.state.obstacles.is_empty());
    }

    #[test]
    fn test_high_score_keeps_maximum() {
        let mut sim = running();
        sim.state.score = 8;
        crash(&mut sim);
        sim.advance(0.016, &[]);
        assert_eq!(sim.high_score(), 8);

        sim.reset();
        sim.state.score = 2;
        crash(&mut sim);
        sim.advance(0.016, &[]);
        assert_eq!(sim.high_score(), 8);
        assert_eq!(sim.leaderboard().entries.len(), 2);
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.016, 0.1), 0.016);
        assert_eq!(clamp_dt(5.0, 0.1), 0.1);
        assert_eq!(clamp_dt(f32::INFINITY, 0.1), 0.1);
        assert_eq!(clamp_dt(-0.5, 0.1), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 0.1), 0.0);
    }

    #[test]
    fn test_negative_delta_is_noop() {
        let mut sim = running();
        let y0 = sim.state.actor.pos.y;
        let frame = sim.advance(-1.0, &[]);
        assert!(frame.events.is_empty());
        assert_eq!(frame.state.actor.pos.y, y0);
        assert_eq!(frame.state.elapsed, 0.0);
    }

    #[test]
    fn test_frame_hitch_is_clamped() {
        let mut sim = running();
        sim.advance(10.0, &[]);
        assert!((sim.state.elapsed - sim.config.max_frame_dt).abs() < 1e-6);
        // A 10 s hitch would have spawned several pairs unclamped
        assert!(sim.state.obstacles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = Simulation::new(SimConfig::default(), 99999).expect("valid config");
        let mut b = Simulation::new(SimConfig::default(), 99999).expect("valid config");

        for i in 0..600 {
            let inputs: &[InputEvent] = if i % 20 == 0 { &[InputEvent::Tap] } else { &[] };
            let ea = a.advance(1.0 / 60.0, inputs).events;
            let eb = b.advance(1.0 / 60.0, inputs).events;
            assert_eq!(ea, eb);
        }

        let sa = serde_json::to_string(a.state()).expect("serializable");
        let sb = serde_json::to_string(b.state()).expect("serializable");
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_unseeded_starts_idle() {
        let sim = Simulation::unseeded(SimConfig::default()).expect("valid config");
        assert_eq!(sim.phase(), GamePhase::Idle);
        assert!(Simulation::unseeded(SimConfig {
            gap_size: 0.0,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_independent_instances() {
        let mut a = running();
        let b = running();
        a.state.score = 4;
        crash(&mut a);
        a.advance(0.016, &[]);
        assert_eq!(a.high_score(), 4);
        assert_eq!(b.high_score(), 0);
        assert_eq!(b.phase(), GamePhase::Running);
    }
}
