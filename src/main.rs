//! Flappy Core headless runner
//!
//! Drives the simulation the way a render loop would: uneven host frames,
//! a fixed-step accumulator, and an autopilot standing in for the player.
//!
//! Usage: `flappy-core [seed] [seconds] [config.json]`

use std::error::Error;

use flappy_core::consts::{MAX_SUBSTEPS, SIM_DT};
use flappy_core::sim::{GameEvent, GamePhase, GameState, InputEvent, ObstacleRole, Simulation};
use flappy_core::SimConfig;

/// Host frame times cycle through these to mimic an uneven display
const HOST_FRAMES: [f32; 4] = [1.0 / 50.0, 1.0 / 70.0, 1.0 / 45.0, 1.0 / 60.0];

/// Headless game instance
struct Game {
    sim: Simulation,
    accumulator: f32,
    pending: Vec<InputEvent>,
    runs_finished: u32,
}

impl Game {
    fn new(sim: Simulation) -> Self {
        Self {
            sim,
            accumulator: 0.0,
            pending: Vec::new(),
            runs_finished: 0,
        }
    }

    /// Run simulation steps for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if autopilot_wants_tap(self.sim.state(), self.sim.config()) {
                self.pending.push(InputEvent::Tap);
            }

            let inputs = std::mem::take(&mut self.pending);
            let frame = self.sim.advance(SIM_DT, &inputs);
            for event in &frame.events {
                match event {
                    GameEvent::Scored { score } => log::debug!("Scored: {}", score),
                    GameEvent::GameOver { .. } => self.runs_finished += 1,
                    GameEvent::Started | GameEvent::Jumped => {}
                }
            }

            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

/// Tap when the actor sinks below the centre of the next gap, or to
/// start/restart. Deliberately imperfect so runs end eventually.
fn autopilot_wants_tap(state: &GameState, config: &SimConfig) -> bool {
    if state.phase != GamePhase::Running {
        return true;
    }

    let actor = state.actor.bounds();
    let target = state
        .obstacles
        .iter()
        .find(|o| o.role == ObstacleRole::Upper && o.right() >= actor.left())
        .map(|o| {
            let (top, bottom) = o.gap(config.gap_size);
            (top + bottom) / 2.0
        })
        .unwrap_or(config.playfield_height / 2.0);

    let centre = (actor.top() + actor.bottom()) / 2.0;
    centre > target + actor.size.y && state.actor.vel > 0.0
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => rand::random(),
    };
    let seconds: f32 = match args.next() {
        Some(s) => s.parse()?,
        None => 60.0,
    };
    let config = match args.next() {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };

    log::info!("Flappy Core starting (seed {}, {} s)", seed, seconds);
    let mut game = Game::new(Simulation::new(config, seed)?);

    let mut elapsed = 0.0;
    let mut frame = 0;
    while elapsed < seconds {
        let dt = HOST_FRAMES[frame % HOST_FRAMES.len()];
        game.update(dt);
        elapsed += dt;
        frame += 1;
    }

    println!(
        "{} runs finished, high score {}",
        game.runs_finished,
        game.sim.high_score()
    );
    for (rank, entry) in game.sim.leaderboard().entries.iter().enumerate() {
        println!(
            "{:>2}. {:>4} pts  run {:<3} {:>6.1}s  {} pairs",
            rank + 1,
            entry.score,
            entry.run,
            entry.elapsed,
            entry.pairs_spawned
        );
    }

    Ok(())
}
