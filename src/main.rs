//! Pack Run headless runner
//!
//! Generates a run of floors and plays each one with a scripted player that
//! walks to the required item, then to the goal, while the pack hunts it.
//! Obstacles are not collided against; body physics belongs to a real host.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;

use pack_run::consts::*;
use pack_run::sim::geometry::within;
use pack_run::sim::{FloorProgress, GoalOutcome, LevelSpec, PlayerState, PursuitCoordinator};
use pack_run::tuning::DifficultyPreset;
use pack_run::{Tuning, TuningError};

#[derive(Parser, Debug)]
#[command(name = "pack-run", about = "Generate floors and run the pack against a scripted player")]
struct Args {
    /// Run seed; each floor mixes it with the floor number
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of floors to attempt
    #[arg(long, default_value_t = 5)]
    floors: u32,

    /// JSON tuning file (missing sections keep their defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Difficulty preset applied on top of the tuning
    #[arg(long, value_parser = parse_preset)]
    preset: Option<DifficultyPreset>,

    /// Print each generated floor as JSON
    #[arg(long)]
    dump_level: bool,

    /// Give up on a floor after this much simulated time
    #[arg(long, default_value_t = 90.0)]
    max_seconds: f32,
}

fn parse_preset(s: &str) -> Result<DifficultyPreset, String> {
    DifficultyPreset::from_str(s).ok_or_else(|| format!("unknown preset '{s}'"))
}

/// How a floor ended
#[derive(Debug, Clone, Copy, PartialEq)]
enum FloorResult {
    Cleared { elapsed_secs: f32 },
    Caught { elapsed_secs: f32 },
    TimedOut,
}

/// One floor in progress
struct FloorRun<'a> {
    level: &'a LevelSpec,
    tuning: &'a Tuning,
    pack: PursuitCoordinator,
    progress: FloorProgress,
    player: Vec2,
    bonus_items: Vec<Vec2>,
    now_ms: f64,
}

impl<'a> FloorRun<'a> {
    fn new(level: &'a LevelSpec, tuning: &'a Tuning, carried_score: u64) -> Self {
        Self {
            level,
            tuning,
            pack: PursuitCoordinator::for_level(level, tuning.pack.clone()),
            progress: FloorProgress::new(carried_score),
            player: level.spawn_point,
            bonus_items: level.bonus_items.clone(),
            now_ms: 0.0,
        }
    }

    fn elapsed_secs(&self) -> f32 {
        (self.now_ms / 1000.0) as f32
    }

    fn run(&mut self, max_seconds: f32) -> FloorResult {
        while self.elapsed_secs() < max_seconds {
            if let Some(result) = self.step(SIM_DT) {
                return result;
            }
        }
        FloorResult::TimedOut
    }

    /// Advance one fixed step; `Some` once the floor is over
    fn step(&mut self, dt: f32) -> Option<FloorResult> {
        let bounds = self.level.bounds();
        let target = if self.progress.has_required_item {
            self.level.goal_point
        } else {
            self.level.required_item
        };

        let to_target = target - self.player;
        let distance = to_target.length();
        let velocity = if distance > f32::EPSILON {
            to_target / distance * PLAYER_SPEED
        } else {
            Vec2::ZERO
        };
        self.player = if distance <= PLAYER_SPEED * dt {
            target
        } else {
            bounds.clamp_inset(self.player + velocity * dt, PLAYER_SIZE * 0.5)
        };

        self.pack.set_player(PlayerState::new(self.player, velocity));
        self.pack.tick(self.now_ms);

        let inset = self.pack.tuning().half_size();
        for (id, v) in self.pack.steering_commands() {
            let next = match self.pack.agent(id) {
                Some(agent) => bounds.clamp_inset(agent.position + v * dt, inset),
                None => continue,
            };
            self.pack.set_agent_position(id, next);
        }

        self.now_ms += f64::from(dt) * 1000.0;
        let elapsed_secs = self.elapsed_secs();

        let catch_radius = (PLAYER_SIZE + PURSUER_SIZE) * 0.5;
        if self
            .pack
            .agents()
            .iter()
            .any(|a| within(a.position, self.player, catch_radius))
        {
            return Some(FloorResult::Caught { elapsed_secs });
        }

        let score = &self.tuning.score;
        if within(self.player, self.level.required_item, PICKUP_RADIUS)
            && self.progress.collect_required(score) > 0
        {
            log::debug!("Floor {}: required item at {:.1}s", self.level.floor, elapsed_secs);
        }

        let player = self.player;
        let progress = &mut self.progress;
        self.bonus_items.retain(|&item| {
            if within(player, item, PICKUP_RADIUS) {
                progress.collect_bonus(score);
                false
            } else {
                true
            }
        });

        if within(self.player, self.level.goal_point, PICKUP_RADIUS) {
            match self.progress.reach_goal(score, elapsed_secs) {
                GoalOutcome::Completed { points } => {
                    log::debug!("Floor {}: goal worth {} points", self.level.floor, points);
                    return Some(FloorResult::Cleared { elapsed_secs });
                }
                GoalOutcome::MissingRequiredItem => {
                    log::trace!("Floor {}: goal refused, item missing", self.level.floor);
                }
                GoalOutcome::AlreadyCompleted => {}
            }
        }

        None
    }
}

fn load_tuning(args: &Args) -> Result<Tuning, TuningError> {
    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if let Some(preset) = args.preset {
        tuning.apply_preset(preset);
        log::info!("Applied {} preset", preset.as_str());
    }
    Ok(tuning)
}

fn run(args: &Args) -> Result<u64, TuningError> {
    let tuning = load_tuning(args)?;
    let generator = tuning.generator();
    log::info!("Pack Run starting with seed: {}", args.seed);

    let mut score = 0;
    for floor in 1..=args.floors.max(1) {
        let level = generator.generate_seeded(floor, args.seed);
        if args.dump_level {
            match serde_json::to_string_pretty(&level) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Failed to serialize floor {}: {}", floor, e),
            }
        }

        let mut floor_run = FloorRun::new(&level, &tuning, score);
        let result = floor_run.run(args.max_seconds);
        score = floor_run.progress.score;

        let bonus_total = level.bonus_items.len();
        match result {
            FloorResult::Cleared { elapsed_secs } => {
                println!(
                    "floor {:>2} {:<24} cleared in {:>5.1}s  bonus {}/{}  pack {}  score {}",
                    floor,
                    level.name,
                    elapsed_secs,
                    floor_run.progress.bonus_collected,
                    bonus_total,
                    level.pursuer_count,
                    score
                );
            }
            FloorResult::Caught { elapsed_secs } => {
                println!(
                    "floor {:>2} {:<24} caught after {:>5.1}s  pack {}  final score {}",
                    floor, level.name, elapsed_secs, level.pursuer_count, score
                );
                return Ok(score);
            }
            FloorResult::TimedOut => {
                println!(
                    "floor {:>2} {:<24} timed out after {:.0}s  final score {}",
                    floor, level.name, args.max_seconds, score
                );
                return Ok(score);
            }
        }
    }

    println!("run complete, final score {}", score);
    Ok(score)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("pack-run: {}", e);
            ExitCode::FAILURE
        }
    }
}
