//! Procedural floor generation
//!
//! A floor is generated once, up front, from its index and a random source.
//! Placement never fails: obstacles that cannot be placed are dropped, and
//! items that cannot satisfy their constraints fall back to a fixed or
//! unconstrained position. Every such relaxation is written to the
//! [`PlacementReport`] so the host (and the tests) can see it.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyProfile, DifficultyTable};
use super::geometry::{Rect, within};
use crate::consts::{BONUS_ITEM_COUNT, ITEM_ATTEMPTS, OBSTACLE_ATTEMPTS};

/// Base floor names, cycled every ten floors
pub const FLOOR_NAMES: [&str; 10] = [
    "Meadow", "Forest", "Canyon", "Cliffs", "Cavern", "Ruins", "Wasteland", "Tundra", "Swamp",
    "Abyss",
];

/// Name modifiers, advanced once per full cycle of [`FLOOR_NAMES`]
pub const FLOOR_MODIFIERS: [&str; 10] = [
    "", "Dark ", "Frozen ", "Cursed ", "Ancient ", "Twisted ", "Shadow ", "Burning ", "Lost ",
    "Final ",
];

/// Obstacle orientation, derived purely from aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal platform
    Wide,
    /// Vertical wall
    Tall,
}

/// A solid axis-aligned obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.width, self.height)
    }

    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Tall
        } else {
            Orientation::Wide
        }
    }
}

/// Fractional sub-rectangle of the arena that one bonus item is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusZone {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl BonusZone {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// The zone in arena coordinates
    pub fn to_rect(&self, width: f32, height: f32) -> Rect {
        let arena = Rect::arena(width, height);
        Rect::new(
            arena.point_at_fraction(self.min_x, self.min_y),
            arena.point_at_fraction(self.max_x, self.max_y),
        )
    }
}

/// Placement constraints and obstacle dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Player spawn, measured from the bottom-left corner
    pub spawn_offset: Vec2,
    /// Goal, measured from the top-right corner
    pub goal_offset: Vec2,
    pub spawn_safe_radius: f32,
    pub goal_safe_radius: f32,

    pub obstacle_attempts: u32,
    /// Gap obstacles must keep from each other
    pub obstacle_padding: f32,
    /// Margin on the axis across an obstacle's length
    pub interior_margin: f32,
    /// Margin between an obstacle's end and the arena edge
    pub edge_margin: f32,
    pub wide_min_length: f32,
    pub wide_max_length: f32,
    pub wide_thickness: f32,
    pub tall_min_length: f32,
    pub tall_max_length: f32,
    pub tall_thickness: f32,

    pub item_attempts: u32,
    /// Band (fraction of each axis) the required item is drawn from
    pub required_band: (f32, f32),
    pub min_item_separation: f32,
    /// Extra clearance between an item and any obstacle
    pub item_obstacle_clearance: f32,
    pub bonus_zones: Vec<BonusZone>,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            spawn_offset: Vec2::new(80.0, 80.0),
            goal_offset: Vec2::new(60.0, 80.0),
            spawn_safe_radius: 100.0,
            goal_safe_radius: 80.0,

            obstacle_attempts: OBSTACLE_ATTEMPTS,
            obstacle_padding: 40.0,
            interior_margin: 150.0,
            edge_margin: 50.0,
            wide_min_length: 80.0,
            wide_max_length: 150.0,
            wide_thickness: 20.0,
            tall_min_length: 100.0,
            tall_max_length: 220.0,
            tall_thickness: 20.0,

            item_attempts: ITEM_ATTEMPTS,
            required_band: (0.3, 0.7),
            // Twice the per-item safe radius of 50
            min_item_separation: 100.0,
            item_obstacle_clearance: 20.0,
            bonus_zones: vec![
                BonusZone::new(0.1, 0.4, 0.1, 0.4), // Top-left
                BonusZone::new(0.6, 0.9, 0.5, 0.9), // Bottom-right
                BonusZone::new(0.5, 0.9, 0.1, 0.4), // Top-right
            ],
        }
    }
}

/// Record of every constraint that was relaxed while building a floor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub requested_obstacles: usize,
    pub omitted_obstacles: usize,
    /// Required item was put at the arena center after all attempts failed
    pub required_item_fallback: bool,
    /// Indices of bonus zones whose item ignores the separation rules
    pub bonus_fallbacks: Vec<usize>,
}

impl PlacementReport {
    /// True when every placement honoured every constraint
    pub fn is_clean(&self) -> bool {
        self.omitted_obstacles == 0 && !self.required_item_fallback && self.bonus_fallbacks.is_empty()
    }
}

/// A fully generated floor, handed to the host for scene construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub floor: u32,
    pub name: String,
    pub arena_width: f32,
    pub arena_height: f32,
    pub obstacles: Vec<Obstacle>,
    pub spawn_point: Vec2,
    pub goal_point: Vec2,
    pub required_item: Vec2,
    pub bonus_items: Vec<Vec2>,
    pub pursuer_count: usize,
    pub pursuer_speed_multiplier: f32,
    pub pursuer_spawns: Vec<Vec2>,
    pub report: PlacementReport,
}

impl LevelSpec {
    pub fn bounds(&self) -> Rect {
        Rect::arena(self.arena_width, self.arena_height)
    }
}

/// Display name for a floor, e.g. `Floor 12: Dark Forest`
pub fn level_name(floor: u32) -> String {
    let index = floor.max(1) as usize - 1;
    let name = FLOOR_NAMES[index % FLOOR_NAMES.len()];
    let modifier = FLOOR_MODIFIERS[(index / FLOOR_NAMES.len()) % FLOOR_MODIFIERS.len()];
    format!("Floor {}: {}{}", floor.max(1), modifier, name)
}

/// Uniform sample in `[lo, hi]`; an empty or inverted range yields `lo`
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

fn uniform_in<R: Rng + ?Sized>(rng: &mut R, rect: &Rect) -> Vec2 {
    Vec2::new(
        uniform(rng, rect.min.x, rect.max.x),
        uniform(rng, rect.min.y, rect.max.y),
    )
}

/// Floor generator: difficulty table plus placement rules
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    pub difficulty: DifficultyTable,
    pub tuning: LevelTuning,
}

impl LevelGenerator {
    pub fn new(difficulty: DifficultyTable, tuning: LevelTuning) -> Self {
        Self { difficulty, tuning }
    }

    /// Generate with a PCG stream derived from `seed` and the floor index
    pub fn generate_seeded(&self, floor: u32, seed: u64) -> LevelSpec {
        let floor_seed = (floor as u64).wrapping_mul(2654435761).wrapping_add(seed);
        let mut rng = Pcg32::seed_from_u64(floor_seed);
        self.generate(floor, &mut rng)
    }

    /// Generate a complete floor. Deterministic for a given rng state.
    pub fn generate<R: Rng + ?Sized>(&self, floor: u32, rng: &mut R) -> LevelSpec {
        let floor = floor.max(1);
        let profile = self.difficulty.profile(floor);
        let (width, height) = (profile.arena_width, profile.arena_height);
        let t = &self.tuning;

        // Fixed corners: spawn bottom-left, goal top-right
        let spawn_point = Vec2::new(t.spawn_offset.x, height - t.spawn_offset.y);
        let goal_point = Vec2::new(width - t.goal_offset.x, t.goal_offset.y);

        let mut report = PlacementReport {
            requested_obstacles: profile.obstacle_count,
            ..Default::default()
        };

        let obstacles = self.place_obstacles(&profile, spawn_point, goal_point, rng);
        report.omitted_obstacles = profile.obstacle_count - obstacles.len();
        if report.omitted_obstacles > 0 {
            log::warn!(
                "Floor {}: omitted {} of {} obstacles",
                floor,
                report.omitted_obstacles,
                profile.obstacle_count
            );
        }

        let placer = ItemPlacer {
            tuning: t,
            spawn_point,
            goal_point,
            obstacles: &obstacles,
        };
        let required_item = placer.place_required(width, height, rng, &mut report);
        let bonus_items = placer.place_bonus(width, height, required_item, rng, &mut report);
        log::debug!(
            "Floor {}: required item at {:?}, {} bonus items",
            floor,
            required_item,
            bonus_items.len()
        );

        let pursuer_spawns = pursuer_spawn_points(width, height, profile.pursuer_count, rng);

        let level = LevelSpec {
            floor,
            name: level_name(floor),
            arena_width: width,
            arena_height: height,
            obstacles,
            spawn_point,
            goal_point,
            required_item,
            bonus_items,
            pursuer_count: profile.pursuer_count,
            pursuer_speed_multiplier: profile.pursuer_speed_multiplier,
            pursuer_spawns,
            report,
        };

        log::info!(
            "{}: arena={}x{}, obstacles={}, pursuers={} (x{:.2} speed){}",
            level.name,
            width,
            height,
            level.obstacles.len(),
            level.pursuer_count,
            level.pursuer_speed_multiplier,
            if level.report.is_clean() { "" } else { ", relaxed placement" }
        );

        level
    }

    /// Rejection-sample each obstacle; drop it when the retry budget runs out
    fn place_obstacles<R: Rng + ?Sized>(
        &self,
        profile: &DifficultyProfile,
        spawn_point: Vec2,
        goal_point: Vec2,
        rng: &mut R,
    ) -> Vec<Obstacle> {
        let t = &self.tuning;
        let (width, height) = (profile.arena_width, profile.arena_height);
        let mut placed: Vec<Obstacle> = Vec::with_capacity(profile.obstacle_count);

        for _ in 0..profile.obstacle_count {
            for _ in 0..t.obstacle_attempts {
                let candidate = if rng.random::<f32>() < profile.tall_chance {
                    let len = uniform(rng, t.tall_min_length, t.tall_max_length);
                    let x = uniform(rng, t.interior_margin, width - t.interior_margin);
                    let y = uniform(
                        rng,
                        len / 2.0 + t.edge_margin,
                        height - len / 2.0 - t.edge_margin,
                    );
                    Obstacle::new(Vec2::new(x, y), t.tall_thickness, len)
                } else {
                    let len = uniform(rng, t.wide_min_length, t.wide_max_length);
                    let x = uniform(
                        rng,
                        len / 2.0 + t.edge_margin,
                        width - len / 2.0 - t.edge_margin,
                    );
                    let y = uniform(rng, t.interior_margin, height - t.interior_margin);
                    Obstacle::new(Vec2::new(x, y), len, t.wide_thickness)
                };

                if within(candidate.center, spawn_point, t.spawn_safe_radius)
                    || within(candidate.center, goal_point, t.goal_safe_radius)
                {
                    continue;
                }

                let rect = candidate.rect();
                let overlaps = placed
                    .iter()
                    .any(|o| rect.overlaps(&o.rect(), t.obstacle_padding));
                if !overlaps {
                    placed.push(candidate);
                    break;
                }
            }
        }

        placed
    }
}

/// Shared context for item placement on one floor
struct ItemPlacer<'a> {
    tuning: &'a LevelTuning,
    spawn_point: Vec2,
    goal_point: Vec2,
    obstacles: &'a [Obstacle],
}

impl ItemPlacer<'_> {
    fn is_valid(&self, pos: Vec2, existing: &[Vec2]) -> bool {
        let t = self.tuning;
        if within(pos, self.spawn_point, t.spawn_safe_radius)
            || within(pos, self.goal_point, t.goal_safe_radius)
        {
            return false;
        }
        if existing
            .iter()
            .any(|&item| within(pos, item, t.min_item_separation))
        {
            return false;
        }
        !self
            .obstacles
            .iter()
            .any(|o| o.rect().contains(pos, t.item_obstacle_clearance))
    }

    fn place_required<R: Rng + ?Sized>(
        &self,
        width: f32,
        height: f32,
        rng: &mut R,
        report: &mut PlacementReport,
    ) -> Vec2 {
        let (lo, hi) = self.tuning.required_band;
        let band = BonusZone::new(lo, hi, lo, hi).to_rect(width, height);

        for _ in 0..self.tuning.item_attempts {
            let pos = uniform_in(rng, &band);
            if self.is_valid(pos, &[]) {
                return pos;
            }
        }

        log::warn!("Required item fell back to the arena center");
        report.required_item_fallback = true;
        Rect::arena(width, height).center()
    }

    fn place_bonus<R: Rng + ?Sized>(
        &self,
        width: f32,
        height: f32,
        required_item: Vec2,
        rng: &mut R,
        report: &mut PlacementReport,
    ) -> Vec<Vec2> {
        let mut items = Vec::with_capacity(BONUS_ITEM_COUNT + 1);
        items.push(required_item);

        for (zone_index, zone) in self.tuning.bonus_zones.iter().enumerate() {
            let rect = zone.to_rect(width, height);
            let mut placed = None;

            for _ in 0..self.tuning.item_attempts {
                let pos = uniform_in(rng, &rect);
                if self.is_valid(pos, &items) {
                    placed = Some(pos);
                    break;
                }
            }

            // Best effort: keep the item in its zone even if it breaks spacing
            let pos = placed.unwrap_or_else(|| {
                log::warn!("Bonus zone {} exhausted its attempts, placing unconstrained", zone_index);
                report.bonus_fallbacks.push(zone_index);
                uniform_in(rng, &rect)
            });
            items.push(pos);
        }

        items.remove(0);
        items
    }
}

/// Pursuer spawn points along the arena edges, shuffled per floor.
///
/// Six fixed points are shuffled; pursuer `i` takes point `i % 6`, so packs
/// larger than six share spawn points.
pub fn pursuer_spawn_points<R: Rng + ?Sized>(
    width: f32,
    height: f32,
    count: usize,
    rng: &mut R,
) -> Vec<Vec2> {
    let mut points = [
        Vec2::new(width - 50.0, 100.0),
        Vec2::new(width - 50.0, height - 100.0),
        Vec2::new(width / 2.0, 50.0),
        Vec2::new(50.0, 50.0),
        Vec2::new(width - 100.0, height / 2.0),
        Vec2::new(width / 2.0, height - 50.0),
    ];
    points.shuffle(rng);

    (0..count).map(|i| points[i % points.len()]).collect()
}
