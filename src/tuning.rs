//! Data-driven game balance
//!
//! Every knob the generator and the pack read lives here. All sections are
//! optional in JSON; anything missing keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::sim::{DifficultyTable, LevelGenerator, LevelTuning, PackTuning, ScoreTuning};

/// Difficulty preset applied on top of the defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Casual,
    #[default]
    Standard,
    Brutal,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Casual => "Casual",
            DifficultyPreset::Standard => "Standard",
            DifficultyPreset::Brutal => "Brutal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" | "easy" => Some(DifficultyPreset::Casual),
            "standard" | "normal" => Some(DifficultyPreset::Standard),
            "brutal" | "hard" => Some(DifficultyPreset::Brutal),
            _ => None,
        }
    }
}

/// Complete tuning table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: DifficultyTable,
    pub level: LevelTuning,
    pub pack: PackTuning,
    pub score: ScoreTuning,
}

impl Tuning {
    /// Defaults with a preset applied
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Adjust pack size, pack speed and retarget cadence for a preset
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        match preset {
            DifficultyPreset::Casual => {
                self.difficulty.pursuer_count.max = 6.0;
                self.difficulty.pursuer_speed.base = 0.85;
                self.difficulty.pursuer_speed.max = 1.2;
                self.pack.recalc_interval_ms = 650.0;
            }
            DifficultyPreset::Standard => {}
            DifficultyPreset::Brutal => {
                self.difficulty.pursuer_count.base = 4.0;
                self.difficulty.pursuer_count.max = 10.0;
                self.difficulty.pursuer_speed.max = 1.6;
                self.pack.recalc_interval_ms = 350.0;
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generator for this tuning
    pub fn generator(&self) -> LevelGenerator {
        LevelGenerator::new(self.difficulty.clone(), self.level.clone())
    }

    /// Report every inverted range or negative increment.
    ///
    /// The core tolerates bad values without panicking, but hosts loading
    /// hand-edited files usually want to hear about them.
    pub fn validate(&self) -> Result<(), TuningError> {
        let mut problems = Vec::new();

        for (name, scaling) in self.difficulty.entries() {
            if scaling.per_floor < 0.0 {
                problems.push(format!("{name}: per_floor must not be negative"));
            }
            if scaling.base > scaling.max {
                problems.push(format!("{name}: base exceeds max"));
            }
        }
        if self.difficulty.tall_chance.max > 1.0 {
            problems.push("tall_chance: max above 1".to_string());
        }

        let l = &self.level;
        if l.wide_min_length > l.wide_max_length {
            problems.push("level: wide_min_length exceeds wide_max_length".to_string());
        }
        if l.tall_min_length > l.tall_max_length {
            problems.push("level: tall_min_length exceeds tall_max_length".to_string());
        }
        if l.required_band.0 > l.required_band.1 {
            problems.push("level: required_band is inverted".to_string());
        }
        for (i, zone) in l.bonus_zones.iter().enumerate() {
            let in_unit = |v: f32| (0.0..=1.0).contains(&v);
            if zone.min_x > zone.max_x || zone.min_y > zone.max_y {
                problems.push(format!("level: bonus zone {i} is inverted"));
            }
            if ![zone.min_x, zone.max_x, zone.min_y, zone.max_y]
                .into_iter()
                .all(in_unit)
            {
                problems.push(format!("level: bonus zone {i} leaves the arena"));
            }
        }

        let p = &self.pack;
        if p.recalc_interval_ms < 0.0 {
            problems.push("pack: recalc_interval_ms must not be negative".to_string());
        }
        if p.agent_size < 0.0 || p.min_pack_spacing < 0.0 {
            problems.push("pack: sizes must not be negative".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TuningError::Invalid(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
        assert!(Tuning::from_preset(DifficultyPreset::Casual).validate().is_ok());
        assert!(Tuning::from_preset(DifficultyPreset::Brutal).validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "difficulty": { "pursuer_count": { "base": 5.0, "per_floor": 1.0, "max": 9.0 } },
            "pack": { "recalc_interval_ms": 250.0 }
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.difficulty.pursuer_count.base, 5.0);
        assert_eq!(tuning.difficulty.arena_width.base, 850.0);
        assert_eq!(tuning.pack.recalc_interval_ms, 250.0);
        assert_eq!(tuning.pack.flank_distance, 200.0);
        assert_eq!(tuning.level.bonus_zones.len(), 3);
        assert_eq!(tuning.generator().difficulty.profile(1).pursuer_count, 5);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::from_preset(DifficultyPreset::Brutal);
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_validate_collects_problems() {
        let mut tuning = Tuning::default();
        tuning.difficulty.obstacle_count.per_floor = -1.0;
        tuning.level.wide_min_length = 500.0;
        tuning.level.bonus_zones[0].max_x = 1.5;

        match tuning.validate() {
            Err(TuningError::Invalid(problems)) => {
                assert_eq!(problems.len(), 3, "{:?}", problems);
                assert!(problems[0].starts_with("obstacle_count"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(DifficultyPreset::from_str("HARD"), Some(DifficultyPreset::Brutal));
        assert_eq!(DifficultyPreset::from_str("casual"), Some(DifficultyPreset::Casual));
        assert_eq!(DifficultyPreset::from_str("nightmare"), None);
        assert_eq!(DifficultyPreset::default().as_str(), "Standard");
    }
}
