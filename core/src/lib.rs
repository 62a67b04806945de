#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use observation::*;
pub use rotation::*;
pub use types::*;

mod adjacency;
mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod observation;
mod rotation;
mod types;

pub const DEFAULT_ROTATION_MILLIS: u32 = 300;

const fn default_rotation_millis() -> u32 {
    DEFAULT_ROTATION_MILLIS
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub start_cell: StartCell,
    #[serde(default = "default_rotation_millis")]
    pub rotation_millis: u32,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            start_cell: StartCell::AlwaysZero,
            rotation_millis: DEFAULT_ROTATION_MILLIS,
        }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    pub const fn with_start_cell(mut self, start_cell: StartCell) -> Self {
        self.start_cell = start_cell;
        self
    }

    pub const fn with_rotation_millis(mut self, rotation_millis: u32) -> Self {
        self.rotation_millis = rotation_millis;
        self
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            log::warn!("Rejected game config: {}", err);
            GameError::InvalidConfig
        })?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self> {
        if !(2..=MAX_SIZE).contains(&self.size) {
            return Err(GameError::InvalidSize { size: self.size });
        }
        let max = self.total_cells();
        if self.mines > max {
            return Err(GameError::InvalidMineCount {
                requested: self.mines,
                max,
            });
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        surface_cells(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(9, 100)
    }
}

/// Outcome of flagging a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Change in the number of placed flags.
    pub const fn delta(self) -> i8 {
        match self {
            Self::NoChange => 0,
            Self::Flagged => 1,
            Self::Unflagged => -1,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when revealing several cells at once
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RotationOutcome {
    pub slice: Slice,
    pub moved: CellCount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_sizes_and_overfull_boards() {
        assert_eq!(GameConfig::new(1, 0), Err(GameError::InvalidSize { size: 1 }));
        assert_eq!(
            GameConfig::new(3, 55),
            Err(GameError::InvalidMineCount {
                requested: 55,
                max: 54
            })
        );
        assert!(GameConfig::new(3, 54).is_ok());
    }

    #[test]
    fn config_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{"size": 5, "mines": 5}"#).unwrap();

        assert_eq!(config, GameConfig::new_unchecked(5, 5));
        assert_eq!(config.start_cell, StartCell::AlwaysZero);
        assert_eq!(config.rotation_millis, DEFAULT_ROTATION_MILLIS);
    }

    #[test]
    fn config_from_json_rejects_garbage_and_invalid_values() {
        assert_eq!(GameConfig::from_json("{"), Err(GameError::InvalidConfig));
        assert_eq!(
            GameConfig::from_json(r#"{"size": 2, "mines": 30, "start_cell": "Random"}"#),
            Err(GameError::InvalidMineCount {
                requested: 30,
                max: 24
            })
        );
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;

        assert_eq!(Revealed | HitMine | Won, HitMine);
        assert_eq!(NoChange | Won, Won);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
