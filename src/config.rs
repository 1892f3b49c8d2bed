use crate::common::BoardError;

pub const DEFAULT_GRID_SIZE: usize = 8;
pub const DEFAULT_SHIP_COUNT: usize = 8;
pub const DEFAULT_REGION_SIZE: usize = 2;
pub const DEFAULT_SHIELD_STRENGTH: u32 = 3;
pub const DEFAULT_SHIELD_DURATION: u32 = 1;

/// Largest grid whose cells fit in the `u128` boards used by [`crate::Board`].
pub const MAX_GRID_SIZE: usize = 11;

/// Plain parameters for a game. Nothing here is read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub grid_size: usize,
    pub ship_count: usize,
    pub shield_strength: u32,
    pub shield_duration: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            ship_count: DEFAULT_SHIP_COUNT,
            shield_strength: DEFAULT_SHIELD_STRENGTH,
            shield_duration: DEFAULT_SHIELD_DURATION,
        }
    }
}

impl GameConfig {
    /// Default configuration on an `grid_size×grid_size` grid.
    pub fn with_grid(grid_size: usize, ship_count: usize) -> Self {
        Self {
            grid_size,
            ship_count,
            ..Self::default()
        }
    }

    /// Reject configurations the engine cannot honour.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(BoardError::InvalidConfig("grid size must be between 1 and 11"));
        }
        if self.ship_count > self.grid_size * self.grid_size {
            return Err(BoardError::InvalidConfig("more ships than cells"));
        }
        if self.shield_duration == 0 {
            return Err(BoardError::InvalidConfig("shield duration must be at least one round"));
        }
        Ok(())
    }
}
