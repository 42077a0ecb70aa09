use std::time::Duration;

/// Largest supported grid side
pub const MAX_GRID_SIDE: usize = 255;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Simulated time per snake step
    pub step_rate: Duration,
    /// Food items placed on reset, and kept on the board afterwards
    pub initial_food: usize,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 24,
            grid_height: 18,
            step_rate: Duration::from_millis(125),
            initial_food: 4,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err` with a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        for (name, side) in [("grid_width", self.grid_width), ("grid_height", self.grid_height)] {
            if !(2..=MAX_GRID_SIDE).contains(&side) {
                return Err(format!(
                    "{name} must be in [2, {MAX_GRID_SIDE}], got {side}"
                ));
            }
        }

        if self.step_rate.is_zero() {
            return Err("step_rate must be positive".to_string());
        }

        if self.initial_food == 0 {
            return Err("initial_food must be at least 1".to_string());
        }

        // The snake's first cell plus every food item must leave room to move.
        if self.initial_food + 1 >= self.cell_count() {
            return Err(format!(
                "initial_food ({}) leaves no free cell on a {}x{} grid",
                self.initial_food, self.grid_width, self.grid_height
            ));
        }

        Ok(())
    }
}
