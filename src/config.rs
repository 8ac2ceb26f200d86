use crate::error::{RankError, Result};

pub const DEFAULT_NUM_COLORS: usize = 10;
pub const DEFAULT_TOLERANCE: u32 = 10;

/// Parameters of a single ranking run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankConfig {
    /// Number of entries in the output, padded with white if needed.
    pub num_colors: usize,
    /// Per-channel matching window between a pixel and a seed color.
    pub tolerance: u32,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            num_colors: DEFAULT_NUM_COLORS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl RankConfig {
    pub fn new(num_colors: usize, tolerance: u32) -> Self {
        Self {
            num_colors,
            tolerance,
        }
    }

    /// Build a config from caller-supplied signed numbers, as they arrive
    /// from JavaScript. Negative tolerances and non-positive color counts are
    /// rejected instead of wrapping.
    pub fn from_signed(num_colors: i64, tolerance: i64) -> Result<Self> {
        let num_colors = usize::try_from(num_colors)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                RankError::InvalidConfig(format!("num_colors must be at least 1, got {num_colors}"))
            })?;
        let tolerance = u32::try_from(tolerance).map_err(|_| {
            RankError::InvalidConfig(format!("tolerance must be non-negative, got {tolerance}"))
        })?;
        Ok(Self::new(num_colors, tolerance))
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_colors == 0 {
            return Err(RankError::InvalidConfig(
                "num_colors must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// k-means settings for building a seed palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedConfig {
    pub max_iterations: usize,
    pub convergence: f32,
    pub random_seed: u64,
    /// Longest side to shrink the image to before clustering. Ranking always
    /// runs on the full-resolution pixels.
    pub downscale: Option<u32>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            convergence: 1e-4,
            random_seed: 0,
            downscale: None,
        }
    }
}
