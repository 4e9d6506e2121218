//! Driver configuration
//!
//! Persisted as JSON, separate from simulation snapshots. The driver owns
//! time: it derives a frame delta from its frame rate, scales it, and clamps
//! it before handing it to the integrator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::WheelParams;

/// Driver settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSettings {
    /// Number of buckets around the rim
    pub bucket_count: usize,
    /// Fixed run seed; `None` draws a fresh seed at startup
    pub seed: Option<u64>,
    /// Upper clamp applied to every frame delta (seconds)
    pub dt_max: f64,
    /// Wall-clock elapsed time to simulation time scale
    pub time_scale: f64,
    /// Physical coefficients
    #[serde(default)]
    pub params: WheelParams,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            seed: None,
            dt_max: DT_MAX,
            time_scale: TIME_SCALE,
            params: WheelParams::default(),
        }
    }
}

impl SimSettings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Simulation delta for one frame at the given frame rate: elapsed time
    /// scaled by `time_scale`, clamped to `dt_max`
    pub fn frame_dt(&self, fps: f64) -> f64 {
        (self.time_scale / fps).clamp(0.0, self.dt_max)
    }
}
