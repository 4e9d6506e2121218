//! Wheel state and physical parameters
//!
//! Everything the integrator advances or reads lives here. The parameter set
//! is fixed at construction and never touched by the integrator.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Physical coefficients of the wheel, constant for the lifetime of a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelParams {
    /// Damping torque coefficient (ft*lbf/rad/sec)
    pub damping: f64,
    /// Moment of inertia of the empty wheel (slug*ft^2)
    pub base_inertia: f64,
    /// Drain rate per bucket (slug/sec/slug)
    pub drain_rate: f64,
    /// Fill rate of the overhead spigot (slug/sec)
    pub fill_rate: f64,
    /// Acceleration due to gravity (ft/sec^2)
    pub gravity: f64,
    /// Radius of the wheel (ft)
    pub radius: f64,
}

impl Default for WheelParams {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            base_inertia: BASE_INERTIA,
            drain_rate: DRAIN_RATE,
            fill_rate: FILL_RATE,
            gravity: GRAVITY,
            radius: RADIUS,
        }
    }
}

/// Complete wheel state (deterministic, serializable)
///
/// `rotation` is the angular position of bucket 0 and is unbounded; it
/// accumulates across revolutions. The bucket vector is private so its
/// length stays equal to the bucket count for the life of the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Physical coefficients
    pub params: WheelParams,
    /// Angular position of bucket 0 (rad)
    pub rotation: f64,
    /// Angular velocity (rad/sec), signed
    pub angular_velocity: f64,
    /// Water mass held by each bucket (slug)
    pub(crate) buckets: Vec<f64>,
}

impl WheelState {
    /// Create a wheel with default physical parameters, a seeded-random
    /// initial pose, and empty buckets.
    pub fn new(bucket_count: usize, seed: u64) -> Result<Self> {
        Self::with_params(bucket_count, WheelParams::default(), seed)
    }

    /// Create a wheel with explicit physical parameters.
    ///
    /// Rotation starts uniform in [0, 2π) and angular velocity uniform in
    /// [-0.5, 0.5], both drawn from a PCG stream seeded by `seed`.
    pub fn with_params(bucket_count: usize, params: WheelParams, seed: u64) -> Result<Self> {
        if bucket_count < 1 {
            return Err(Error::InvalidBucketCount(bucket_count));
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let rotation = rng.random_range(0.0..TAU);
        let angular_velocity = rng.random_range(-0.5..=0.5);

        Ok(Self {
            seed,
            params,
            rotation,
            angular_velocity,
            buckets: vec![0.0; bucket_count],
        })
    }

    /// Number of buckets around the rim
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Angular spacing between adjacent buckets (rad)
    #[inline]
    pub fn bucket_spacing(&self) -> f64 {
        TAU / self.buckets.len() as f64
    }

    /// Angular position of bucket `i` (rad, unbounded like `rotation`)
    #[inline]
    pub fn bucket_angle(&self, i: usize) -> f64 {
        self.rotation + i as f64 * self.bucket_spacing()
    }

    /// Water mass per bucket, indexed by bucket
    #[inline]
    pub fn bucket_masses(&self) -> &[f64] {
        &self.buckets
    }

    /// Total water mass carried on the rim
    pub fn total_mass(&self) -> f64 {
        self.buckets.iter().sum()
    }

    /// Overwrite one bucket's mass, for scenario setup. The integrator
    /// never writes through this. Panics if `i` is out of range.
    pub fn set_bucket_mass(&mut self, i: usize, mass: f64) {
        self.buckets[i] = mass;
    }
}
