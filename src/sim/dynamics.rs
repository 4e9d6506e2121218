//! Derivative computation for the wheel
//!
//! The model: gravity torques each bucket's water toward the bottom, damping
//! opposes rotation, every bucket drains in proportion to its own mass, and a
//! stationary spigot at the top fills whichever bucket sits under it. Water
//! on the rim also adds to the wheel's moment of inertia.

use super::state::WheelState;

/// Instantaneous rates of change at a given wheel state
///
/// One of these is produced per RK4 stage and discarded after the stages are
/// combined.
#[derive(Debug, Clone)]
pub struct WheelDerivative {
    /// Rate of change of rotation (rad/sec)
    pub d_rotation: f64,
    /// Rate of change of angular velocity (rad/sec^2)
    pub d_angular_velocity: f64,
    /// Rate of change of each bucket's mass (slug/sec)
    pub d_buckets: Vec<f64>,
}

impl WheelDerivative {
    /// Accumulate `weight * other` into self, component-wise. Used to build
    /// the RK4 combination k1 + 2k2 + 2k3 + k4.
    pub(crate) fn add_weighted(&mut self, other: &Self, weight: f64) {
        debug_assert_eq!(self.d_buckets.len(), other.d_buckets.len());
        self.d_rotation += weight * other.d_rotation;
        self.d_angular_velocity += weight * other.d_angular_velocity;
        for (rate, other_rate) in self.d_buckets.iter_mut().zip(&other.d_buckets) {
            *rate += weight * other_rate;
        }
    }
}

/// Compute the instantaneous time-derivative of a wheel state.
///
/// Pure function: the input is not mutated and no other state is read.
pub fn derive(wheel: &WheelState) -> WheelDerivative {
    let p = &wheel.params;

    // Moment of inertia: water on the rim contributes at the wheel radius
    let inertia = wheel.total_mass() * p.radius * p.radius + p.base_inertia;

    // Net torque: damping plus each bucket's gravitational pull
    let mut torque = -p.damping * wheel.angular_velocity;
    let rg = p.radius * p.gravity;
    for (i, mass) in wheel.buckets.iter().enumerate() {
        torque += rg * mass * wheel.bucket_angle(i).sin();
    }

    // Drain and spigot per bucket. The spigot covers a single bucket-width
    // arc at the top: a bucket is eligible only while it is closer to the
    // top than any neighboring bucket slot. The fill profile is a smooth
    // bump peaking at the top and vanishing at the eligibility boundary, so
    // the derivative stays continuous as buckets enter and leave the arc.
    let gate = wheel.bucket_spacing().cos().abs();
    let peak = p.fill_rate / 2.0;
    let n = wheel.bucket_count() as f64;
    let d_buckets = wheel
        .buckets
        .iter()
        .enumerate()
        .map(|(i, mass)| {
            let theta = wheel.bucket_angle(i);
            let mut rate = -p.drain_rate * mass;
            if theta.cos() > gate {
                // Principal angle in (-π/2, π/2), centered on the spigot
                let local = theta.tan().atan();
                rate += peak * ((n * local / 2.0).cos() + 1.0);
            }
            rate
        })
        .collect();

    WheelDerivative {
        d_rotation: wheel.angular_velocity,
        d_angular_velocity: torque / inertia,
        d_buckets,
    }
}
