//! Classical 4th-order Runge-Kutta time stepping
//!
//! Each step evaluates the derivative four times: once at the current state
//! and three times at staggered intermediate states. Every intermediate
//! state is an independent clone of the step's input, so no stage observes
//! mutations made while building a sibling stage.

use super::dynamics::{WheelDerivative, derive};
use super::state::WheelState;

/// Advance a state by `d` over `dt`, component-wise.
fn apply(wheel: &mut WheelState, d: &WheelDerivative, dt: f64) {
    debug_assert_eq!(wheel.bucket_count(), d.d_buckets.len());
    wheel.rotation += d.d_rotation * dt;
    wheel.angular_velocity += d.d_angular_velocity * dt;
    for (mass, rate) in wheel.buckets.iter_mut().zip(&d.d_buckets) {
        *mass += rate * dt;
    }
}

/// Clone `wheel` and advance the clone by `d` over `dt`.
fn advanced(wheel: &WheelState, d: &WheelDerivative, dt: f64) -> WheelState {
    let mut next = wheel.clone();
    apply(&mut next, d, dt);
    next
}

/// Advance the wheel by one RK4 step of size `dt` seconds.
///
/// Deterministic: identical input state and `dt` produce bit-identical
/// output. `dt` must be non-negative; the caller is responsible for clamping
/// it to a sane maximum when frames are delayed.
pub fn integrate(wheel: &mut WheelState, dt: f64) {
    let k1 = derive(wheel);
    let k2 = derive(&advanced(wheel, &k1, dt / 2.0));
    let k3 = derive(&advanced(wheel, &k2, dt / 2.0));
    let k4 = derive(&advanced(wheel, &k3, dt));

    let mut combined = k1;
    combined.add_weighted(&k2, 2.0);
    combined.add_weighted(&k3, 2.0);
    combined.add_weighted(&k4, 1.0);
    apply(wheel, &combined, dt / 6.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DT_MAX, FILL_RATE};
    use proptest::prelude::*;

    fn bits(wheel: &WheelState) -> (u64, u64, Vec<u64>) {
        (
            wheel.rotation.to_bits(),
            wheel.angular_velocity.to_bits(),
            wheel.bucket_masses().iter().map(|m| m.to_bits()).collect(),
        )
    }

    #[test]
    fn test_zero_timestep_is_identity() {
        let mut wheel = WheelState::new(17, 5).unwrap();
        wheel.set_bucket_mass(3, 0.4);
        let before = bits(&wheel);

        integrate(&mut wheel, 0.0);
        assert_eq!(bits(&wheel), before);
    }

    #[test]
    fn test_integration_is_deterministic() {
        let mut a = WheelState::new(17, 1234).unwrap();
        let mut b = a.clone();

        for _ in 0..100 {
            integrate(&mut a, 1.0 / 60.0);
            integrate(&mut b, 1.0 / 60.0);
        }
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_symmetric_wheel_at_rest_stays_at_rest() {
        // Four empty buckets, bucket 0 under the spigot: no net torque, so
        // only bucket 0 gains water and the pose holds
        let mut wheel = WheelState::new(4, 0).unwrap();
        wheel.rotation = 0.0;
        wheel.angular_velocity = 0.0;

        let dt = 1.0 / 30.0;
        integrate(&mut wheel, dt);

        assert_eq!(wheel.rotation, 0.0);
        assert_eq!(wheel.angular_velocity, 0.0);
        // Spigot bump peaks at the fill rate; drain of the trickle collected
        // mid-step shaves off a sliver
        assert!((wheel.bucket_masses()[0] - FILL_RATE * dt).abs() < 1e-4);
        assert_eq!(wheel.bucket_masses()[1], 0.0);
        assert_eq!(wheel.bucket_masses()[2], 0.0);
        assert_eq!(wheel.bucket_masses()[3], 0.0);
    }

    #[test]
    fn test_spinning_empty_wheel_decays() {
        // Damping alone: |velocity| must shrink monotonically
        let mut wheel = WheelState::new(2, 9).unwrap();
        wheel.angular_velocity = 0.5;

        let mut prev = wheel.angular_velocity;
        for _ in 0..50 {
            integrate(&mut wheel, 0.01);
            assert!(wheel.angular_velocity.abs() < prev.abs());
            prev = wheel.angular_velocity;
        }
    }

    #[test]
    fn test_rotation_tracks_velocity() {
        // With no torque imbalance the first step moves rotation by roughly
        // velocity * dt
        let mut wheel = WheelState::new(2, 0).unwrap();
        wheel.rotation = 1.0;
        wheel.angular_velocity = 0.25;

        integrate(&mut wheel, 0.01);
        // Damping slows the wheel across the step, so the advance is a hair
        // under the kinematic estimate
        let moved = wheel.rotation - 1.0;
        assert!(moved > 0.0 && moved < 0.25 * 0.01);
        assert!((moved - 0.25 * 0.01).abs() < 1e-3);
    }

    #[test]
    fn test_long_run_stays_bounded() {
        // The attractor is chaotic but bounded: fill/drain cap each bucket
        // near fill_rate/drain_rate and damping caps the spin
        let mut wheel = WheelState::new(17, 77).unwrap();
        for _ in 0..5_000 {
            integrate(&mut wheel, DT_MAX);
        }
        assert!(wheel.rotation.is_finite());
        assert!(wheel.angular_velocity.abs() < 50.0);
        for &mass in wheel.bucket_masses() {
            assert!(mass.is_finite());
            assert!(mass < 5.0);
        }
    }

    proptest! {
        #[test]
        fn prop_zero_timestep_fixes_any_state(seed in any::<u64>(), n in 1usize..32) {
            let mut wheel = WheelState::new(n, seed).unwrap();
            let before = bits(&wheel);
            integrate(&mut wheel, 0.0);
            prop_assert_eq!(bits(&wheel), before);
        }

        #[test]
        fn prop_integration_is_deterministic(seed in any::<u64>(), dt in 0.0f64..DT_MAX) {
            let mut a = WheelState::new(17, seed).unwrap();
            let mut b = a.clone();
            for _ in 0..10 {
                integrate(&mut a, dt);
                integrate(&mut b, dt);
            }
            prop_assert_eq!(bits(&a), bits(&b));
        }

        #[test]
        fn prop_clamped_steps_stay_finite(seed in any::<u64>(), dt in 1e-4f64..DT_MAX) {
            let mut wheel = WheelState::new(17, seed).unwrap();
            for _ in 0..200 {
                integrate(&mut wheel, dt);
            }
            prop_assert!(wheel.rotation.is_finite());
            prop_assert!(wheel.angular_velocity.is_finite());
            prop_assert!(wheel.bucket_masses().iter().all(|m| m.is_finite()));
        }
    }
}
