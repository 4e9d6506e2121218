//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Seeded RNG only, and only at construction
//! - No wall-clock reads; the driver supplies every time delta
//! - No rendering or platform dependencies

pub mod dynamics;
pub mod integrator;
pub mod state;

pub use dynamics::{WheelDerivative, derive};
pub use integrator::integrate;
pub use state::{WheelParams, WheelState};
