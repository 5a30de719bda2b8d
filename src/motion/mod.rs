//! Motion selection and per-frame driving.
//!
//! - [`ProfileId`] / [`MotionState`]: the procedural profiles and their carried state
//! - [`CustomParams`]: user-tunable parameters of the `custom` profile
//! - [`ClipSelector`]: embedded-clip override policy
//! - [`AnimationDriver`]: cancel-then-register scheduling of the active motion

pub mod driver;
pub mod params;
pub mod profile;
pub mod selector;

pub use driver::{ActiveMotion, AnimationDriver, DriverState};
pub use params::{CustomParam, CustomParams};
pub use profile::{MotionState, ProfileId, WalkPose};
pub use selector::{ClipPolicy, ClipSelector};
