//! Arm model for 3DOF handheld motion controllers
//!
//! This library estimates a believable world-space pose for the shoulder,
//! elbow, and wrist of the arm holding a motion controller, using only the
//! sensors such controllers actually have: an orientation quaternion, an
//! accelerometer, and the headset's own pose. No skeletal tracking
//! hardware is required.
//!
//! The model is a per-frame kinematic filter. Each update places a
//! shoulder anchor from the configured handedness, follows the user's
//! horizontal gaze with a smoothed torso direction, filters gravity and
//! noise out of the controller accelerometer, solves elbow and wrist poses
//! through extension-weighted quaternion interpolation, and fades the
//! rendered controller near the face for comfort.
//!
//! # Features
//!
//! - Gaze-driven torso tracking (always, during head motion, or never)
//! - Gravity-calibrated acceleration and velocity filtering with drift
//!   suppression and reconnect-safe resets
//! - Extension-ratio elbow placement from controller pitch, with optional
//!   accelerometer-integrated elbow displacement
//! - Distance-based controller and tooltip transparency with hysteresis
//!   bands
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::{UnitQuaternion, Vector3};
//! use arm_model::{ArmModel, SensorFrame};
//!
//! let mut arm = ArmModel::new();
//!
//! // One snapshot per rendered frame
//! let frame = SensorFrame {
//!     connected: true,
//!     acceleration: Vector3::new(0.0, 9.807, 0.0), // device frame, m/s²
//!     orientation: UnitQuaternion::identity(),
//!     gyro: Vector3::zeros(),
//!     head_direction: Vector3::new(0.0, 0.0, -1.0),
//!     head_position: Vector3::zeros(),
//!     delta_time: 0.016,
//! };
//! arm.update(&frame);
//!
//! // Feed the renderer
//! let position = arm.controller_position();
//! let rotation = arm.controller_rotation();
//! let alpha = arm.controller_alpha();
//! # let _ = (position, rotation, alpha);
//! ```

mod arm;
pub mod fade;
pub mod filter;
mod math;
mod types;

// Re-export all public types and functions
pub use arm::ArmModel;
pub use fade::Transparency;
pub use filter::AccelFilter;
pub use math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext, shortest_arc};
pub use types::*;
