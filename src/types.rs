//! Core types and configuration for the arm model

use nalgebra::{UnitQuaternion, Vector3};

/// Which hand holds the controller
///
/// Controls the side of the body the virtual shoulder anchor is placed on.
/// All anatomical offsets are authored for the right arm and mirrored
/// through a per-axis multiplier for the left.
///
/// # Example
/// ```
/// use arm_model::{ArmModel, Handedness};
///
/// let mut arm = ArmModel::new();
/// arm.set_handedness(Handedness::Left);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handedness {
    /// Controller held in the right hand
    #[default]
    Right,
    /// Controller held in the left hand
    Left,
    /// Handedness not reported by the platform
    ///
    /// The shoulder anchor collapses onto the body midline.
    Unknown,
}

/// Policy controlling whether the virtual torso follows head gaze
///
/// The arm hangs from a shoulder anchor oriented by an estimated torso
/// facing direction. This policy decides how that direction tracks the
/// horizontal component of the user's gaze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GazeBehavior {
    /// Torso orientation is frozen at its current value
    Never,
    /// Torso turns toward the gaze only during rotational motion
    ///
    /// Blend strength grows with angular speed, capped at 10% per frame,
    /// and is zero below 0.2 rad/s. Not yet validated against real sensor
    /// traces; prefer [`GazeBehavior::Always`] until it has been.
    DuringMotion,
    /// Torso tracks the horizontal gaze direction every frame
    #[default]
    Always,
}

/// Arm model configuration
///
/// All fields take effect on the next [`update`](crate::ArmModel::update)
/// call. Out-of-range values are accepted as-is; behavior degrades
/// gracefully (for example, inverted fade thresholds collapse the tooltip
/// visibility band) rather than failing.
///
/// # Example
/// ```
/// use arm_model::{ArmModel, ArmModelSettings, GazeBehavior, Handedness};
///
/// let settings = ArmModelSettings {
///     handedness: Handedness::Left,
///     follow_gaze: GazeBehavior::Never,
///     use_accelerometer: true,
///     ..Default::default()
/// };
/// let arm = ArmModel::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArmModelSettings {
    /// Extra height added to the resting elbow position, in meters
    pub added_elbow_height: f32,
    /// Extra depth added to the resting elbow position, in meters
    pub added_elbow_depth: f32,
    /// Downward tilt of the laser pointer relative to the controller, in degrees
    ///
    /// Exposed for renderers; the joint solver itself does not consume it.
    pub pointer_tilt_angle: f32,
    /// How the torso facing direction tracks head gaze
    pub follow_gaze: GazeBehavior,
    /// Which hand holds the controller
    pub handedness: Handedness,
    /// Whether to track elbow displacement from the accelerometer
    ///
    /// When disabled, arm extension is approximated from controller pitch
    /// alone and the elbow displacement offset stays zero.
    pub use_accelerometer: bool,
    /// Distance from the face below which the controller fades out, in meters
    pub fade_distance_from_face: f32,
    /// Distance from the face beyond which tooltips fade out, in meters
    ///
    /// Tooltips are only visible between this and
    /// [`fade_distance_from_face`](Self::fade_distance_from_face).
    pub tooltip_min_distance_from_face: f32,
}

impl Default for ArmModelSettings {
    fn default() -> Self {
        Self {
            added_elbow_height: 0.0,
            added_elbow_depth: 0.0,
            pointer_tilt_angle: 15.0,
            follow_gaze: GazeBehavior::default(),
            handedness: Handedness::default(),
            use_accelerometer: false,
            fade_distance_from_face: 0.32,
            tooltip_min_distance_from_face: 0.45,
        }
    }
}

/// One frame of sensor input
///
/// The caller assembles one snapshot per rendered frame from the head
/// tracker and the controller, and passes it to
/// [`update`](crate::ArmModel::update). All vectors are in the world frame
/// except [`acceleration`](Self::acceleration), which is in the
/// controller's device frame.
///
/// # Example
/// ```
/// use nalgebra::{UnitQuaternion, Vector3};
/// use arm_model::SensorFrame;
///
/// let frame = SensorFrame {
///     connected: true,
///     acceleration: Vector3::new(0.0, 9.807, 0.0),
///     orientation: UnitQuaternion::identity(),
///     head_direction: Vector3::new(0.0, 0.0, -1.0),
///     delta_time: 0.016,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SensorFrame {
    /// Whether the controller is currently connected and tracking
    pub connected: bool,
    /// Raw accelerometer reading in the device frame, in m/s²
    pub acceleration: Vector3<f32>,
    /// Controller orientation, device frame to world frame
    pub orientation: UnitQuaternion<f32>,
    /// Angular velocity from the controller's gyroscope, in rad/s
    pub gyro: Vector3<f32>,
    /// Direction the head is facing
    pub head_direction: Vector3<f32>,
    /// Position of the head
    ///
    /// Exposed for renderers; the joint solver itself does not consume it.
    pub head_position: Vector3<f32>,
    /// Time elapsed since the previous frame, in seconds (> 0)
    pub delta_time: f32,
}

impl Default for SensorFrame {
    fn default() -> Self {
        Self {
            connected: false,
            acceleration: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            gyro: Vector3::zeros(),
            head_direction: Vector3::zeros(),
            head_position: Vector3::zeros(),
            delta_time: 1.0 / 60.0,
        }
    }
}
