//! Main arm model implementation

use nalgebra::{UnitQuaternion, Vector3};

use crate::fade::Transparency;
use crate::filter::AccelFilter;
use crate::math::{RAD_TO_DEG, Vector3Ext, shortest_arc};
use crate::types::{ArmModelSettings, GazeBehavior, Handedness, SensorFrame};

/// Model-space axes
const FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);
const UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Anatomical constants, authored for the right arm in meters
const POINTER_OFFSET: Vector3<f32> = Vector3::new(0.0, -0.009, -0.109);
const DEFAULT_SHOULDER_RIGHT: Vector3<f32> = Vector3::new(0.19, -0.19, 0.03);
const DEFAULT_ELBOW_REST: Vector3<f32> = Vector3::new(0.195, -0.5, 0.075);
const WRIST_FROM_ELBOW: Vector3<f32> = Vector3::new(0.0, 0.0, -0.25);
const ARM_EXTENSION_OFFSET: Vector3<f32> = Vector3::new(-0.13, 0.14, -0.08);

/// Plausible range of elbow displacement, per axis
const ELBOW_MIN_RANGE: Vector3<f32> = Vector3::new(-0.05, -0.1, -0.2);
const ELBOW_MAX_RANGE: Vector3<f32> = Vector3::new(0.05, 0.1, 0.0);

/// Controller pitch range mapped onto the arm extension ratio, in degrees
const MIN_EXTENSION_ANGLE: f32 = 7.0;
const MAX_EXTENSION_ANGLE: f32 = 60.0;
const EXTENSION_WEIGHT: f32 = 0.4;

/// Gaze filtering for [`GazeBehavior::DuringMotion`]
const MIN_GAZE_ANGULAR_VELOCITY: f32 = 0.2; // rad/s
const GAZE_FILTER_DIVISOR: f32 = 45.0;
const MAX_GAZE_FILTER_STRENGTH: f32 = 0.1;

/// Epsilon below which a squared direction length counts as degenerate
const DIRECTION_EPSILON: f32 = 1e-6;

/// Arm model for a 3DOF handheld motion controller
///
/// Estimates world-space shoulder, elbow, and wrist poses from head gaze
/// and the controller's orientation sensors, one frame at a time. The
/// controller only reports orientation; positions are synthesized from a
/// fixed anatomical skeleton, a gaze-tracked torso direction, an
/// extension ratio derived from controller pitch, and (optionally) an
/// accelerometer-integrated elbow displacement.
///
/// One instance models one controller and owns all of its filter state.
/// Calls to [`update`](Self::update) must be strictly sequential; every
/// call runs a fixed number of vector and quaternion operations.
pub struct ArmModel {
    /// Model configuration, applied on the next update
    settings: ArmModelSettings,
    /// Wrist pose, the externally consumed controller transform
    wrist_position: Vector3<f32>,
    wrist_rotation: UnitQuaternion<f32>,
    /// Elbow pose
    elbow_position: Vector3<f32>,
    elbow_rotation: UnitQuaternion<f32>,
    /// Shoulder anchor pose
    shoulder_position: Vector3<f32>,
    shoulder_rotation: UnitQuaternion<f32>,
    /// Accelerometer-integrated elbow displacement
    elbow_offset: Vector3<f32>,
    /// Smoothed horizontal facing direction of the torso
    torso_direction: Vector3<f32>,
    /// Per-axis mirror derived from handedness
    handed_multiplier: Vector3<f32>,
    /// Acceleration and velocity filter
    filter: AccelFilter,
    /// Controller and tooltip visibility fade
    transparency: Transparency,
}

impl ArmModel {
    /// Create an arm model with default settings
    pub fn new() -> Self {
        Self::with_settings(ArmModelSettings::default())
    }

    /// Create an arm model with the specified settings
    pub fn with_settings(settings: ArmModelSettings) -> Self {
        let mut arm = ArmModel {
            settings,
            wrist_position: Vector3::zeros(),
            wrist_rotation: UnitQuaternion::identity(),
            elbow_position: Vector3::zeros(),
            elbow_rotation: UnitQuaternion::identity(),
            shoulder_position: Vector3::zeros(),
            shoulder_rotation: UnitQuaternion::identity(),
            elbow_offset: Vector3::zeros(),
            torso_direction: Vector3::zeros(),
            handed_multiplier: Vector3::zeros(),
            filter: AccelFilter::new(),
            transparency: Transparency::new(),
        };

        arm.update_handedness();
        arm
    }

    /// Advance the model by one frame of sensor input
    ///
    /// Places the shoulder for the configured handedness, tracks the torso
    /// direction from gaze, filters the accelerometer (or winds the filter
    /// down while disconnected), solves elbow and wrist poses, and fades
    /// the visibility alphas. Results are read back through the accessors.
    pub fn update(&mut self, frame: &SensorFrame) {
        self.update_handedness();
        self.update_torso_direction(frame);

        if frame.connected {
            self.filter
                .update(frame.acceleration, frame.orientation, frame.delta_time);
        } else {
            self.filter.reset();
        }

        if self.settings.use_accelerometer {
            self.filter.integrate_velocity(frame.delta_time);
            self.transform_elbow(frame.delta_time);
        } else {
            self.elbow_offset = Vector3::zeros();
        }

        self.apply_arm_model(frame);

        self.transparency.update(
            self.wrist_position.magnitude(),
            self.settings.fade_distance_from_face,
            self.settings.tooltip_min_distance_from_face,
            frame.delta_time,
        );
    }

    /// Place the shoulder anatomically for the configured hand
    fn update_handedness(&mut self) {
        let mirror = match self.settings.handedness {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
            Handedness::Unknown => 0.0,
        };
        self.handed_multiplier = Vector3::new(mirror, 1.0, 1.0);

        self.shoulder_rotation = UnitQuaternion::identity();
        self.shoulder_position = DEFAULT_SHOULDER_RIGHT.component_mul(&self.handed_multiplier);
    }

    /// Track the torso facing direction from head gaze and rotate the
    /// shoulder anchor to match
    fn update_torso_direction(&mut self, frame: &SensorFrame) {
        if self.settings.follow_gaze == GazeBehavior::Never {
            return;
        }

        // Only the horizontal component of the gaze drives the torso. A
        // head looking straight up or down leaves no usable heading, so
        // keep the previous torso state for the frame.
        let head_direction = frame.head_direction.horizontal();
        if head_direction.magnitude_squared() < DIRECTION_EPSILON {
            return;
        }
        let head_direction = head_direction.normalize();

        if self.settings.follow_gaze == GazeBehavior::Always {
            self.torso_direction = head_direction;
        } else {
            // DuringMotion: blend toward the gaze only during rotational
            // motion, at most 10% per frame.
            let angular_velocity = frame.gyro.magnitude();
            let gaze_filter_strength = ((angular_velocity - MIN_GAZE_ANGULAR_VELOCITY)
                / GAZE_FILTER_DIVISOR)
                .clamp(0.0, MAX_GAZE_FILTER_STRENGTH);
            self.torso_direction = self.torso_direction.lerp(&head_direction, gaze_filter_strength);
        }

        // Rotate the fixed joints.
        let gaze_rotation = shortest_arc(&FORWARD, &self.torso_direction);
        self.shoulder_rotation = gaze_rotation;
        self.shoulder_position = gaze_rotation * self.shoulder_position;
    }

    /// Apply the filtered velocity to the elbow displacement offset
    fn transform_elbow(&mut self, delta_time: f32) {
        self.elbow_offset += self.filter.velocity() * delta_time;
        self.elbow_offset = self.elbow_offset.clamp_each(&ELBOW_MIN_RANGE, &ELBOW_MAX_RANGE);
    }

    /// Solve elbow and wrist poses from the shoulder and controller
    /// orientations
    fn apply_arm_model(&mut self, frame: &SensorFrame) {
        // Controller orientation relative to the player's shoulder frame
        let controller_orientation = self.shoulder_rotation.inverse() * frame.orientation;

        // Relative joint positions before extension is applied
        let mut elbow_position = Vector3::new(
            DEFAULT_ELBOW_REST.x,
            DEFAULT_ELBOW_REST.y + self.settings.added_elbow_height,
            DEFAULT_ELBOW_REST.z + self.settings.added_elbow_depth,
        )
        .component_mul(&self.handed_multiplier)
            + self.elbow_offset;
        let wrist_position = WRIST_FROM_ELBOW.component_mul(&self.handed_multiplier);
        let arm_extension_offset = ARM_EXTENSION_OFFSET.component_mul(&self.handed_multiplier);

        // How far the controller is raised, from the pitch of its forward
        // vector against vertical
        let controller_forward = controller_orientation * FORWARD;
        let x_angle = 90.0 - controller_forward.angle(&UP) * RAD_TO_DEG;

        // Swing component of the controller rotation, with roll removed
        let xy_rotation = shortest_arc(&FORWARD, &controller_forward);

        // Offset the elbow by the extension ratio. With the accelerometer
        // active the displacement filter models this travel instead.
        let normalized_angle =
            (x_angle - MIN_EXTENSION_ANGLE) / (MAX_EXTENSION_ANGLE - MIN_EXTENSION_ANGLE);
        let extension_ratio = normalized_angle.clamp(0.0, 1.0);
        if !self.settings.use_accelerometer {
            elbow_position += arm_extension_offset * extension_ratio;
        }

        // Blend factor for the forearm: small swings follow the controller
        // almost directly, swings approaching a half turn are suppressed,
        // weighted by how extended the arm is
        let total_angle = xy_rotation.angle() * RAD_TO_DEG;
        let lerp_suppression = 1.0 - (total_angle / 180.0).powi(6);
        let lerp_value = lerp_suppression * (0.4 + 0.6 * extension_ratio * EXTENSION_WEIGHT);

        // Apply the absolute rotations to the joints
        let lerp_rotation = UnitQuaternion::identity().slerp(&xy_rotation, lerp_value);
        self.elbow_rotation =
            self.shoulder_rotation * lerp_rotation.inverse() * controller_orientation;
        self.wrist_rotation = self.shoulder_rotation * controller_orientation;

        // Determine the relative positions
        self.elbow_position = self.shoulder_rotation * elbow_position;
        self.wrist_position = self.elbow_position + self.elbow_rotation * wrist_position;
    }

    /// World-space controller (wrist) position
    pub fn controller_position(&self) -> Vector3<f32> {
        self.wrist_position
    }

    /// World-space controller (wrist) rotation
    pub fn controller_rotation(&self) -> UnitQuaternion<f32> {
        self.wrist_rotation
    }

    /// Offset of the laser pointer origin from the controller, in meters
    pub fn pointer_position_offset(&self) -> Vector3<f32> {
        POINTER_OFFSET
    }

    /// World-space elbow position
    pub fn elbow_position(&self) -> Vector3<f32> {
        self.elbow_position
    }

    /// World-space elbow rotation
    pub fn elbow_rotation(&self) -> UnitQuaternion<f32> {
        self.elbow_rotation
    }

    /// World-space shoulder anchor position
    pub fn shoulder_position(&self) -> Vector3<f32> {
        self.shoulder_position
    }

    /// World-space shoulder anchor rotation
    pub fn shoulder_rotation(&self) -> UnitQuaternion<f32> {
        self.shoulder_rotation
    }

    /// Smoothed horizontal torso facing direction
    pub fn torso_direction(&self) -> Vector3<f32> {
        self.torso_direction
    }

    /// Filtered controller velocity estimate, in m/s
    pub fn filtered_velocity(&self) -> Vector3<f32> {
        self.filter.velocity()
    }

    /// Gravity-compensated controller acceleration, in m/s²
    pub fn filtered_acceleration(&self) -> Vector3<f32> {
        self.filter.acceleration()
    }

    /// Running gravity bias estimate, in m/s²
    pub fn gravity_estimate(&self) -> Vector3<f32> {
        self.filter.gravity_estimate()
    }

    /// Controller visibility in [0, 1]
    pub fn controller_alpha(&self) -> f32 {
        self.transparency.controller_alpha()
    }

    /// Tooltip visibility in [0, 1]
    pub fn tooltip_alpha(&self) -> f32 {
        self.transparency.tooltip_alpha()
    }

    /// Replace the whole configuration at once
    pub fn set_settings(&mut self, settings: ArmModelSettings) {
        self.settings = settings;
    }

    /// Current configuration
    pub fn settings(&self) -> ArmModelSettings {
        self.settings
    }

    /// Extra height added to the resting elbow position, in meters
    pub fn added_elbow_height(&self) -> f32 {
        self.settings.added_elbow_height
    }

    /// Set the extra resting elbow height, in meters
    pub fn set_added_elbow_height(&mut self, elbow_height: f32) {
        self.settings.added_elbow_height = elbow_height;
    }

    /// Extra depth added to the resting elbow position, in meters
    pub fn added_elbow_depth(&self) -> f32 {
        self.settings.added_elbow_depth
    }

    /// Set the extra resting elbow depth, in meters
    pub fn set_added_elbow_depth(&mut self, elbow_depth: f32) {
        self.settings.added_elbow_depth = elbow_depth;
    }

    /// Downward pointer tilt relative to the controller, in degrees
    pub fn pointer_tilt_angle(&self) -> f32 {
        self.settings.pointer_tilt_angle
    }

    /// Set the pointer tilt, in degrees
    pub fn set_pointer_tilt_angle(&mut self, tilt_angle: f32) {
        self.settings.pointer_tilt_angle = tilt_angle;
    }

    /// How the torso facing direction tracks head gaze
    pub fn gaze_behavior(&self) -> GazeBehavior {
        self.settings.follow_gaze
    }

    /// Set the gaze-follow policy
    pub fn set_gaze_behavior(&mut self, gaze_behavior: GazeBehavior) {
        self.settings.follow_gaze = gaze_behavior;
    }

    /// Which hand holds the controller
    pub fn handedness(&self) -> Handedness {
        self.settings.handedness
    }

    /// Set the controller handedness
    pub fn set_handedness(&mut self, handedness: Handedness) {
        self.settings.handedness = handedness;
    }

    /// Whether elbow displacement tracking from the accelerometer is active
    pub fn use_accelerometer(&self) -> bool {
        self.settings.use_accelerometer
    }

    /// Enable or disable accelerometer-assisted elbow displacement
    pub fn set_use_accelerometer(&mut self, use_accelerometer: bool) {
        self.settings.use_accelerometer = use_accelerometer;
    }

    /// Distance from the face below which the controller fades out, in meters
    pub fn fade_distance_from_face(&self) -> f32 {
        self.settings.fade_distance_from_face
    }

    /// Set the controller fade distance, in meters
    pub fn set_fade_distance_from_face(&mut self, distance_from_face: f32) {
        self.settings.fade_distance_from_face = distance_from_face;
    }

    /// Distance from the face beyond which tooltips fade out, in meters
    pub fn tooltip_min_distance_from_face(&self) -> f32 {
        self.settings.tooltip_min_distance_from_face
    }

    /// Set the tooltip maximum distance, in meters
    pub fn set_tooltip_min_distance_from_face(&mut self, distance_from_face: f32) {
        self.settings.tooltip_min_distance_from_face = distance_from_face;
    }
}

impl Default for ArmModel {
    fn default() -> Self {
        Self::new()
    }
}
