//! Gravity-compensated acceleration and velocity filtering for the arm model

use nalgebra::{UnitQuaternion, Vector3};

/// Filter constants
const GRAVITY_FORCE: f32 = 9.807; // m/s²
const GRAVITY_CALIB_STRENGTH: f32 = 0.999;
const MIN_ACCEL: f32 = 1.0; // m/s²
const LOW_ACCEL_VELOCITY_DECAY: f32 = 0.9;
const VELOCITY_FILTER_SUPPRESS: f32 = 0.99;
const RESET_DECAY: f32 = 0.5;

/// Controller acceleration and velocity filter
///
/// Maintains a slowly calibrated gravity estimate, a gravity-compensated
/// linear acceleration, and an integrated velocity for a handheld
/// controller. The accelerometer is unreliable at low magnitudes, so small
/// readings are suppressed outright and the velocity decays toward rest
/// instead of drifting.
///
/// Losing controller tracking is not an error: [`reset`](Self::reset) winds
/// the state down and marks the next connected frame as a fresh start so a
/// stale velocity never carries across a reconnect.
#[derive(Debug, Clone, Copy)]
pub struct AccelFilter {
    /// Running estimate of the gravity bias in world space
    gravity_estimate: Vector3<f32>,
    /// Gravity-compensated acceleration for the current frame
    filtered_accel: Vector3<f32>,
    /// Integrated, decayed velocity estimate
    filtered_velocity: Vector3<f32>,
    /// Whether the next connected frame is the first since a reset
    first_update: bool,
}

impl AccelFilter {
    /// Create a filter at rest, with the gravity estimate seeded to
    /// standard gravity along +y
    pub fn new() -> Self {
        Self {
            gravity_estimate: Vector3::new(0.0, GRAVITY_FORCE, 0.0),
            filtered_accel: Vector3::zeros(),
            filtered_velocity: Vector3::zeros(),
            first_update: true,
        }
    }

    /// Filter one frame of accelerometer data from a connected controller
    ///
    /// Rotates the raw device-frame reading into world space, folds it into
    /// the gravity estimate, and derives the gravity-compensated
    /// acceleration. Velocity is only decayed here; integration happens in
    /// [`integrate_velocity`](Self::integrate_velocity) when
    /// accelerometer-assisted mode is active.
    ///
    /// # Arguments
    /// * `acceleration` - Raw accelerometer reading in the device frame, in m/s²
    /// * `orientation` - Controller orientation, device frame to world frame
    /// * `delta_time` - Time step in seconds
    pub fn update(
        &mut self,
        acceleration: Vector3<f32>,
        orientation: UnitQuaternion<f32>,
        delta_time: f32,
    ) {
        // Get the orientation-adjusted acceleration.
        let world_accel = orientation * acceleration;

        // Very slowly calibrate gravity force out of acceleration.
        self.gravity_estimate = self.gravity_estimate * GRAVITY_CALIB_STRENGTH
            + world_accel * (1.0 - GRAVITY_CALIB_STRENGTH);
        self.filtered_accel = world_accel - self.gravity_estimate;

        // If no tracking history, start the velocity from rest.
        if self.first_update {
            self.filtered_velocity = Vector3::zeros();
            self.first_update = false;
        }

        // The accelerometer is not reliable at these low magnitudes,
        // ignore it to prevent drift.
        if self.filtered_accel.magnitude() < MIN_ACCEL {
            self.filtered_accel = Vector3::zeros();
            self.filtered_velocity *= LOW_ACCEL_VELOCITY_DECAY;
        } else {
            // If the velocity is decreasing, reduce the deceleration to
            // prevent snap-back.
            let new_velocity = self.filtered_velocity + self.filtered_accel * delta_time;
            if new_velocity.magnitude_squared() < self.filtered_velocity.magnitude_squared() {
                self.filtered_accel *= 0.5;
            }
        }
    }

    /// Integrate the filtered acceleration into the velocity estimate
    ///
    /// Runs once per frame in accelerometer-assisted mode, after
    /// [`update`](Self::update). The velocity is damped every frame so the
    /// arm settles back to rest instead of drifting.
    pub fn integrate_velocity(&mut self, delta_time: f32) {
        self.filtered_velocity += self.filtered_accel * delta_time;
        self.filtered_velocity *= VELOCITY_FILTER_SUPPRESS;
    }

    /// Wind the filter down after losing contact with the controller
    ///
    /// Halves the velocity and acceleration so a visible arm glides to a
    /// stop, and flags the next connected frame as a fresh start. Prevents
    /// a velocity spike when tracking resumes.
    pub fn reset(&mut self) {
        self.filtered_velocity *= RESET_DECAY;
        self.filtered_accel *= RESET_DECAY;
        self.first_update = true;
    }

    /// Current velocity estimate in world space, in m/s
    pub fn velocity(&self) -> Vector3<f32> {
        self.filtered_velocity
    }

    /// Gravity-compensated acceleration in world space, in m/s²
    pub fn acceleration(&self) -> Vector3<f32> {
        self.filtered_accel
    }

    /// Current gravity bias estimate in world space, in m/s²
    pub fn gravity_estimate(&self) -> Vector3<f32> {
        self.gravity_estimate
    }

    /// Whether the next connected frame starts from rest
    pub fn is_fresh(&self) -> bool {
        self.first_update
    }
}

impl Default for AccelFilter {
    fn default() -> Self {
        Self::new()
    }
}
