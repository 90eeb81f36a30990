//! Mathematical utilities and nalgebra extensions for the arm model

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Project the vector onto the horizontal plane (zero the y component)
    fn horizontal(&self) -> Vector3<f32>;

    /// Clamp each component independently to the given per-axis range
    fn clamp_each(&self, min: &Vector3<f32>, max: &Vector3<f32>) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn horizontal(&self) -> Vector3<f32> {
        Vector3::new(self.x, 0.0, self.z)
    }

    fn clamp_each(&self, min: &Vector3<f32>, max: &Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            self.x.clamp(min.x, max.x),
            self.y.clamp(min.y, max.y),
            self.z.clamp(min.z, max.z),
        )
    }
}

/// Shortest-arc rotation taking `from` onto `to`
///
/// Neither input needs to be normalized. Degenerate inputs return the
/// identity rotation; antiparallel inputs, for which nalgebra reports no
/// unique rotation, return a half turn about an axis perpendicular to
/// `from` so the result is always finite.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use arm_model::shortest_arc;
///
/// let forward = Vector3::new(0.0, 0.0, -1.0);
/// let right = Vector3::new(1.0, 0.0, 0.0);
/// let rotation = shortest_arc(&forward, &right);
/// assert!((rotation * forward - right).magnitude() < 1e-6);
/// ```
pub fn shortest_arc(from: &Vector3<f32>, to: &Vector3<f32>) -> UnitQuaternion<f32> {
    UnitQuaternion::rotation_between(from, to).unwrap_or_else(|| {
        UnitQuaternion::from_axis_angle(
            &Unit::new_normalize(perpendicular(from)),
            std::f32::consts::PI,
        )
    })
}

/// Any vector perpendicular to `v`
///
/// `v` must be non-degenerate; callers only reach this through the
/// antiparallel branch of [`shortest_arc`], where both inputs are known
/// to be non-zero.
fn perpendicular(v: &Vector3<f32>) -> Vector3<f32> {
    let candidate = v.cross(&Vector3::y());
    if candidate.magnitude_squared() > f32::EPSILON {
        candidate
    } else {
        // v is vertical, any horizontal axis works
        v.cross(&Vector3::x())
    }
}
