//! Distance-based controller and tooltip transparency for the arm model

/// Fade rate in alpha units per second
const DELTA_ALPHA: f32 = 4.0;

/// Comfort fade for the rendered controller and its tooltips
///
/// Tracks two independent alpha values, each moved toward 0 or 1 at a fixed
/// rate and clamped to [0, 1] every frame:
///
/// - the controller fades out when the wrist comes closer to the face than
///   the fade threshold, and back in beyond it;
/// - tooltips are only visible in the band between the fade threshold and
///   the tooltip maximum distance, fading out on either side of it.
///
/// # Example
/// ```
/// use arm_model::Transparency;
///
/// let mut fade = Transparency::new();
/// // Wrist far from the face: controller fully visible, tooltip hidden
/// for _ in 0..10 {
///     fade.update(0.5, 0.32, 0.45, 0.1);
/// }
/// assert_eq!(fade.controller_alpha(), 1.0);
/// assert_eq!(fade.tooltip_alpha(), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Transparency {
    controller_alpha: f32,
    tooltip_alpha: f32,
}

impl Transparency {
    /// Create with the controller fully visible and tooltips hidden
    pub fn new() -> Self {
        Self {
            controller_alpha: 1.0,
            tooltip_alpha: 0.0,
        }
    }

    /// Advance both alpha values by one frame
    ///
    /// # Arguments
    /// * `distance_to_face` - Distance from the face to the wrist, in meters
    /// * `fade_distance` - Below this the controller fades out, in meters
    /// * `tooltip_min_distance` - Beyond this tooltips fade out, in meters
    /// * `delta_time` - Time step in seconds
    pub fn update(
        &mut self,
        distance_to_face: f32,
        fade_distance: f32,
        tooltip_min_distance: f32,
        delta_time: f32,
    ) {
        let step = DELTA_ALPHA * delta_time;

        if distance_to_face < fade_distance {
            self.controller_alpha = (self.controller_alpha - step).clamp(0.0, 1.0);
        } else {
            self.controller_alpha = (self.controller_alpha + step).clamp(0.0, 1.0);
        }

        // Tooltips are only legible in a band: far enough from the face to
        // not overwhelm the view, close enough to read.
        if distance_to_face < fade_distance || distance_to_face > tooltip_min_distance {
            self.tooltip_alpha = (self.tooltip_alpha - step).clamp(0.0, 1.0);
        } else {
            self.tooltip_alpha = (self.tooltip_alpha + step).clamp(0.0, 1.0);
        }
    }

    /// Current controller visibility in [0, 1]
    pub fn controller_alpha(&self) -> f32 {
        self.controller_alpha
    }

    /// Current tooltip visibility in [0, 1]
    pub fn tooltip_alpha(&self) -> f32 {
        self.tooltip_alpha
    }
}

impl Default for Transparency {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE_DISTANCE: f32 = 0.32;
    const TOOLTIP_MIN_DISTANCE: f32 = 0.45;

    fn hold(fade: &mut Transparency, distance: f32, frames: usize) {
        for _ in 0..frames {
            fade.update(distance, FADE_DISTANCE, TOOLTIP_MIN_DISTANCE, 0.1);
        }
    }

    #[test]
    fn test_initial_alphas() {
        let fade = Transparency::new();
        assert_eq!(fade.controller_alpha(), 1.0);
        assert_eq!(fade.tooltip_alpha(), 0.0);
    }

    #[test]
    fn test_far_distance_converges_controller_on_tooltip_off() {
        let mut fade = Transparency::new();

        // Enter the tooltip band first so both alphas are mid-range
        hold(&mut fade, 0.4, 2);
        assert!(fade.tooltip_alpha() > 0.0);

        // Beyond both thresholds for one second
        hold(&mut fade, 0.5, 10);
        assert_eq!(fade.controller_alpha(), 1.0);
        assert_eq!(fade.tooltip_alpha(), 0.0);
    }

    #[test]
    fn test_near_face_fades_everything_out() {
        let mut fade = Transparency::new();
        hold(&mut fade, 0.1, 10);
        assert_eq!(fade.controller_alpha(), 0.0);
        assert_eq!(fade.tooltip_alpha(), 0.0);
    }

    #[test]
    fn test_tooltip_band_raises_tooltip() {
        let mut fade = Transparency::new();
        hold(&mut fade, 0.4, 10);
        assert_eq!(fade.controller_alpha(), 1.0);
        assert_eq!(fade.tooltip_alpha(), 1.0);
    }

    #[test]
    fn test_fade_rate() {
        let mut fade = Transparency::new();

        // One 0.1s frame near the face moves alpha by 0.4
        fade.update(0.1, FADE_DISTANCE, TOOLTIP_MIN_DISTANCE, 0.1);
        assert!((fade.controller_alpha() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_alphas_stay_in_bounds() {
        let mut fade = Transparency::new();

        // Alternate across all three regions with oversized time steps
        for i in 0..100 {
            let distance = match i % 3 {
                0 => 0.05,
                1 => 0.40,
                _ => 2.00,
            };
            fade.update(distance, FADE_DISTANCE, TOOLTIP_MIN_DISTANCE, 10.0);

            assert!((0.0..=1.0).contains(&fade.controller_alpha()));
            assert!((0.0..=1.0).contains(&fade.tooltip_alpha()));
        }
    }

    #[test]
    fn test_degenerate_band_never_shows_tooltip() {
        let mut fade = Transparency::new();

        // Inverted thresholds leave no distance where tooltips can rise
        for _ in 0..20 {
            fade.update(0.4, 0.45, 0.32, 0.1);
        }
        assert_eq!(fade.tooltip_alpha(), 0.0);
        assert_eq!(fade.controller_alpha(), 0.0);
    }

    #[test]
    fn test_boundary_distances() {
        let mut fade = Transparency::new();

        // Exactly at the fade threshold counts as far
        fade.update(FADE_DISTANCE, FADE_DISTANCE, TOOLTIP_MIN_DISTANCE, 0.1);
        assert_eq!(fade.controller_alpha(), 1.0);
        assert!(fade.tooltip_alpha() > 0.0);

        // Exactly at the tooltip threshold still counts as in the band
        let mut fade = Transparency::new();
        fade.update(TOOLTIP_MIN_DISTANCE, FADE_DISTANCE, TOOLTIP_MIN_DISTANCE, 0.1);
        assert!(fade.tooltip_alpha() > 0.0);
    }
}
