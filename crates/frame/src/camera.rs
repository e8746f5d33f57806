use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera circling the origin at a fixed radius and height.
///
/// Position is a pure function of the time value: `phase = t / time_scale`,
/// so the orbit speed does not depend on the refresh rate.
///
/// Deserializes from partial JSON; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCamera {
    pub radius: f32,
    pub height: f32,
    /// Time units per radian of orbit.
    pub time_scale: f64,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 2.0,
            height: 1.5,
            time_scale: 4096.0,
            target: Vec3::ZERO,
            fov_y: 90.0_f32.to_radians(),
            near: 0.1,
            far: 1024.0,
        }
    }
}

impl OrbitCamera {
    /// Orbit angle in radians at time `t`.
    pub fn phase(&self, t: f64) -> f64 {
        t / self.time_scale
    }

    /// Eye position at time `t`.
    pub fn eye(&self, t: f64) -> Vec3 {
        let phase = self.phase(t);
        Vec3::new(
            self.radius * phase.sin() as f32,
            self.height,
            self.radius * phase.cos() as f32,
        )
    }

    pub fn view_matrix(&self, t: f64) -> Mat4 {
        Mat4::look_at_rh(self.eye(t), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Projection applied after view.
    pub fn view_projection(&self, t: f64, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_radius_and_height() {
        let cam = OrbitCamera::default();
        for t in [0.0, 1.0, 16.7, 1000.0, 4096.0, 12_345.678, 3.6e6, 8.64e7] {
            let eye = cam.eye(t);
            let planar = (eye.x * eye.x + eye.z * eye.z).sqrt();
            assert!((planar - 2.0).abs() < 1e-5, "t={t}: planar distance {planar}");
            assert_eq!(eye.y, 1.5);
        }
    }

    #[test]
    fn orbit_starts_on_positive_z() {
        let eye = OrbitCamera::default().eye(0.0);
        assert!(eye.x.abs() < 1e-6);
        assert!((eye.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn quarter_turn_reaches_positive_x() {
        let cam = OrbitCamera::default();
        let eye = cam.eye(std::f64::consts::FRAC_PI_2 * cam.time_scale);
        assert!((eye.x - 2.0).abs() < 1e-5);
        assert!(eye.z.abs() < 1e-5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = OrbitCamera::default();
        for t in [0.0, 500.0, 9000.0] {
            let clip = cam.view_projection(t, 16.0 / 9.0) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
            let ndc = clip / clip.w;
            assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "t={t}: {ndc:?}");
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }

    #[test]
    fn aspect_changes_only_horizontal_scale() {
        let cam = OrbitCamera::default();
        let wide = cam.projection_matrix(2.0);
        let square = cam.projection_matrix(1.0);
        assert!((wide.x_axis.x * 2.0 - square.x_axis.x).abs() < 1e-6);
        assert_eq!(wide.y_axis.y, square.y_axis.y);
    }

    #[test]
    fn view_projection_is_finite() {
        let vp = OrbitCamera::default().view_projection(42.0, 1280.0 / 720.0);
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
