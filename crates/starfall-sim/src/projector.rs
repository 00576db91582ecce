//! World-to-screen projection and impact intensity.
//!
//! Every projected point is clamped to ±0.95 on both axes so overlays never
//! sit on the screen edge.

use glam::{Mat4, Vec3};

use starfall_core::constants::*;
use starfall_core::enums::TargetKind;
use starfall_core::types::ScreenPoint;

/// Project a world point through a view-projection matrix into clamped NDC.
pub fn project(view_projection: &Mat4, point: Vec3) -> ScreenPoint {
    let clip = *view_projection * point.extend(1.0);
    let w = if clip.w.abs() < CLIP_W_EPSILON {
        CLIP_W_EPSILON.copysign(clip.w)
    } else {
        clip.w
    };
    ScreenPoint::new(clamp_axis(clip.x / w), clamp_axis(clip.y / w))
}

/// Screen point for a screen-directed impact.
///
/// X is remapped over a wider world domain than the view frustum and Y uses
/// a y-down screen convention, so world "up" lands toward the top edge.
pub fn screen_directed_point(world: Vec3) -> ScreenPoint {
    ScreenPoint::new(
        clamp_axis(world.x / SCREEN_X_DOMAIN),
        clamp_axis(-world.y / SCREEN_Y_DOMAIN),
    )
}

/// Flash intensity for a hit on `kind` by a projectile of `radius`.
pub fn hit_intensity(kind: TargetKind, radius: f32) -> f32 {
    let (min, max) = match kind {
        TargetKind::Shield => (SHIELD_INTENSITY_MIN, SHIELD_INTENSITY_MAX),
        TargetKind::CentralBody => (BODY_INTENSITY_MIN, BODY_INTENSITY_MAX),
        TargetKind::OrbitingBody => (ORBITER_INTENSITY_MIN, ORBITER_INTENSITY_MAX),
    };
    let t = ((radius - MIN_SPAWN_SIZE) / (MAX_SPAWN_SIZE - MIN_SPAWN_SIZE)).clamp(0.0, 1.0);
    let t = if t.is_finite() { t } else { 0.0 };
    min + (max - min) * t
}

fn clamp_axis(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-SCREEN_CLAMP, SCREEN_CLAMP)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::types::CameraView;

    #[test]
    fn test_origin_projects_to_center() {
        let camera = CameraView::default();
        let p = project(&camera.view_projection, Vec3::ZERO);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
    }

    #[test]
    fn test_offscreen_point_is_clamped() {
        let camera = CameraView::default();
        let p = project(&camera.view_projection, Vec3::new(100.0, -100.0, 0.0));
        assert_eq!(p.x, SCREEN_CLAMP);
        assert_eq!(p.y, -SCREEN_CLAMP);
    }

    #[test]
    fn test_degenerate_w_does_not_produce_nan() {
        let camera = CameraView::default();
        // A point in the camera plane has clip w of zero.
        let p = project(&camera.view_projection, camera.eye + Vec3::X);
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!(p.x.abs() <= SCREEN_CLAMP && p.y.abs() <= SCREEN_CLAMP);
    }

    #[test]
    fn test_screen_directed_inverts_y() {
        let up = screen_directed_point(Vec3::new(0.0, 2.0, 0.0));
        assert!(up.y < 0.0);
        let right = screen_directed_point(Vec3::new(3.0, 0.0, 0.0));
        assert!((right.x - 0.5).abs() < 1e-6);
        let far = screen_directed_point(Vec3::new(-60.0, -60.0, 0.0));
        assert_eq!(far.x, -SCREEN_CLAMP);
        assert_eq!(far.y, SCREEN_CLAMP);
    }

    #[test]
    fn test_intensity_bands() {
        assert!((hit_intensity(TargetKind::Shield, 0.0) - SHIELD_INTENSITY_MIN).abs() < 1e-6);
        assert!((hit_intensity(TargetKind::Shield, 1.0) - SHIELD_INTENSITY_MAX).abs() < 1e-6);
        assert!(
            (hit_intensity(TargetKind::CentralBody, MAX_SPAWN_SIZE) - BODY_INTENSITY_MAX).abs() < 1e-5
        );
        assert!(
            hit_intensity(TargetKind::Shield, 0.07) < hit_intensity(TargetKind::CentralBody, 0.07),
            "Shield hits are subdued relative to body hits"
        );
    }
}
