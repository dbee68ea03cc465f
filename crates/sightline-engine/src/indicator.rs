use glam::{Quat, Vec3};

use sightline_core::config::ResolvedSettings;

use crate::animator::TransitionAnimator;
use crate::thickness::ThicknessProfile;

/// What the render side needs to place the indicator volume each frame.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorPose {
    pub position: Vec3,
    /// Local +Z aligned with the sight direction.
    pub rotation: Quat,
    /// Non-uniform: (radius, half-thickness, radius), scaled by the
    /// pop-in transition.
    pub scale: Vec3,
    pub active: bool,
}

impl Default for IndicatorPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ZERO,
            active: false,
        }
    }
}

/// Occlusion indicator driver: eases the volume toward the occlusion
/// midpoint, faces it along the sight line, and sizes it from the
/// thickness profile. Activation edges run the pop-in transition from
/// near zero; deactivation hides the volume immediately.
#[derive(Debug)]
pub struct Indicator {
    pose: IndicatorPose,
    animator: TransitionAnimator,
    base_radius: f32,
    move_smoothing: f32,
}

impl Indicator {
    pub fn new(settings: &ResolvedSettings) -> Self {
        Self {
            pose: IndicatorPose::default(),
            animator: TransitionAnimator::new(settings.transition_duration),
            base_radius: settings.indicator_radius,
            move_smoothing: settings.move_smoothing,
        }
    }

    pub fn pose(&self) -> &IndicatorPose {
        &self.pose
    }

    pub fn is_transitioning(&self) -> bool {
        self.animator.is_running()
    }

    /// Advance one tick. `occlusion` carries the frame's thickness profile
    /// and sight direction when the subject is occluded.
    pub fn update(&mut self, occlusion: Option<(&ThicknessProfile, Vec3)>, dt: f32) {
        let Some((profile, direction)) = occlusion else {
            if self.pose.active {
                self.pose.active = false;
                self.pose.scale = Vec3::ZERO;
                self.animator.reset();
            }
            return;
        };

        if self.pose.active {
            // Fixed-rate midpoint lerp; dt is small and bounded by the
            // frame loop, the factor clamp covers spikes.
            let factor = (self.move_smoothing * dt).clamp(0.0, 1.0);
            self.pose.position = self.pose.position.lerp(profile.midpoint, factor);
        } else {
            // Activation edge: snap into place, then pop in from near zero.
            self.pose.active = true;
            self.pose.position = profile.midpoint;
            self.animator.trigger(1.0);
        }

        self.pose.rotation = Quat::from_rotation_arc(Vec3::Z, direction);
        let pop = self.animator.tick(dt);
        let half_thickness = profile.thickness * 0.5;
        self.pose.scale = Vec3::new(
            self.base_radius * pop,
            half_thickness * pop,
            self.base_radius * pop,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::layers::{LayerId, LayerMask};

    const DT: f32 = 1.0 / 60.0;

    fn settings() -> ResolvedSettings {
        ResolvedSettings::with_layers(LayerMask::ALL, LayerId(2))
    }

    fn profile_at(z: f32, thickness: f32) -> ThicknessProfile {
        let entry = Vec3::new(0.0, 0.0, z);
        let exit = entry + Vec3::Z * thickness;
        ThicknessProfile {
            entry,
            exit,
            midpoint: (entry + exit) * 0.5,
            thickness,
        }
    }

    #[test]
    fn test_activation_snaps_and_pops_in() {
        let mut indicator = Indicator::new(&settings());
        assert!(!indicator.pose().active);

        let profile = profile_at(4.0, 1.0);
        indicator.update(Some((&profile, Vec3::Z)), DT);

        let pose = indicator.pose();
        assert!(pose.active);
        assert_eq!(pose.position, profile.midpoint);
        // Pop-in has begun but is nowhere near full size.
        assert!(pose.scale.x > 0.0);
        assert!(pose.scale.x < indicator.base_radius);
        assert!(indicator.is_transitioning());
    }

    #[test]
    fn test_settles_at_profile_scale() {
        let mut indicator = Indicator::new(&settings());
        let profile = profile_at(4.0, 2.0);
        for _ in 0..120 {
            indicator.update(Some((&profile, Vec3::Z)), DT);
        }
        let pose = indicator.pose();
        assert!(!indicator.is_transitioning());
        assert!((pose.scale.x - 1.0).abs() < 1e-5);
        assert!((pose.scale.y - 1.0).abs() < 1e-5);
        assert_eq!(pose.scale.x, pose.scale.z);
    }

    #[test]
    fn test_position_eases_toward_moving_midpoint() {
        let mut indicator = Indicator::new(&settings());
        indicator.update(Some((&profile_at(4.0, 1.0), Vec3::Z)), DT);
        let start = indicator.pose().position;

        let moved = profile_at(6.0, 1.0);
        indicator.update(Some((&moved, Vec3::Z)), DT);
        let pos = indicator.pose().position;
        assert!(pos.z > start.z, "moves toward the new midpoint");
        assert!(pos.z < moved.midpoint.z, "but does not teleport");
    }

    #[test]
    fn test_rotation_faces_sight_direction() {
        let mut indicator = Indicator::new(&settings());
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        indicator.update(Some((&profile_at(4.0, 1.0), dir)), DT);
        let forward = indicator.pose().rotation * Vec3::Z;
        assert!((forward - dir).length() < 1e-5);
    }

    #[test]
    fn test_deactivation_hides_immediately() {
        let mut indicator = Indicator::new(&settings());
        let profile = profile_at(4.0, 1.0);
        for _ in 0..30 {
            indicator.update(Some((&profile, Vec3::Z)), DT);
        }
        assert!(indicator.pose().active);

        indicator.update(None, DT);
        let pose = indicator.pose();
        assert!(!pose.active);
        assert_eq!(pose.scale, Vec3::ZERO);
        assert!(!indicator.is_transitioning());

        // Reactivation runs the pop-in from near zero again.
        indicator.update(Some((&profile, Vec3::Z)), DT);
        assert!(indicator.pose().scale.x < indicator.base_radius * 0.5);
    }
}
