//! Hand path during the throw clip
//!
//! The hand offset is a piecewise function of the throw clip's normalized
//! progress `p`:
//!
//! - `p <= windup_end`: eases from the hold offset down and back toward the body
//! - `p <= swing_end`: rises up and forward, shaped by `t^swing_exponent`
//! - `p <= release_progress`: stays elevated while sweeping back
//! - past that the ball is released and the offset stays at the end of the sweep
//!
//! Offsets are in character space (x lateral, y up, z forward) and rotated by
//! the character's yaw before being added to its position.

use crate::character::Pose;
use crate::config::BallConfig;
use crate::foundation::math::{utils, Vec3};

/// Hand offset in character space.
///
/// `progress` is `None` when no throw is running, which gives the plain hold
/// offset.
pub fn hand_offset(config: &BallConfig, progress: Option<f32>) -> Vec3 {
    let hold = config.hold_offset;
    let Some(p) = progress else {
        return hold;
    };
    let throw = &config.throw;

    let wound_up = hold + Vec3::new(0.0, -throw.windup_drop, -throw.windup_pull_back);
    let raised = hold + Vec3::new(0.0, throw.swing_rise, throw.swing_reach);
    let swept = raised + Vec3::new(0.0, 0.0, -throw.sweep_back);

    if p <= 0.0 {
        hold
    } else if p <= throw.windup_end {
        let t = utils::ease_in_out(p / throw.windup_end);
        hold.lerp(&wound_up, t)
    } else if p <= throw.swing_end {
        let t = (p - throw.windup_end) / (throw.swing_end - throw.windup_end);
        wound_up.lerp(&raised, t.powf(throw.swing_exponent))
    } else if p <= throw.release_progress {
        let t = (p - throw.swing_end) / (throw.release_progress - throw.swing_end);
        raised.lerp(&swept, t)
    } else {
        swept
    }
}

/// World-space hand position for a pose
pub fn hand_position(config: &BallConfig, pose: &Pose, progress: Option<f32>) -> Vec3 {
    pose.position + utils::rotate_by_yaw(&hand_offset(config, progress), pose.yaw)
}

/// Whether the throw has reached the release point
pub fn is_past_release(config: &BallConfig, progress: f32) -> bool {
    progress > config.throw.release_progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_throw_uses_hold_offset() {
        let config = BallConfig::default();
        assert_relative_eq!(hand_offset(&config, None), config.hold_offset);
        assert_relative_eq!(hand_offset(&config, Some(0.0)), config.hold_offset);
    }

    #[test]
    fn test_curve_is_continuous_at_breakpoints() {
        let config = BallConfig::default();
        let throw = &config.throw;
        // The swing starts steeply, so only the later breakpoints are probed.
        for breakpoint in [throw.swing_end, throw.release_progress] {
            let before = hand_offset(&config, Some(breakpoint));
            let after = hand_offset(&config, Some(breakpoint + 1.0e-4));
            assert_relative_eq!(before, after, epsilon = 1.0e-3);
        }
    }

    #[test]
    fn test_windup_is_lowest_point() {
        let config = BallConfig::default();
        let low = hand_offset(&config, Some(config.throw.windup_end));
        assert_relative_eq!(low.y, config.hold_offset.y - config.throw.windup_drop);

        let high = hand_offset(&config, Some(config.throw.swing_end));
        assert_relative_eq!(high.y, config.hold_offset.y + config.throw.swing_rise);
    }

    #[test]
    fn test_swing_rises_fast_early() {
        let config = BallConfig::default();
        let throw = &config.throw;
        let quarter = throw.windup_end + 0.25 * (throw.swing_end - throw.windup_end);
        let low = hand_offset(&config, Some(throw.windup_end)).y;
        let high = hand_offset(&config, Some(throw.swing_end)).y;
        let y = hand_offset(&config, Some(quarter)).y;
        // 0.25^0.3 is about 0.66
        assert!((y - low) / (high - low) > 0.6);
    }

    #[test]
    fn test_hand_position_follows_yaw() {
        let config = BallConfig::default();
        let pose = Pose::new(Vec3::new(1.0, 0.0, 2.0), std::f32::consts::FRAC_PI_2);
        let hand = hand_position(&config, &pose, None);
        // Facing +X: local forward (z) maps onto world +X, local x onto -Z.
        assert_relative_eq!(hand.x, 1.0 + config.hold_offset.z, epsilon = 1.0e-5);
        assert_relative_eq!(hand.y, config.hold_offset.y, epsilon = 1.0e-5);
        assert_relative_eq!(hand.z, 2.0 - config.hold_offset.x, epsilon = 1.0e-5);
    }

    #[test]
    fn test_release_is_strictly_after_threshold() {
        let config = BallConfig::default();
        assert!(!is_past_release(&config, 0.6));
        assert!(is_past_release(&config, 0.6001));
    }
}
