//! Property-based tests for the layered particle configuration.
//!
//! Properties verified:
//! - Reduced motion never yields an animating config, at any width or breakpoint
//! - Without reduced motion, bucket counts never grow as the viewport narrows
//! - A known breakpoint and a raw width resolve to the same bucket
//! - Degradation is monotonic and idempotent through the latch

use folio_core::particles::{
    DegradationLatch, FrameRateSample, ParticleTheme, ParticlesConfigurationManager,
    PerformancePolicy,
};
use folio_core::capabilities::REDUCED_MOTION_QUERY;
use folio_core::{Breakpoint, StaticCapabilities};
use proptest::prelude::*;

fn manager(reduced_by_media: bool) -> ParticlesConfigurationManager<StaticCapabilities> {
    ParticlesConfigurationManager::new(
        StaticCapabilities::desktop(1440.0, 900.0).with_media(REDUCED_MOTION_QUERY, reduced_by_media),
        ParticleTheme::default(),
    )
}

fn any_breakpoint() -> impl Strategy<Value = Breakpoint> {
    prop::sample::select(Breakpoint::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_reduced_motion_never_animates_at_any_width(width in 0.0f64..4000.0) {
        let config = manager(false).final_config(Some(true));
        prop_assert!(!config.resolve_for_width(width).is_animated());
    }

    #[test]
    fn prop_media_preference_applies_when_flag_unset(width in 0.0f64..4000.0, bp in any_breakpoint()) {
        let m = manager(true);
        prop_assert!(!m.final_config(None).resolve_for_width(width).is_animated());
        prop_assert!(!m.breakpoint_optimized_config(bp, None).is_animated());
    }

    #[test]
    fn prop_narrower_viewport_never_has_more_particles(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
        let config = manager(false).final_config(Some(false));
        let (narrow, wide) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            config.resolve_for_width(narrow).particles.number
                <= config.resolve_for_width(wide).particles.number
        );
    }

    #[test]
    fn prop_breakpoint_bucket_matches_width_resolution(width in -100.0f64..4000.0) {
        let m = manager(false);
        let by_breakpoint = m.breakpoint_optimized_config(Breakpoint::classify(width), Some(false));
        let by_width = m.final_config(Some(false)).resolve_for_width(width);
        prop_assert_eq!(by_breakpoint.particles, by_width.particles);
        prop_assert_eq!(by_breakpoint.interactivity, by_width.interactivity);
    }

    #[test]
    fn prop_breakpoint_bucket_matches_at_thresholds(bp in any_breakpoint()) {
        let m = manager(false);
        let config = m.final_config(Some(false));
        let width = bp.min_width();
        prop_assert_eq!(
            m.breakpoint_optimized_config(bp, Some(false)).interactivity,
            config.resolve_for_width(width).interactivity
        );
    }

    #[test]
    fn prop_degradation_never_raises(bp in any_breakpoint(), fps in 0.0f64..120.0) {
        let policy = PerformancePolicy::default();
        let options = manager(false).breakpoint_optimized_config(bp, Some(false));
        let mut latch = DegradationLatch::new();
        latch.judge(&policy, &FrameRateSample { fps, frames: 1, elapsed_ms: 3000.0 });

        let applied = latch.apply(&policy, &options);
        prop_assert!(applied.particles.number <= options.particles.number);
        prop_assert!(applied.fps_limit <= options.fps_limit);
        prop_assert_eq!(latch.is_degraded(), fps < policy.min_fps);

        // A later fast sample never restores the richer config.
        latch.judge(&policy, &FrameRateSample { fps: 120.0, frames: 360, elapsed_ms: 3000.0 });
        prop_assert_eq!(latch.is_degraded(), fps < policy.min_fps);
    }
}
