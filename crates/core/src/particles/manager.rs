//! Layered particle configuration: base, responsive buckets, accessibility.
//!
//! The manager is constructed explicitly and handed to whatever composes the
//! page. Every producer is pure given the capability provider's answers; theme
//! colors are resolved on each call so theme switches are picked up.

use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;
use crate::capabilities::{Capabilities, REDUCED_MOTION_QUERY};

use super::options::{
    ClickMode, DeviceTier, EventToggle, HoverMode, InteractivityOptions, LinkOptions, MoveOptions,
    OutMode, ParticleOptions, ParticleOverride, ParticlesOptions, ResponsiveRule, SizeRange,
};

/// Particle count kept when reduced motion is requested.
pub const REDUCED_MOTION_COUNT: u32 = 20;

/// Theme color sources and their fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTheme {
    /// CSS custom properties read for the particle palette, in order.
    pub palette_variables: Vec<String>,
    /// CSS custom property read for link color.
    pub link_variable: String,
    pub fallback_palette: Vec<String>,
    pub fallback_link_color: String,
}

impl Default for ParticleTheme {
    fn default() -> Self {
        Self {
            palette_variables: vec![
                "--particle-primary".to_string(),
                "--particle-secondary".to_string(),
                "--particle-accent".to_string(),
            ],
            link_variable: "--particle-link".to_string(),
            fallback_palette: vec![
                "#3b82f6".to_string(),
                "#8b5cf6".to_string(),
                "#06b6d4".to_string(),
            ],
            fallback_link_color: "#64748b".to_string(),
        }
    }
}

/// Produces render-ready [`ParticleOptions`].
#[derive(Debug, Clone)]
pub struct ParticlesConfigurationManager<C> {
    caps: C,
    theme: ParticleTheme,
}

impl<C: Capabilities> ParticlesConfigurationManager<C> {
    pub const fn new(caps: C, theme: ParticleTheme) -> Self {
        Self { caps, theme }
    }

    pub const fn capabilities(&self) -> &C {
        &self.caps
    }

    /// Base configuration with theme colors resolved now.
    #[must_use]
    pub fn base_config(&self) -> ParticleOptions {
        let (palette, link_color) = self.resolve_colors();

        ParticleOptions {
            fps_limit: 60,
            detect_retina: true,
            particles: ParticlesOptions {
                number: 80,
                color: palette,
                opacity: 0.5,
                size: SizeRange { min: 1.0, max: 3.0 },
                links: LinkOptions {
                    enable: true,
                    distance: 150.0,
                    opacity: 0.4,
                    width: 1.0,
                    color: link_color,
                },
                movement: MoveOptions {
                    enable: true,
                    speed: 1.2,
                    out_mode: OutMode::Bounce,
                },
            },
            interactivity: InteractivityOptions {
                on_hover: EventToggle {
                    enable: true,
                    mode: HoverMode::Repulse,
                },
                on_click: EventToggle {
                    enable: true,
                    mode: ClickMode::Push,
                },
                repulse_distance: 120.0,
                push_quantity: 4,
            },
            responsive: Vec::new(),
        }
    }

    /// Width buckets, widest first, one per breakpoint below `2xl`. Counts,
    /// link distance and speed shrink with width; hover and click are off
    /// below `md`.
    #[must_use]
    pub fn responsive_config(&self) -> Vec<ResponsiveRule> {
        DeviceTier::ALL.iter().map(|tier| tier_rule(*tier)).collect()
    }

    /// Resolve the reduced-motion flag: explicit flag first, then the media query.
    #[must_use]
    pub fn prefers_reduced_motion(&self, reduced_motion: Option<bool>) -> bool {
        reduced_motion.unwrap_or_else(|| {
            self.caps
                .media_matches(REDUCED_MOTION_QUERY)
                .unwrap_or(false)
        })
    }

    /// Accessibility override; empty unless reduced motion is requested.
    #[must_use]
    pub fn accessibility_config(&self, reduced_motion: Option<bool>) -> ParticleOverride {
        if !self.prefers_reduced_motion(reduced_motion) {
            return ParticleOverride::default();
        }

        ParticleOverride {
            number: Some(REDUCED_MOTION_COUNT),
            opacity: Some(0.3),
            link_opacity: Some(0.2),
            move_enable: Some(false),
            move_speed: Some(0.0),
            hover_enable: Some(false),
            click_enable: Some(false),
            ..ParticleOverride::default()
        }
    }

    /// Base merged with the accessibility override, plus the bucket list for the
    /// renderer. Each bucket is layered with the same override so no width can
    /// re-enable motion.
    #[must_use]
    pub fn final_config(&self, reduced_motion: Option<bool>) -> ParticleOptions {
        let accessibility = self.accessibility_config(reduced_motion);
        let responsive = self
            .responsive_config()
            .into_iter()
            .map(|rule| ResponsiveRule {
                options: rule.options.layer(&accessibility),
                ..rule
            })
            .collect();

        ParticleOptions {
            responsive,
            ..self.base_config().with(&accessibility)
        }
    }

    /// Base, then the bucket for an already-known breakpoint, then accessibility.
    /// The bucket list is left empty since the width was already evaluated.
    #[must_use]
    pub fn breakpoint_optimized_config(
        &self,
        breakpoint: Breakpoint,
        reduced_motion: Option<bool>,
    ) -> ParticleOptions {
        let bucket = DeviceTier::for_breakpoint(breakpoint)
            .map(|tier| tier_rule(tier).options)
            .unwrap_or_default();

        self.base_config()
            .with(&bucket)
            .with(&self.accessibility_config(reduced_motion))
    }

    fn resolve_colors(&self) -> (Vec<String>, String) {
        if !self.caps.has_dom() {
            return (
                self.theme.fallback_palette.clone(),
                self.theme.fallback_link_color.clone(),
            );
        }

        let palette: Vec<String> = self
            .theme
            .palette_variables
            .iter()
            .filter_map(|name| self.caps.css_variable(name))
            .collect();
        let palette = if palette.is_empty() {
            self.theme.fallback_palette.clone()
        } else {
            palette
        };
        let link_color = self
            .caps
            .css_variable(&self.theme.link_variable)
            .unwrap_or_else(|| self.theme.fallback_link_color.clone());

        (palette, link_color)
    }
}

fn tier_rule(tier: DeviceTier) -> ResponsiveRule {
    let (number, link_distance, move_speed) = match tier {
        DeviceTier::LargeDesktop => (70, 140.0, 1.1),
        DeviceTier::Desktop => (60, 130.0, 1.0),
        DeviceTier::Tablet => (45, 110.0, 0.9),
        DeviceTier::Mobile => (30, 90.0, 0.8),
        DeviceTier::SmallMobile => (20, 70.0, 0.6),
    };
    let interactivity = if tier.is_interactive() { None } else { Some(false) };

    ResponsiveRule {
        tier,
        below_width: tier.below_width(),
        options: ParticleOverride {
            number: Some(number),
            link_distance: Some(link_distance),
            move_speed: Some(move_speed),
            hover_enable: interactivity,
            click_enable: interactivity,
            ..ParticleOverride::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Headless, StaticCapabilities};

    fn manager(caps: StaticCapabilities) -> ParticlesConfigurationManager<StaticCapabilities> {
        ParticlesConfigurationManager::new(caps, ParticleTheme::default())
    }

    #[test]
    fn test_base_config_without_dom_uses_fallback_palette() {
        let m = ParticlesConfigurationManager::new(Headless, ParticleTheme::default());
        let base = m.base_config();
        assert_eq!(base.particles.color, ParticleTheme::default().fallback_palette);
        assert_eq!(base.particles.links.color, "#64748b");
        assert!(base.is_animated());
    }

    #[test]
    fn test_base_config_reads_theme_colors_each_call() {
        let light = manager(
            StaticCapabilities::desktop(1440.0, 900.0)
                .with_css_variable("--particle-primary", "#111111")
                .with_css_variable("--particle-link", "#222222"),
        );
        let base = light.base_config();
        assert_eq!(base.particles.color, vec!["#111111".to_string()]);
        assert_eq!(base.particles.links.color, "#222222");

        let dark = manager(
            StaticCapabilities::desktop(1440.0, 900.0).with_css_variable("--particle-primary", "#eeeeee"),
        );
        assert_eq!(dark.base_config().particles.color, vec!["#eeeeee".to_string()]);
    }

    #[test]
    fn test_dom_without_theme_variables_falls_back() {
        let m = manager(StaticCapabilities::desktop(1440.0, 900.0));
        assert_eq!(
            m.base_config().particles.color,
            ParticleTheme::default().fallback_palette
        );
    }

    #[test]
    fn test_responsive_buckets_shrink_with_width() {
        let rules = manager(StaticCapabilities::default()).responsive_config();
        assert_eq!(rules.len(), 5);
        for pair in rules.windows(2) {
            if let [wider, narrower] = pair {
                assert!(wider.below_width > narrower.below_width);
                assert!(wider.options.number > narrower.options.number);
                assert!(wider.options.link_distance > narrower.options.link_distance);
                assert!(wider.options.move_speed > narrower.options.move_speed);
            }
        }
    }

    #[test]
    fn test_interactivity_disabled_on_mobile_tiers() {
        let rules = manager(StaticCapabilities::default()).responsive_config();
        for rule in rules {
            let expect_disabled = rule.below_width <= Breakpoint::Md.min_width();
            assert_eq!(rule.options.hover_enable == Some(false), expect_disabled);
            assert_eq!(rule.options.click_enable == Some(false), expect_disabled);
        }
    }

    #[test]
    fn test_accessibility_explicit_flag() {
        let m = manager(StaticCapabilities::desktop(1440.0, 900.0));
        let a11y = m.accessibility_config(Some(true));
        assert_eq!(a11y.move_enable, Some(false));
        assert_eq!(a11y.hover_enable, Some(false));
        assert_eq!(a11y.click_enable, Some(false));
        assert!(m.accessibility_config(Some(false)).is_empty());
    }

    #[test]
    fn test_accessibility_follows_media_query_when_unset() {
        let reduced = manager(
            StaticCapabilities::desktop(1440.0, 900.0).with_media(REDUCED_MOTION_QUERY, true),
        );
        assert_eq!(reduced.accessibility_config(None).move_enable, Some(false));
        // Explicit flag beats the media query.
        assert!(reduced.accessibility_config(Some(false)).is_empty());

        let normal = manager(StaticCapabilities::desktop(1440.0, 900.0));
        assert!(normal.accessibility_config(None).is_empty());
    }

    #[test]
    fn test_final_config_reduced_motion_never_animates() {
        let m = manager(StaticCapabilities::desktop(1440.0, 900.0));
        let config = m.final_config(Some(true));
        assert!(!config.is_animated());
        assert_eq!(config.particles.number, REDUCED_MOTION_COUNT);
        assert!(!config.responsive.is_empty());
        for width in [320.0, 700.0, 1000.0, 1300.0, 1500.0, 2500.0] {
            assert!(!config.resolve_for_width(width).is_animated(), "width {width}");
        }
    }

    #[test]
    fn test_final_config_without_reduced_motion_is_base_plus_buckets() {
        let m = manager(StaticCapabilities::desktop(1440.0, 900.0));
        let config = m.final_config(Some(false));
        assert_eq!(config.particles, m.base_config().particles);
        assert_eq!(config.responsive, m.responsive_config());
    }

    #[test]
    fn test_resolve_for_width_picks_narrowest_rule() {
        let m = manager(StaticCapabilities::default());
        let config = m.final_config(Some(false));
        assert_eq!(config.resolve_for_width(375.0).particles.number, 20);
        assert_eq!(config.resolve_for_width(600.0).particles.number, 20);
        assert_eq!(config.resolve_for_width(700.0).particles.number, 30);
        assert_eq!(config.resolve_for_width(1000.0).particles.number, 45);
        assert_eq!(config.resolve_for_width(1024.0).particles.number, 60);
        assert_eq!(config.resolve_for_width(1536.0).particles.number, 80);
        assert_eq!(config.resolve_for_width(1920.0).particles.number, 80);
        assert!(config.resolve_for_width(375.0).responsive.is_empty());
    }

    #[test]
    fn test_breakpoint_optimized_matches_bucket() {
        let m = manager(StaticCapabilities::desktop(1440.0, 900.0));
        let xs = m.breakpoint_optimized_config(Breakpoint::Xs, Some(false));
        assert_eq!(xs.particles.number, 20);
        assert!(!xs.interactivity.on_hover.enable);
        assert!(xs.particles.movement.enable);
        assert!(xs.responsive.is_empty());

        let lg = m.breakpoint_optimized_config(Breakpoint::Lg, Some(false));
        assert_eq!(lg.particles.number, 60);
        assert!(lg.interactivity.on_hover.enable);

        let xxl = m.breakpoint_optimized_config(Breakpoint::Xxl, Some(false));
        assert_eq!(xxl.particles, m.base_config().particles);
    }

    #[test]
    fn test_breakpoint_and_width_agree_at_thresholds() {
        let m = manager(StaticCapabilities::default());
        let config = m.final_config(Some(false));
        for bp in Breakpoint::ALL {
            for width in [bp.min_width(), bp.min_width() - 1.0] {
                let by_width = config.resolve_for_width(width);
                let by_breakpoint =
                    m.breakpoint_optimized_config(Breakpoint::classify(width), Some(false));
                assert_eq!(by_width.particles, by_breakpoint.particles, "width {width}");
                assert_eq!(by_width.interactivity, by_breakpoint.interactivity, "width {width}");
            }
        }

        // 768 is md and a tablet: hover stays on.
        let tablet = config.resolve_for_width(768.0);
        assert!(tablet.interactivity.on_hover.enable);
        assert!(!config.resolve_for_width(767.0).interactivity.on_hover.enable);
    }

    #[test]
    fn test_breakpoint_optimized_accessibility_wins() {
        let m = manager(StaticCapabilities::desktop(1440.0, 900.0));
        let config = m.breakpoint_optimized_config(Breakpoint::Xl, Some(true));
        assert!(!config.is_animated());
        assert_eq!(config.particles.number, REDUCED_MOTION_COUNT);
    }
}
