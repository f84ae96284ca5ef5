//! Declarative particle configuration and partial overrides.
//!
//! `ParticleOptions` is the render-ready value; `ParticleOverride` is the
//! all-optional layer type merged on top of it (breakpoint, accessibility).

use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;

/// What happens at the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutMode {
    Bounce,
    Out,
}

/// Pointer-hover behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    Repulse,
}

/// Click behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickMode {
    Push,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    pub enable: bool,
    pub distance: f64,
    pub opacity: f64,
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOptions {
    pub enable: bool,
    pub speed: f64,
    pub out_mode: OutMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticlesOptions {
    pub number: u32,
    pub color: Vec<String>,
    pub opacity: f64,
    pub size: SizeRange,
    pub links: LinkOptions,
    #[serde(rename = "move")]
    pub movement: MoveOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventToggle<M> {
    pub enable: bool,
    pub mode: M,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractivityOptions {
    pub on_hover: EventToggle<HoverMode>,
    pub on_click: EventToggle<ClickMode>,
    pub repulse_distance: f64,
    pub push_quantity: u32,
}

/// Width-bucket tiers, widest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceTier {
    LargeDesktop,
    Desktop,
    Tablet,
    Mobile,
    SmallMobile,
}

impl DeviceTier {
    pub const ALL: [Self; 5] = [
        Self::LargeDesktop,
        Self::Desktop,
        Self::Tablet,
        Self::Mobile,
        Self::SmallMobile,
    ];

    /// Breakpoint whose width band this tier covers.
    #[must_use]
    pub const fn breakpoint(self) -> Breakpoint {
        match self {
            Self::LargeDesktop => Breakpoint::Xl,
            Self::Desktop => Breakpoint::Lg,
            Self::Tablet => Breakpoint::Md,
            Self::Mobile => Breakpoint::Sm,
            Self::SmallMobile => Breakpoint::Xs,
        }
    }

    /// Exclusive upper width bound: the next breakpoint's threshold.
    #[must_use]
    pub const fn below_width(self) -> f64 {
        match self {
            Self::LargeDesktop => Breakpoint::Xxl.min_width(),
            Self::Desktop => Breakpoint::Xl.min_width(),
            Self::Tablet => Breakpoint::Lg.min_width(),
            Self::Mobile => Breakpoint::Md.min_width(),
            Self::SmallMobile => Breakpoint::Sm.min_width(),
        }
    }

    /// Whether pointer interactivity stays on. Off below `md`.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        !matches!(self, Self::Mobile | Self::SmallMobile)
    }

    /// The tier covering a known breakpoint; `2xl` uses the base config.
    #[must_use]
    pub const fn for_breakpoint(bp: Breakpoint) -> Option<Self> {
        match bp {
            Breakpoint::Xxl => None,
            Breakpoint::Xl => Some(Self::LargeDesktop),
            Breakpoint::Lg => Some(Self::Desktop),
            Breakpoint::Md => Some(Self::Tablet),
            Breakpoint::Sm => Some(Self::Mobile),
            Breakpoint::Xs => Some(Self::SmallMobile),
        }
    }
}

/// Partial configuration; `None` leaves the underlying value alone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_enable: Option<bool>,
}

impl ParticleOverride {
    /// True when nothing is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Stack `top` over `self`; fields set in `top` win.
    #[must_use]
    pub fn layer(&self, top: &Self) -> Self {
        Self {
            fps_limit: top.fps_limit.or(self.fps_limit),
            number: top.number.or(self.number),
            opacity: top.opacity.or(self.opacity),
            links_enable: top.links_enable.or(self.links_enable),
            link_distance: top.link_distance.or(self.link_distance),
            link_opacity: top.link_opacity.or(self.link_opacity),
            move_enable: top.move_enable.or(self.move_enable),
            move_speed: top.move_speed.or(self.move_speed),
            hover_enable: top.hover_enable.or(self.hover_enable),
            click_enable: top.click_enable.or(self.click_enable),
        }
    }
}

/// Override applied when the viewport is narrower than `below_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveRule {
    pub tier: DeviceTier,
    pub below_width: f64,
    pub options: ParticleOverride,
}

/// Render-ready particle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleOptions {
    pub fps_limit: u32,
    pub detect_retina: bool,
    pub particles: ParticlesOptions,
    pub interactivity: InteractivityOptions,
    /// Width buckets for renderers that evaluate thresholds themselves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsive: Vec<ResponsiveRule>,
}

impl ParticleOptions {
    /// Merge an override in place.
    pub fn apply(&mut self, o: &ParticleOverride) {
        let p = &mut self.particles;
        if let Some(v) = o.fps_limit {
            self.fps_limit = v;
        }
        if let Some(v) = o.number {
            p.number = v;
        }
        if let Some(v) = o.opacity {
            p.opacity = v;
        }
        if let Some(v) = o.links_enable {
            p.links.enable = v;
        }
        if let Some(v) = o.link_distance {
            p.links.distance = v;
        }
        if let Some(v) = o.link_opacity {
            p.links.opacity = v;
        }
        if let Some(v) = o.move_enable {
            p.movement.enable = v;
        }
        if let Some(v) = o.move_speed {
            p.movement.speed = v;
        }
        if let Some(v) = o.hover_enable {
            self.interactivity.on_hover.enable = v;
        }
        if let Some(v) = o.click_enable {
            self.interactivity.on_click.enable = v;
        }
    }

    /// Builder form of [`ParticleOptions::apply`].
    #[must_use]
    pub fn with(mut self, o: &ParticleOverride) -> Self {
        self.apply(o);
        self
    }

    /// Whether anything on screen moves or reacts to input.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        self.particles.movement.enable
            || self.interactivity.on_hover.enable
            || self.interactivity.on_click.enable
    }

    /// Apply the narrowest responsive rule covering `width` and drop the rule list.
    #[must_use]
    pub fn resolve_for_width(&self, width: f64) -> Self {
        let rule = self
            .responsive
            .iter()
            .filter(|rule| width < rule.below_width)
            .min_by(|a, b| a.below_width.total_cmp(&b.below_width))
            .copied();

        let mut resolved = Self {
            responsive: Vec::new(),
            ..self.clone()
        };
        if let Some(rule) = rule {
            resolved.apply(&rule.options);
        }
        resolved
    }

    /// JSON for renderers that take a declarative config.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (non-finite numbers).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
