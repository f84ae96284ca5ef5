//! Canvas particle background.
//!
//! Purely decorative: any setup failure logs a warning and the component
//! renders nothing.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use folio_core::config::ParticlesConfig;
use folio_core::debounce::{DebounceCancel, debounce};
use folio_core::particles::{
    DegradationLatch, FieldSettings, FrameRateSampler, ParticleField, ParticleOptions,
    ParticlesConfigurationManager, PerformancePolicy,
};
use folio_core::{
    AnalyticsEvent, AnalyticsSink, Breakpoint, Capabilities, DeviceInfo, ResponsiveError,
    ResponsiveOptions,
};
use leptos::html;
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::dpi::{context_2d, fit_canvas};
use super::raf::{AnimationHandle, FrameGate, FrameTiming, start_animation_loop};
use crate::analytics::{Analytics, use_analytics};
use crate::browser::{BrowserCapabilities, viewport_or_default};
use crate::error::{Result, UiError, js_reason};
use crate::events::{EventListener, remove_all};
use crate::hooks::use_responsive_context;
use crate::timers::GlooScheduler;

/// The manager type provided through context.
pub type ParticleManager = ParticlesConfigurationManager<BrowserCapabilities>;

fn random() -> f64 {
    js_sys::Math::random()
}

/// Everything one running background owns.
struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    manager: ParticleManager,
    policy: PerformancePolicy,
    options: ParticleOptions,
    field: ParticleField,
    gate: FrameGate,
    sampler: Option<FrameRateSampler>,
    latch: DegradationLatch,
    pointer: Option<(f64, f64)>,
    analytics: Option<Analytics>,
}

impl Engine {
    fn new(
        canvas: HtmlCanvasElement,
        manager: ParticleManager,
        policy: PerformancePolicy,
        breakpoint: Breakpoint,
        device: &DeviceInfo,
        analytics: Option<Analytics>,
    ) -> Result<Self> {
        let ctx = context_2d(&canvas)?;
        let options = manager.breakpoint_optimized_config(breakpoint, None);
        let (width, height) = logical_size(&canvas);
        fit_canvas(&canvas, &ctx, width, height, pixel_ratio(&options))?;

        let field = ParticleField::new(
            FieldSettings::from_options(&options),
            width,
            height,
            &mut random,
        );
        let sampler = (options.is_animated() && policy.applies_to(device)).then(|| policy.sampler());

        Ok(Self {
            canvas,
            ctx,
            manager,
            policy,
            gate: FrameGate::new(options.fps_limit),
            options,
            field,
            sampler,
            latch: DegradationLatch::new(),
            pointer: None,
            analytics,
        })
    }

    fn frame(&mut self, timing: FrameTiming) {
        if let Some(sample) = self
            .sampler
            .as_mut()
            .and_then(|sampler| sampler.record_frame(timing.timestamp))
        {
            self.sampler = None;
            if self.latch.judge(&self.policy, &sample) {
                self.set_options(self.latch.apply(&self.policy, &self.options));
                if let Some(analytics) = &self.analytics {
                    analytics.track(&AnalyticsEvent::ParticlesDegraded {
                        measured_fps: sample.fps,
                        particle_count: self.options.particles.number,
                    });
                }
            }
        }

        if !self.gate.admit(timing.timestamp) {
            return;
        }
        self.field.step(timing.delta, self.pointer);
        self.draw();
    }

    fn set_options(&mut self, options: ParticleOptions) {
        self.gate = FrameGate::new(options.fps_limit);
        self.field
            .reconfigure(FieldSettings::from_options(&options), &mut random);
        self.options = options;
    }

    fn reconfigure_for(&mut self, breakpoint: Breakpoint) {
        let options = self
            .manager
            .breakpoint_optimized_config(breakpoint, None);
        self.set_options(self.latch.apply(&self.policy, &options));
        self.draw();
    }

    fn refit(&mut self) {
        let (width, height) = logical_size(&self.canvas);
        match fit_canvas(&self.canvas, &self.ctx, width, height, pixel_ratio(&self.options)) {
            Ok(()) => {
                self.field.resize(width, height);
                self.draw();
            }
            Err(e) => tracing::warn!("particle canvas resize failed: {}", e),
        }
    }

    /// Canvas-local pointer position, `None` outside the canvas.
    fn local_point(&self, event: &MouseEvent) -> Option<(f64, f64)> {
        let rect = self.canvas.get_bounding_client_rect();
        let x = f64::from(event.client_x()) - rect.left();
        let y = f64::from(event.client_y()) - rect.top();
        (x >= 0.0 && y >= 0.0 && x <= rect.width() && y <= rect.height()).then_some((x, y))
    }

    fn draw(&self) {
        let (width, height) = self.field.size();
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, width, height);

        let settings = self.field.settings();
        ctx.set_line_width(settings.link_width);
        ctx.set_stroke_style_str(&settings.link_color);
        for link in self.field.links() {
            ctx.set_global_alpha(link.alpha);
            ctx.begin_path();
            ctx.move_to(link.x1, link.y1);
            ctx.line_to(link.x2, link.y2);
            ctx.stroke();
        }

        ctx.set_global_alpha(settings.opacity);
        for particle in self.field.particles() {
            if let Some(color) = self.field.color(particle) {
                ctx.set_fill_style_str(color);
            }
            ctx.begin_path();
            if let Err(e) = ctx.arc(particle.x, particle.y, particle.radius, 0.0, TAU) {
                tracing::debug!("particle arc rejected: {}", js_reason(&e));
                continue;
            }
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }
}

fn logical_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() > 0.0 && rect.height() > 0.0 {
        (rect.width(), rect.height())
    } else {
        let viewport = viewport_or_default();
        (viewport.width, viewport.height)
    }
}

fn pixel_ratio(options: &ParticleOptions) -> f64 {
    if options.detect_retina {
        BrowserCapabilities.device_pixel_ratio().unwrap_or(1.0)
    } else {
        1.0
    }
}

/// Running background: the loop plus its listeners.
struct Running {
    animation: Option<AnimationHandle>,
    listeners: Vec<EventListener>,
    refit: DebounceCancel<(), GlooScheduler>,
}

impl Running {
    fn stop(self) {
        self.refit.cancel();
        remove_all(self.listeners);
        if let Some(animation) = self.animation {
            if let Err(e) = animation.stop() {
                tracing::warn!("{}", e);
            }
        }
    }
}

fn attached(listener: Result<EventListener>) -> Option<EventListener> {
    listener
        .inspect_err(|e| tracing::warn!("particle listener unavailable: {}", e))
        .ok()
}

/// `refit_ms` debounces canvas re-fits on window resize.
fn start(engine: Rc<RefCell<Engine>>, refit_ms: u32) -> Result<Running> {
    let (animated, hover, click) = {
        let engine = engine.borrow();
        let interactivity = &engine.options.interactivity;
        (
            engine.options.is_animated(),
            interactivity.on_hover.enable,
            interactivity.on_click.enable,
        )
    };

    engine.borrow().draw();

    let resize_engine = Rc::clone(&engine);
    let (refit, refit_cancel) = debounce(GlooScheduler, refit_ms, move |()| {
        resize_engine.borrow_mut().refit();
    });
    let mut listeners: Vec<EventListener> =
        attached(EventListener::on_window("resize", move |_| refit.call(())))
            .into_iter()
            .collect();

    if hover {
        let move_engine = Rc::clone(&engine);
        listeners.extend(attached(EventListener::on_window("mousemove", move |event| {
            let point = event
                .dyn_ref::<MouseEvent>()
                .and_then(|mouse| move_engine.borrow().local_point(mouse));
            move_engine.borrow_mut().pointer = point;
        })));
        let leave_engine = Rc::clone(&engine);
        listeners.extend(attached(EventListener::on_window("mouseout", move |event| {
            let left_window = event
                .dyn_ref::<MouseEvent>()
                .is_some_and(|mouse| mouse.related_target().is_none());
            if left_window {
                leave_engine.borrow_mut().pointer = None;
            }
        })));
    }

    if click {
        let click_engine = Rc::clone(&engine);
        listeners.extend(attached(EventListener::on_window("click", move |event| {
            let point = event
                .dyn_ref::<MouseEvent>()
                .and_then(|mouse| click_engine.borrow().local_point(mouse));
            if let Some((x, y)) = point {
                click_engine.borrow_mut().field.push(x, y, &mut random);
            }
        })));
    }

    let animation = if animated {
        let frame_engine = Rc::clone(&engine);
        match start_animation_loop(move |timing| frame_engine.borrow_mut().frame(timing)) {
            Ok(handle) => Some(handle),
            Err(e) => {
                refit_cancel.cancel();
                remove_all(listeners);
                return Err(UiError::Animation(e.to_string()));
            }
        }
    } else {
        None
    };

    Ok(Running {
        animation,
        listeners,
        refit: refit_cancel,
    })
}

/// Re-fit debounce: the page's resize window, or the default one.
fn refit_delay() -> u32 {
    use_context::<ResponsiveOptions>()
        .unwrap_or_default()
        .debounce_ms
}

/// Leave the canvas out after an init failure.
fn disable(failed: RwSignal<bool>, reason: &UiError) -> ResponsiveError {
    let error = ResponsiveError::decoration_unavailable(reason);
    tracing::warn!(kind = %error.kind, fallback = ?error.fallback, "particle background: {}", error.message);
    failed.set(true);
    error
}

/// Full-bleed particle canvas behind its parent. Reads the manager and the
/// particle settings from context; without a manager it renders nothing.
#[component]
pub fn ParticleBackground() -> impl IntoView {
    let manager = use_context::<ParticleManager>();
    let settings = use_context::<ParticlesConfig>().unwrap_or_default();
    let responsive = use_responsive_context();
    let analytics = use_analytics();
    let refit_ms = refit_delay();
    let canvas_ref = NodeRef::<html::Canvas>::new();
    let failed = RwSignal::new(manager.is_none() || !settings.enabled);

    Effect::new(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let Some(manager) = manager.clone() else {
            return;
        };

        let breakpoint = responsive.current_breakpoint_untracked();
        let device = responsive.device_info_untracked();
        let engine = match Engine::new(
            canvas,
            manager,
            settings.performance,
            breakpoint,
            &device,
            analytics.clone(),
        ) {
            Ok(engine) => Rc::new(RefCell::new(engine)),
            Err(e) => {
                disable(failed, &e);
                return;
            }
        };

        let running = match start(Rc::clone(&engine), refit_ms) {
            Ok(running) => running,
            Err(e) => {
                disable(failed, &e);
                return;
            }
        };

        let watched = Rc::clone(&engine);
        Effect::new(move |previous: Option<Breakpoint>| {
            let breakpoint = responsive.current_breakpoint();
            if previous.is_some_and(|previous| previous != breakpoint) {
                watched.borrow_mut().reconfigure_for(breakpoint);
            }
            breakpoint
        });

        let running = SendWrapper::new(running);
        on_cleanup(move || running.take().stop());
    });

    view! {
        <Show when=move || !failed.get()>
            <canvas node_ref=canvas_ref class="particle-background" aria-hidden="true"></canvas>
        </Show>
    }
}
