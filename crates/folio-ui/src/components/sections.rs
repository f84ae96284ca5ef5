//! Landing page sections.

use folio_core::container::ContainerQueryOptions;
use folio_core::{AnalyticsEvent, AnalyticsSink, Breakpoint, ContainerSize, TextKey};
use leptos::prelude::*;

use super::particles::ParticleBackground;
use crate::analytics::use_analytics;
use crate::hooks::{use_container_query, use_responsive_context};
use crate::i18n::use_i18n;

/// Element ids of the page sections.
pub mod anchors {
    pub const HERO: &str = "top";
    pub const ABOUT: &str = "about";
    pub const SERVICES: &str = "services";
    pub const WORK: &str = "work";
    pub const PROCESS: &str = "process";
    pub const CONTACT: &str = "contact";
}

pub const CONTACT_EMAIL: &str = "hello@folio.dev";

const SERVICES: [(TextKey, TextKey); 3] = [
    (TextKey::ServiceWebTitle, TextKey::ServiceWebBody),
    (TextKey::ServiceSystemsTitle, TextKey::ServiceSystemsBody),
    (TextKey::ServiceConsultingTitle, TextKey::ServiceConsultingBody),
];

const PROJECTS: [TextKey; 4] = [
    TextKey::WorkProjectOne,
    TextKey::WorkProjectTwo,
    TextKey::WorkProjectThree,
    TextKey::WorkProjectFour,
];

const STEPS: [TextKey; 4] = [
    TextKey::ProcessDiscover,
    TextKey::ProcessDesign,
    TextKey::ProcessBuild,
    TextKey::ProcessLaunch,
];

/// Service grid columns for the grid's own width.
#[must_use]
pub const fn service_columns(size: ContainerSize) -> u8 {
    match size {
        ContainerSize::Small => 1,
        ContainerSize::Medium => 2,
        ContainerSize::Large => 3,
    }
}

/// Work grid columns for the viewport breakpoint.
#[must_use]
pub const fn work_columns(breakpoint: Breakpoint) -> u8 {
    match breakpoint {
        Breakpoint::Xs | Breakpoint::Sm => 1,
        Breakpoint::Md | Breakpoint::Lg => 2,
        Breakpoint::Xl | Breakpoint::Xxl => 4,
    }
}

fn grid_style(columns: u8) -> String {
    format!("grid-template-columns: repeat({columns}, minmax(0, 1fr));")
}

#[component]
pub fn Hero() -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <section id=anchors::HERO class="hero">
            <ParticleBackground />
            <div class="hero-content">
                <p class="hero-eyebrow">{move || i18n.t(TextKey::HeroEyebrow)}</p>
                <h1>{move || i18n.t(TextKey::HeroTitle)}</h1>
                <p class="hero-subtitle">{move || i18n.t(TextKey::HeroSubtitle)}</p>
                <a class="button" href=format!("#{}", anchors::CONTACT)>
                    {move || i18n.t(TextKey::HeroCta)}
                </a>
            </div>
        </section>
    }
}

#[component]
pub fn About() -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <section id=anchors::ABOUT class="about">
            <h2>{move || i18n.t(TextKey::AboutTitle)}</h2>
            <p>{move || i18n.t(TextKey::AboutBody)}</p>
        </section>
    }
}

/// Service cards; the column count follows the grid's own width.
#[component]
pub fn Services() -> impl IntoView {
    let i18n = use_i18n();
    let options = use_context::<ContainerQueryOptions>().unwrap_or_default();
    let query = use_container_query(options);
    let size = move || query.dimensions().size();

    let cards = SERVICES
        .iter()
        .map(|&(title, body)| {
            view! {
                <article class="service-card">
                    <h3>{move || i18n.t(title)}</h3>
                    <p>{move || i18n.t(body)}</p>
                </article>
            }
        })
        .collect_view();

    view! {
        <section id=anchors::SERVICES class="services">
            <h2>{move || i18n.t(TextKey::ServicesTitle)}</h2>
            <div
                class="services-grid"
                node_ref=query.container_ref
                data-size=move || size().as_str()
                style=move || grid_style(service_columns(size()))
            >
                {cards}
            </div>
        </section>
    }
}

/// Project tiles; the column count follows the viewport breakpoint.
#[component]
pub fn WorkGrid() -> impl IntoView {
    let i18n = use_i18n();
    let responsive = use_responsive_context();

    let tiles = PROJECTS
        .iter()
        .map(|&key| {
            view! {
                <article class="work-tile">
                    <h3>{move || i18n.t(key)}</h3>
                </article>
            }
        })
        .collect_view();

    view! {
        <section id=anchors::WORK class="work">
            <h2>{move || i18n.t(TextKey::WorkTitle)}</h2>
            <div
                class="work-grid"
                style=move || grid_style(work_columns(responsive.current_breakpoint()))
            >
                {tiles}
            </div>
        </section>
    }
}

#[component]
pub fn Process() -> impl IntoView {
    let i18n = use_i18n();

    let steps = STEPS
        .iter()
        .enumerate()
        .map(|(index, &key)| {
            view! {
                <li class="process-step">
                    <span class="process-number">{format!("{:02}", index + 1)}</span>
                    <span>{move || i18n.t(key)}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <section id=anchors::PROCESS class="process">
            <h2>{move || i18n.t(TextKey::ProcessTitle)}</h2>
            <ol class="process-steps">{steps}</ol>
        </section>
    }
}

#[component]
pub fn ContactStrip() -> impl IntoView {
    let i18n = use_i18n();
    let analytics = StoredValue::new(use_analytics());
    let on_click = move |_| {
        analytics.with_value(|analytics| {
            if let Some(analytics) = analytics {
                analytics.track(&AnalyticsEvent::ContactClicked {
                    channel: "email".to_string(),
                });
            }
        });
    };

    view! {
        <section id=anchors::CONTACT class="contact-strip">
            <h2>{move || i18n.t(TextKey::ContactTitle)}</h2>
            <p>{move || i18n.t(TextKey::ContactBody)}</p>
            <a class="button" href=format!("mailto:{CONTACT_EMAIL}") on:click=on_click>
                {move || i18n.t(TextKey::ContactEmail)}
            </a>
        </section>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <footer class="site-footer">
            <p>"© folio. " {move || i18n.t(TextKey::FooterRights)}</p>
            <nav class="legal-nav">
                <a href="#imprint">{move || i18n.t(TextKey::FooterImprint)}</a>
                <a href="#privacy">{move || i18n.t(TextKey::FooterPrivacy)}</a>
            </nav>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_components_exist() {
        let _hero = Hero;
        let _about = About;
        let _services = Services;
        let _work = WorkGrid;
        let _process = Process;
        let _contact = ContactStrip;
        let _footer = Footer;
    }

    #[test]
    fn test_work_columns_never_shrink_with_width() {
        let columns: Vec<u8> = Breakpoint::ALL.iter().map(|&bp| work_columns(bp)).collect();
        assert!(columns.windows(2).all(|pair| pair.first() <= pair.last()));
        assert_eq!(work_columns(Breakpoint::Xs), 1);
        assert_eq!(work_columns(Breakpoint::Xxl), 4);
    }

    #[test]
    fn test_service_columns_follow_container_size() {
        assert_eq!(service_columns(ContainerSize::Small), 1);
        assert_eq!(service_columns(ContainerSize::Medium), 2);
        assert_eq!(service_columns(ContainerSize::Large), 3);
    }

    #[test]
    fn test_grid_style() {
        assert_eq!(grid_style(2), "grid-template-columns: repeat(2, minmax(0, 1fr));");
    }
}
