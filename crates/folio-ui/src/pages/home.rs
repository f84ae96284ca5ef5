//! Landing page

use leptos::prelude::*;

use crate::components::{About, ContactStrip, Hero, Process, Services, WorkGrid};

/// Landing page: every section in reading order
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="home-page">
            <Hero />
            <About />
            <Services />
            <WorkGrid />
            <Process />
            <ContactStrip />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_component_exists() {
        let _component = Home;
    }
}
