//! Routes. The site is a single page; anything else is a 404.

use leptos::prelude::*;
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{Home, NotFound};

/// Route paths
pub mod routes {
    pub const HOME: &str = "/";
}

#[component]
pub fn AppRouter() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=StaticSegment("") view=Home />
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_constants() {
        assert_eq!(routes::HOME, "/");
    }

    #[test]
    fn test_router_component_exists() {
        let _component = AppRouter;
    }

    #[test]
    fn test_all_page_components_exist() {
        let _home = Home;
        let _not_found = NotFound;
    }
}
