//! 404 page

use folio_core::TextKey;
use leptos::prelude::*;

use crate::i18n::use_i18n;
use crate::router::routes;

#[component]
pub fn NotFound() -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <div class="not-found-page">
            <h1>{move || i18n.t(TextKey::NotFoundTitle)}</h1>
            <p>{move || i18n.t(TextKey::NotFoundBody)}</p>
            <a href=routes::HOME>{move || i18n.t(TextKey::NotFoundBack)}</a>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_component_exists() {
        let _component = NotFound;
    }
}
