//! Reactive language context.

use folio_core::{AnalyticsEvent, AnalyticsSink, Language, TextKey, translate};
use leptos::prelude::*;

use crate::analytics::{Analytics, use_analytics};
use crate::browser::{browser_locale, set_document_language};

/// Current language plus the analytics gate used when it changes.
#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: RwSignal<Language>,
    analytics: StoredValue<Option<Analytics>>,
}

impl I18n {
    fn new(language: Language, analytics: Option<Analytics>) -> Self {
        Self {
            language: RwSignal::new(language),
            analytics: StoredValue::new(analytics),
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language.get()
    }

    /// Tracked lookup in the current language.
    #[must_use]
    pub fn t(&self, key: TextKey) -> &'static str {
        translate(self.language.get(), key)
    }

    /// Switch to the other language and update `<html lang>`.
    pub fn toggle(&self) {
        let to = self.switch();
        set_document_language(to.code());
    }

    /// Flip the signal and report it. Leaves the document alone.
    fn switch(&self) -> Language {
        let from = self.language.get_untracked();
        let to = from.toggle();
        self.language.set(to);
        tracing::debug!(%from, %to, "language switched");
        self.analytics.with_value(|analytics| {
            if let Some(analytics) = analytics {
                analytics.track(&AnalyticsEvent::LanguageSwitched { from, to });
            }
        });
        to
    }
}

/// Pick the starting language from the browser locale and provide it.
pub fn provide_i18n(default: Language) -> I18n {
    let language = Language::from_locale_or(browser_locale().as_deref(), default);
    set_document_language(language.code());
    let i18n = I18n::new(language, use_analytics());
    provide_context(i18n);
    i18n
}

/// The language context, or the default language without a provider.
pub fn use_i18n() -> I18n {
    use_context::<I18n>().unwrap_or_else(|| I18n::new(Language::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_context_is_german() {
        let owner = Owner::new();
        owner.with(|| {
            let i18n = use_i18n();
            assert_eq!(i18n.language(), Language::De);
            assert_eq!(i18n.t(TextKey::NavContact), translate(Language::De, TextKey::NavContact));
        });
    }

    #[test]
    fn test_switch_flips_language() {
        let owner = Owner::new();
        owner.with(|| {
            let i18n = I18n::new(Language::De, None);
            assert_eq!(i18n.switch(), Language::En);
            assert_eq!(i18n.language(), Language::En);
            assert_eq!(i18n.t(TextKey::NavContact), translate(Language::En, TextKey::NavContact));
            assert_eq!(i18n.switch(), Language::De);
            assert_eq!(i18n.language(), Language::De);
        });
    }
}
