//! German/English language selection and the site dictionary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::De, Self::En];

    /// BCP 47 code used for `<html lang>`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::De => Self::En,
            Self::En => Self::De,
        }
    }

    /// Pick a language from a browser locale such as `en-US`. Anything not
    /// English falls back to German.
    #[must_use]
    pub fn from_locale(locale: Option<&str>) -> Self {
        Self::from_locale_or(locale, Self::default())
    }

    /// Like [`Language::from_locale`] with an explicit fallback.
    #[must_use]
    pub fn from_locale_or(locale: Option<&str>, fallback: Self) -> Self {
        locale
            .and_then(|l| l.split(['-', '_']).next())
            .and_then(|primary| primary.parse().ok())
            .unwrap_or(fallback)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Self::De),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Dictionary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    NavAbout,
    NavServices,
    NavWork,
    NavProcess,
    NavContact,
    LanguageSwitchLabel,
    HeroEyebrow,
    HeroTitle,
    HeroSubtitle,
    HeroCta,
    AboutTitle,
    AboutBody,
    ServicesTitle,
    ServiceWebTitle,
    ServiceWebBody,
    ServiceSystemsTitle,
    ServiceSystemsBody,
    ServiceConsultingTitle,
    ServiceConsultingBody,
    WorkTitle,
    WorkProjectOne,
    WorkProjectTwo,
    WorkProjectThree,
    WorkProjectFour,
    ProcessTitle,
    ProcessDiscover,
    ProcessDesign,
    ProcessBuild,
    ProcessLaunch,
    ContactTitle,
    ContactBody,
    ContactEmail,
    FooterRights,
    FooterImprint,
    FooterPrivacy,
    ConsentMessage,
    ConsentAccept,
    ConsentDecline,
    NotFoundTitle,
    NotFoundBody,
    NotFoundBack,
}

impl TextKey {
    pub const ALL: [Self; 41] = [
        Self::NavAbout,
        Self::NavServices,
        Self::NavWork,
        Self::NavProcess,
        Self::NavContact,
        Self::LanguageSwitchLabel,
        Self::HeroEyebrow,
        Self::HeroTitle,
        Self::HeroSubtitle,
        Self::HeroCta,
        Self::AboutTitle,
        Self::AboutBody,
        Self::ServicesTitle,
        Self::ServiceWebTitle,
        Self::ServiceWebBody,
        Self::ServiceSystemsTitle,
        Self::ServiceSystemsBody,
        Self::ServiceConsultingTitle,
        Self::ServiceConsultingBody,
        Self::WorkTitle,
        Self::WorkProjectOne,
        Self::WorkProjectTwo,
        Self::WorkProjectThree,
        Self::WorkProjectFour,
        Self::ProcessTitle,
        Self::ProcessDiscover,
        Self::ProcessDesign,
        Self::ProcessBuild,
        Self::ProcessLaunch,
        Self::ContactTitle,
        Self::ContactBody,
        Self::ContactEmail,
        Self::FooterRights,
        Self::FooterImprint,
        Self::FooterPrivacy,
        Self::ConsentMessage,
        Self::ConsentAccept,
        Self::ConsentDecline,
        Self::NotFoundTitle,
        Self::NotFoundBody,
        Self::NotFoundBack,
    ];
}

/// Look up a dictionary string.
#[must_use]
pub const fn translate(lang: Language, key: TextKey) -> &'static str {
    let (de, en) = entry(key);
    match lang {
        Language::De => de,
        Language::En => en,
    }
}

const fn entry(key: TextKey) -> (&'static str, &'static str) {
    match key {
        TextKey::NavAbout => ("Über mich", "About"),
        TextKey::NavServices => ("Leistungen", "Services"),
        TextKey::NavWork => ("Projekte", "Work"),
        TextKey::NavProcess => ("Ablauf", "Process"),
        TextKey::NavContact => ("Kontakt", "Contact"),
        TextKey::LanguageSwitchLabel => ("English", "Deutsch"),
        TextKey::HeroEyebrow => ("Softwareentwicklung", "Software engineering"),
        TextKey::HeroTitle => (
            "Robuste Software, sauber gebaut.",
            "Robust software, built cleanly.",
        ),
        TextKey::HeroSubtitle => (
            "Ich entwickle schnelle Web-Anwendungen und zuverlässige Systeme.",
            "I build fast web applications and reliable systems.",
        ),
        TextKey::HeroCta => ("Projekt anfragen", "Start a project"),
        TextKey::AboutTitle => ("Über mich", "About me"),
        TextKey::AboutBody => (
            "Seit über zehn Jahren begleite ich Produkte von der ersten Idee bis in den Betrieb.",
            "For more than ten years I have taken products from first idea to production.",
        ),
        TextKey::ServicesTitle => ("Leistungen", "Services"),
        TextKey::ServiceWebTitle => ("Web-Anwendungen", "Web applications"),
        TextKey::ServiceWebBody => (
            "Responsive Oberflächen mit Fokus auf Performance und Barrierefreiheit.",
            "Responsive interfaces focused on performance and accessibility.",
        ),
        TextKey::ServiceSystemsTitle => ("Systeme & Backends", "Systems & backends"),
        TextKey::ServiceSystemsBody => (
            "Dienste, Schnittstellen und Datenverarbeitung, die unter Last bestehen.",
            "Services, APIs and data processing that hold up under load.",
        ),
        TextKey::ServiceConsultingTitle => ("Beratung", "Consulting"),
        TextKey::ServiceConsultingBody => (
            "Architektur-Reviews, Code-Audits und Coaching für Teams.",
            "Architecture reviews, code audits and team coaching.",
        ),
        TextKey::WorkTitle => ("Ausgewählte Projekte", "Selected work"),
        TextKey::WorkProjectOne => ("Buchungsplattform", "Booking platform"),
        TextKey::WorkProjectTwo => ("Telemetrie-Pipeline", "Telemetry pipeline"),
        TextKey::WorkProjectThree => ("Design-System", "Design system"),
        TextKey::WorkProjectFour => ("Lager-App", "Warehouse app"),
        TextKey::ProcessTitle => ("So arbeite ich", "How I work"),
        TextKey::ProcessDiscover => ("Verstehen", "Discover"),
        TextKey::ProcessDesign => ("Entwerfen", "Design"),
        TextKey::ProcessBuild => ("Umsetzen", "Build"),
        TextKey::ProcessLaunch => ("Ausliefern", "Launch"),
        TextKey::ContactTitle => ("Lassen Sie uns sprechen", "Let's talk"),
        TextKey::ContactBody => (
            "Erzählen Sie mir von Ihrem Vorhaben. Ich melde mich innerhalb von zwei Werktagen.",
            "Tell me about your project. I reply within two business days.",
        ),
        TextKey::ContactEmail => ("E-Mail schreiben", "Send an email"),
        TextKey::FooterRights => ("Alle Rechte vorbehalten.", "All rights reserved."),
        TextKey::FooterImprint => ("Impressum", "Imprint"),
        TextKey::FooterPrivacy => ("Datenschutz", "Privacy"),
        TextKey::ConsentMessage => (
            "Ich nutze anonyme Statistiken, um diese Seite zu verbessern. Einverstanden?",
            "I use anonymous statistics to improve this site. Is that okay?",
        ),
        TextKey::ConsentAccept => ("Zustimmen", "Accept"),
        TextKey::ConsentDecline => ("Ablehnen", "Decline"),
        TextKey::NotFoundTitle => ("404 - Seite nicht gefunden", "404 - Page not found"),
        TextKey::NotFoundBody => (
            "Die gesuchte Seite existiert nicht.",
            "The page you're looking for doesn't exist.",
        ),
        TextKey::NotFoundBack => ("Zur Startseite", "Back to home"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_every_key_translated_in_both_languages() {
        for key in TextKey::ALL {
            for lang in Language::ALL {
                assert!(!translate(lang, key).trim().is_empty(), "{key:?} missing in {lang}");
            }
        }
    }

    #[test]
    fn test_key_list_has_no_duplicates() {
        let unique: HashSet<_> = TextKey::ALL.iter().collect();
        assert_eq!(unique.len(), TextKey::ALL.len());
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Language::De.toggle(), Language::En);
        assert_eq!(Language::De.toggle().toggle(), Language::De);
    }

    #[test]
    fn test_from_locale() {
        assert_eq!(Language::from_locale(Some("en-US")), Language::En);
        assert_eq!(Language::from_locale(Some("EN_gb")), Language::En);
        assert_eq!(Language::from_locale(Some("de-AT")), Language::De);
        assert_eq!(Language::from_locale(Some("fr-FR")), Language::De);
        assert_eq!(Language::from_locale(None), Language::De);
        assert_eq!(Language::from_locale_or(Some("fr-FR"), Language::En), Language::En);
        assert_eq!(Language::from_locale_or(Some("de"), Language::En), Language::De);
    }

    #[test]
    fn test_language_switch_label_names_the_other_language() {
        assert_eq!(translate(Language::De, TextKey::LanguageSwitchLabel), "English");
        assert_eq!(translate(Language::En, TextKey::LanguageSwitchLabel), "Deutsch");
    }
}
