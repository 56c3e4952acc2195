use std::collections::HashMap;

pub const MSG_SAVED: &str = "threatmodel.saved";
pub const MSG_SAVE_FAILED: &str = "threatmodel.errors.save";
pub const MSG_OPEN_FAILED: &str = "threatmodel.errors.open";

const DEFAULT_LOCALE: &str = "en";

const EN: &[(&str, &str)] = &[
    (MSG_SAVED, "Threat model successfully saved"),
    (MSG_SAVE_FAILED, "Failed to update threat model"),
    (MSG_OPEN_FAILED, "Failed to open threat model"),
];

const DE: &[(&str, &str)] = &[
    (MSG_SAVED, "Bedrohungsmodell erfolgreich gespeichert"),
    (MSG_SAVE_FAILED, "Bedrohungsmodell konnte nicht aktualisiert werden"),
    (MSG_OPEN_FAILED, "Bedrohungsmodell konnte nicht geöffnet werden"),
];

const FR: &[(&str, &str)] = &[
    (MSG_SAVED, "Modèle de menace enregistré"),
    (MSG_SAVE_FAILED, "Échec de la mise à jour du modèle de menace"),
    (MSG_OPEN_FAILED, "Échec de l'ouverture du modèle de menace"),
];

fn table(locale: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match locale {
        "en" => Some(EN),
        "de" => Some(DE),
        "fr" => Some(FR),
        _ => None,
    }
}

/// Message catalog for one locale, falling back to English and then to the
/// key itself.
#[derive(Debug, Clone)]
pub struct Messages {
    locale: String,
    entries: HashMap<&'static str, &'static str>,
    fallback: HashMap<&'static str, &'static str>,
}

impl Messages {
    /// `locale` may carry a region (`de-AT`, `fr_CA`); only the language is
    /// used.
    pub fn new(locale: &str) -> Self {
        let lang = locale
            .split(['-', '_'])
            .next()
            .unwrap_or(DEFAULT_LOCALE)
            .trim()
            .to_ascii_lowercase();
        let (locale, entries) = match table(&lang) {
            Some(t) => (lang, t),
            None => {
                tracing::warn!(
                    target: "tmstore.notify",
                    locale = %locale,
                    "unsupported locale, using {}",
                    DEFAULT_LOCALE
                );
                (DEFAULT_LOCALE.to_string(), EN)
            }
        };
        Self {
            locale,
            entries: entries.iter().copied().collect(),
            fallback: EN.iter().copied().collect(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Localized text for `key`, falling back to English and then to the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries
            .get(key)
            .or_else(|| self.fallback.get(key))
            .copied()
            .unwrap_or(key)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_locale() {
        let de = Messages::new("de-AT");
        assert_eq!(de.locale(), "de");
        assert_eq!(de.get(MSG_SAVED), "Bedrohungsmodell erfolgreich gespeichert");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let m = Messages::new("xx");
        assert_eq!(m.locale(), "en");
        assert_eq!(m.get(MSG_SAVE_FAILED), "Failed to update threat model");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(Messages::default().get("nav.home"), "nav.home");
    }
}
