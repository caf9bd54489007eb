//! Message dictionaries keyed by `(locale, message id)`.
//!
//! Dictionaries live in `locales/<code>.json` as flat `"key": "text"` maps,
//! are embedded at compile time and parsed once at startup.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::locale::Locale;

const EMBEDDED: [(Locale, &str); 4] = [
    (Locale::En, include_str!("../../../locales/en.json")),
    (Locale::Pt, include_str!("../../../locales/pt.json")),
    (Locale::Es, include_str!("../../../locales/es.json")),
    (Locale::Fr, include_str!("../../../locales/fr.json")),
];

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Invalid dictionary for locale '{0}': {1}")]
    Parse(Locale, String),
}

/// Lookup table built once at startup.
///
/// `dictionary(locale)` returns the locale's messages merged over the
/// default locale, so a key missing in `fr` still renders in English.
#[derive(Debug, Clone)]
pub struct Translations {
    entries: HashMap<(Locale, String), String>,
    merged: HashMap<Locale, BTreeMap<String, String>>,
}

impl Translations {
    /// Load the dictionaries shipped with the binary
    pub fn load_embedded() -> Result<Self, TranslationError> {
        Self::from_sources(EMBEDDED.iter().map(|(l, s)| (*l, *s)))
    }

    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (Locale, &'a str)>,
    ) -> Result<Self, TranslationError> {
        let mut entries = HashMap::new();

        for (locale, source) in sources {
            let dictionary: BTreeMap<String, String> = serde_json::from_str(source)
                .map_err(|e| TranslationError::Parse(locale, e.to_string()))?;

            for (key, text) in dictionary {
                entries.insert((locale, key), text);
            }
        }

        let defaults: BTreeMap<String, String> = entries
            .iter()
            .filter(|((l, _), _)| *l == Locale::default())
            .map(|((_, k), v)| (k.clone(), v.clone()))
            .collect();

        let merged = Locale::ALL
            .into_iter()
            .map(|locale| {
                let mut dictionary = defaults.clone();
                for ((l, key), text) in &entries {
                    if *l == locale {
                        dictionary.insert(key.clone(), text.clone());
                    }
                }
                (locale, dictionary)
            })
            .collect();

        Ok(Self { entries, merged })
    }

    /// Translate `key`, falling back to the default locale, then to the key itself
    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.entries
            .get(&(locale, key.to_string()))
            .or_else(|| self.entries.get(&(Locale::default(), key.to_string())))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Full message map for templates
    pub fn dictionary(&self, locale: Locale) -> &BTreeMap<String, String> {
        // every locale is populated in from_sources
        &self.merged[&locale]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Translations {
        Translations::from_sources([
            (Locale::En, r#"{"nav.home": "Home", "nav.cart": "Cart"}"#),
            (Locale::Pt, r#"{"nav.home": "Início"}"#),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_uses_requested_locale() {
        assert_eq!(sample().get(Locale::Pt, "nav.home"), "Início");
    }

    #[test]
    fn test_lookup_falls_back_to_default_locale() {
        assert_eq!(sample().get(Locale::Pt, "nav.cart"), "Cart");
        assert_eq!(sample().get(Locale::Fr, "nav.home"), "Home");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(sample().get(Locale::Es, "missing.key"), "missing.key");
    }

    #[test]
    fn test_dictionary_is_merged_over_default() {
        let t = sample();
        let pt = t.dictionary(Locale::Pt);
        assert_eq!(pt["nav.home"], "Início");
        assert_eq!(pt["nav.cart"], "Cart");
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let result = Translations::from_sources([(Locale::En, "not json")]);
        assert!(matches!(result, Err(TranslationError::Parse(Locale::En, _))));
    }

    #[test]
    fn test_embedded_dictionaries_share_keys() {
        let t = Translations::load_embedded().unwrap();
        let en = t.dictionary(Locale::En);
        for locale in [Locale::Pt, Locale::Es, Locale::Fr] {
            for key in en.keys() {
                assert!(
                    t.entries.contains_key(&(locale, key.clone())),
                    "{} is missing '{}'",
                    locale,
                    key
                );
            }
        }
    }
}
