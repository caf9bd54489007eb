use serde::{Deserialize, Serialize};

use super::locale::Locale;

/// A value stored once per storefront locale (`name_en`, `name_pt`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub en: T,
    pub pt: T,
    pub es: T,
    pub fr: T,
}

impl<T> Localized<T> {
    pub fn new(en: T, pt: T, es: T, fr: T) -> Self {
        Self { en, pt, es, fr }
    }

    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Pt => &self.pt,
            Locale::Es => &self.es,
            Locale::Fr => &self.fr,
        }
    }
}

impl Localized<Option<String>> {
    /// Text for `locale`, falling back to English when the translation is missing
    pub fn text(&self, locale: Locale) -> Option<&str> {
        self.get(locale)
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.en.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_selects_locale() {
        let name = Localized::new("Dress", "Vestido", "Vestido", "Robe");
        assert_eq!(*name.get(Locale::Fr), "Robe");
        assert_eq!(*name.get(Locale::En), "Dress");
    }

    #[test]
    fn test_optional_text_falls_back_to_english() {
        let story = Localized::new(
            Some("Woven by hand".to_string()),
            Some(String::new()),
            None,
            Some("Tissé à la main".to_string()),
        );

        assert_eq!(story.text(Locale::Pt), Some("Woven by hand"));
        assert_eq!(story.text(Locale::Es), Some("Woven by hand"));
        assert_eq!(story.text(Locale::Fr), Some("Tissé à la main"));
    }
}
