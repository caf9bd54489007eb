use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storefront locales. The first path segment of every page selects one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
    Es,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Pt, Locale::Es, Locale::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
            Locale::Es => "es",
            Locale::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of inspecting a page path for its locale segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalePath {
    /// Path already starts with a supported locale
    Localized(Locale),
    /// Path must be redirected to this localized location
    Redirect(String),
    /// Path is not a page (API, docs, health) and is left alone
    Unlocalized,
}

const UNLOCALIZED_PREFIXES: [&str; 4] = ["/api", "/health", "/swagger-ui", "/api-docs"];

/// Resolve the locale of a request path.
///
/// Locale-less paths get the default locale prefixed. A first segment that
/// looks like a locale code (two lowercase letters) but is not supported is
/// replaced rather than kept as part of the path.
pub fn resolve_locale_path(path: &str) -> LocalePath {
    if UNLOCALIZED_PREFIXES
        .iter()
        .any(|p| path == *p || path.starts_with(&format!("{}/", p)))
    {
        return LocalePath::Unlocalized;
    }

    let trimmed = path.trim_start_matches('/');
    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, Some(rest)),
        None => (trimmed, None),
    };

    if let Some(locale) = Locale::from_code(first) {
        return LocalePath::Localized(locale);
    }

    let default = Locale::default().code();

    if first.is_empty() {
        return LocalePath::Redirect(format!("/{}", default));
    }

    if looks_like_locale_code(first) {
        return LocalePath::Redirect(match rest {
            Some(rest) if !rest.is_empty() => format!("/{}/{}", default, rest),
            _ => format!("/{}", default),
        });
    }

    LocalePath::Redirect(format!("/{}/{}", default, trimmed))
}

/// Locale of a path that has already passed [`resolve_locale_path`]
pub fn locale_of_path(path: &str) -> Locale {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(Locale::from_code)
        .unwrap_or_default()
}

fn looks_like_locale_code(segment: &str) -> bool {
    segment.len() == 2 && segment.bytes().all(|b| b.is_ascii_lowercase())
}
