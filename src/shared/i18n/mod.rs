//! Localization: supported locales, message dictionaries and price formatting.

pub mod locale;
pub mod localized;
pub mod money;
pub mod translations;

pub use locale::{locale_of_path, resolve_locale_path, Locale, LocalePath};
pub use localized::Localized;
pub use money::format_price;
pub use translations::Translations;
