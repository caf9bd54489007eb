use rust_decimal::{Decimal, RoundingStrategy};

use super::locale::Locale;

/// Format a EUR amount the way each storefront locale writes prices.
///
/// - `en`: `€1,234.50`
/// - `pt`, `es`: `1.234,50 €`
/// - `fr`: `1 234,50 €` (narrow no-break space as group separator)
pub fn format_price(amount: Decimal, locale: Locale) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let (group, decimal) = match locale {
        Locale::En => (',', '.'),
        Locale::Pt | Locale::Es => ('.', ','),
        Locale::Fr => ('\u{202F}', ','),
    };

    let number = format!("{}{}{}", group_digits(int_part, group), decimal, frac_part);
    let sign = if negative { "-" } else { "" };

    match locale {
        Locale::En => format!("{}€{}", sign, number),
        _ => format!("{}{} €", sign, number),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_english_format() {
        assert_eq!(format_price(d("1234.5"), Locale::En), "€1,234.50");
        assert_eq!(format_price(d("9"), Locale::En), "€9.00");
    }

    #[test]
    fn test_portuguese_and_spanish_format() {
        assert_eq!(format_price(d("1234.5"), Locale::Pt), "1.234,50 €");
        assert_eq!(format_price(d("89.9"), Locale::Es), "89,90 €");
    }

    #[test]
    fn test_french_format() {
        assert_eq!(format_price(d("1234567.891"), Locale::Fr), "1\u{202F}234\u{202F}567,89 €");
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(format_price(d("0.005"), Locale::En), "€0.01");
        assert_eq!(format_price(d("-12"), Locale::Pt), "-12,00 €");
    }
}
