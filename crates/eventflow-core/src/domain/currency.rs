//! Currency option normalization
//!
//! `currency_options` is stored as a comma-separated string of upper-case
//! codes. The same normalization runs on event create and update so the
//! `default_currency ∈ currency_options` invariant is checked against a
//! canonical form.

use serde::Deserialize;

/// Clients may send currency options either as a list or as a
/// comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CurrencyOptionsInput {
    List(Vec<String>),
    Csv(String),
}

/// Split, trim, upper-case, alias EURO/EUROS to EUR, drop empties, dedupe
/// preserving first-seen order. An empty result falls back to the
/// upper-cased default currency.
pub fn normalize_currency_options(
    raw: Option<&CurrencyOptionsInput>,
    default_currency: &str,
) -> String {
    let values: Vec<String> = match raw {
        None => return default_currency.to_uppercase(),
        Some(CurrencyOptionsInput::List(items)) => items.clone(),
        Some(CurrencyOptionsInput::Csv(csv)) => csv.split(',').map(str::to_string).collect(),
    };

    let mut cleaned: Vec<String> = Vec::new();
    for value in values {
        let mut code = value.trim().to_uppercase();
        if code == "EURO" || code == "EUROS" {
            code = "EUR".to_string();
        }
        if !code.is_empty() && !cleaned.contains(&code) {
            cleaned.push(code);
        }
    }

    if cleaned.is_empty() {
        return default_currency.to_uppercase();
    }
    cleaned.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(s: &str) -> CurrencyOptionsInput {
        CurrencyOptionsInput::Csv(s.to_string())
    }

    #[test]
    fn trims_uppercases_and_dedupes() {
        let input = CurrencyOptionsInput::List(vec![
            " usd ".into(),
            "kes".into(),
            "USD".into(),
        ]);
        assert_eq!(normalize_currency_options(Some(&input), "USD"), "USD,KES");
    }

    #[test]
    fn maps_euro_aliases() {
        let input = CurrencyOptionsInput::List(vec!["Euros".into(), " usd ".into()]);
        assert_eq!(normalize_currency_options(Some(&input), "eur"), "EUR,USD");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_currency_options(Some(&csv("Euros, usd ,KES")), "usd");
        let twice = normalize_currency_options(Some(&csv(&once)), "usd");
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        assert_eq!(normalize_currency_options(None, "kes"), "KES");
        assert_eq!(normalize_currency_options(Some(&csv(" , ,")), "usd"), "USD");
    }
}
