//! Catalog filtering over a fully loaded rug list.
//!
//! Mirrors the shop front's filter panel: an exact name choice plus
//! inclusive length, width and price ranges typed as free text.

use serde::Deserialize;

use crate::headers::normalize_header;
use crate::normalize::to_units;
use crate::reconcile::NewRug;
use crate::types::Cents;

/// Fields the filter inspects.
pub trait CatalogItem {
    fn name(&self) -> Option<&str>;
    fn length_cm(&self) -> i64;
    fn width_cm(&self) -> i64;
    fn price_cents(&self) -> Cents;
}

impl CatalogItem for NewRug {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn length_cm(&self) -> i64 {
        self.length_cm
    }
    fn width_cm(&self) -> i64 {
        self.width_cm
    }
    fn price_cents(&self) -> Cents {
        self.price_cents
    }
}

/// Raw filter inputs as typed by a user (all optional text).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInput {
    pub name: Option<String>,
    pub length_min: Option<String>,
    pub length_max: Option<String>,
    pub width_min: Option<String>,
    pub width_max: Option<String>,
    /// Euros.
    pub price_min: Option<String>,
    /// Euros.
    pub price_max: Option<String>,
}

/// Parsed filter. `None` bounds are open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RugFilter {
    pub name: Option<String>,
    pub length_min: Option<f64>,
    pub length_max: Option<f64>,
    pub width_min: Option<f64>,
    pub width_max: Option<f64>,
    pub price_min_cents: Option<Cents>,
    pub price_max_cents: Option<Cents>,
}

/// Parse a user-typed number: blank -> `None`, `"200,5"` -> `200.5`.
pub fn parse_user_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim().replacen(',', ".", 1);
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl RugFilter {
    pub fn from_input(input: &FilterInput) -> Self {
        let euros_to_cents = |raw: &Option<String>| {
            parse_user_number(raw.as_deref()).and_then(|euros| to_units(euros * 100.0))
        };
        Self {
            name: input
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            length_min: parse_user_number(input.length_min.as_deref()),
            length_max: parse_user_number(input.length_max.as_deref()),
            width_min: parse_user_number(input.width_min.as_deref()),
            width_max: parse_user_number(input.width_max.as_deref()),
            price_min_cents: euros_to_cents(&input.price_min),
            price_max_cents: euros_to_cents(&input.price_max),
        }
    }

    /// `true` when every active criterion accepts the item. Ranges are
    /// inclusive at both ends.
    pub fn matches<T: CatalogItem + ?Sized>(&self, item: &T) -> bool {
        if let Some(name) = &self.name {
            if item.name().map(str::trim) != Some(name.as_str()) {
                return false;
            }
        }

        let length = item.length_cm() as f64;
        let width = item.width_cm() as f64;
        let price = item.price_cents();

        within(length, self.length_min, self.length_max)
            && within(width, self.width_min, self.width_max)
            && self.price_min_cents.map_or(true, |min| price >= min)
            && self.price_max_cents.map_or(true, |max| price <= max)
    }

    pub fn apply<'a, T: CatalogItem>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Sorted, de-duplicated, non-blank names for the name drop-down.
/// Sorting ignores case and diacritics.
pub fn distinct_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut names: Vec<String> = names
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    names.sort_by(|a, b| {
        normalize_header(a)
            .cmp(&normalize_header(b))
            .then_with(|| a.cmp(b))
    });
    names.dedup();
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rug(number: &str, name: Option<&str>, length: i64, width: i64, price: Cents) -> NewRug {
        NewRug {
            rug_number: number.into(),
            name: name.map(str::to_string),
            length_cm: length,
            width_cm: width,
            color: None,
            price_cents: price,
            image_path: None,
        }
    }

    fn catalog() -> Vec<NewRug> {
        vec![
            rug("1", Some("Nain"), 200, 140, 99_900),
            rug("2", Some("Täbriz"), 300, 200, 250_000),
            rug("3", None, 150, 80, 45_050),
            rug("4", Some(" Nain "), 240, 170, 120_000),
        ]
    }

    fn numbers(filter: &RugFilter) -> Vec<String> {
        filter
            .apply(&catalog())
            .into_iter()
            .map(|r| r.rug_number.clone())
            .collect()
    }

    #[test]
    fn user_number_parsing() {
        assert_eq!(parse_user_number(Some("200,5")), Some(200.5));
        assert_eq!(parse_user_number(Some(" 80 ")), Some(80.0));
        assert_eq!(parse_user_number(Some("")), None);
        assert_eq!(parse_user_number(Some("abc")), None);
        assert_eq!(parse_user_number(None), None);
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(numbers(&RugFilter::default()), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn name_is_exact_trimmed_match() {
        let filter = RugFilter::from_input(&FilterInput {
            name: Some("Nain".into()),
            ..Default::default()
        });
        assert_eq!(numbers(&filter), vec!["1", "4"]);
    }

    #[test]
    fn length_range_is_inclusive() {
        let filter = RugFilter::from_input(&FilterInput {
            length_min: Some("200".into()),
            length_max: Some("240".into()),
            ..Default::default()
        });
        assert_eq!(numbers(&filter), vec!["1", "4"]);
    }

    #[test]
    fn width_with_decimal_comma() {
        let filter = RugFilter::from_input(&FilterInput {
            width_max: Some("140,0".into()),
            ..Default::default()
        });
        assert_eq!(numbers(&filter), vec!["1", "3"]);
    }

    #[test]
    fn price_bounds_are_euros() {
        let filter = RugFilter::from_input(&FilterInput {
            price_min: Some("450,50".into()),
            price_max: Some("999".into()),
            ..Default::default()
        });
        assert_eq!(filter.price_min_cents, Some(45_050));
        assert_eq!(numbers(&filter), vec!["1", "3"]);
    }

    #[test]
    fn blank_inputs_are_open_bounds() {
        let filter = RugFilter::from_input(&FilterInput {
            name: Some("  ".into()),
            length_min: Some(" ".into()),
            ..Default::default()
        });
        assert_eq!(filter, RugFilter::default());
    }

    #[test]
    fn distinct_names_sorted_and_unique() {
        let names = distinct_names(catalog().iter().map(|r| r.name.as_deref()));
        assert_eq!(names, vec!["Nain", "Täbriz"]);
        let mixed = distinct_names([Some("beta"), Some("Alpha"), Some("Ähre"), None, Some("")]);
        assert_eq!(mixed, vec!["Ähre", "Alpha", "beta"]);
    }
}
