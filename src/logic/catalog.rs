//! The item discovery engine: filter and sort a listing set.
//!
//! This is the one self-contained piece of business logic in the client.
//! It is a pure function over an in-memory listing slice: no I/O, no
//! shared state, deterministic for identical inputs, and cheap enough to
//! recompute on every keystroke or filter toggle.

use crate::state::{Listing, SortKey};
use crate::util::parse_date_ms;

/// What: Produce the filtered, ordered catalog view for the Browse screen.
///
/// Inputs:
/// - `listings`: Full listing set (never mutated)
/// - `text_query`: Substring matched against listing names; empty means no
///   text filter
/// - `category_filters`: Category names; empty means every category passes
/// - `status_filter`: Single status; empty means every status passes
/// - `sort_key`: Ordering applied after filtering
///
/// Output:
/// - A new vector of matching listings in the requested order.
///
/// Details:
/// - Stages run in a fixed order (text, category, status, sort) so each
///   narrows the set the next one sees.
/// - All matching is case-insensitive. The text filter searches only the
///   name field; descriptions and categories are deliberately excluded.
/// - Listings without a category are dropped whenever any category filter
///   is active; same for status when a status filter is active.
/// - Missing fields degrade instead of failing: value counts as 0, name
///   as empty, and absent or unparsable dates as epoch 0.
/// - The sort is stable, so equal keys (and [`SortKey::Unsorted`]) keep
///   the filtered sequence's relative order.
#[must_use]
pub fn filter_and_sort(
    listings: &[Listing],
    text_query: &str,
    category_filters: &[String],
    status_filter: &str,
    sort_key: SortKey,
) -> Vec<Listing> {
    let query = text_query.trim().to_lowercase();
    let categories: Vec<String> = category_filters
        .iter()
        .map(|c| c.to_lowercase())
        .collect();
    let status = status_filter.trim().to_lowercase();

    let mut filtered: Vec<Listing> = listings
        .iter()
        .filter(|l| query.is_empty() || l.name.to_lowercase().contains(&query))
        .filter(|l| {
            categories.is_empty()
                || l.category
                    .as_ref()
                    .is_some_and(|c| categories.contains(&c.to_lowercase()))
        })
        .filter(|l| status.is_empty() || l.status.to_lowercase() == status)
        .cloned()
        .collect();

    match sort_key {
        SortKey::Newest => {
            filtered.sort_by_key(|l| std::cmp::Reverse(parse_date_ms(l.date.as_deref())));
        }
        SortKey::Oldest => {
            filtered.sort_by_key(|l| parse_date_ms(l.date.as_deref()));
        }
        SortKey::ValueHigh => {
            filtered.sort_by(|a, b| value_of(b).total_cmp(&value_of(a)));
        }
        SortKey::ValueLow => {
            filtered.sort_by(|a, b| value_of(a).total_cmp(&value_of(b)));
        }
        SortKey::NameAsc => {
            filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::Unsorted => {}
    }
    filtered
}

/// Estimated value with the documented missing-field default.
fn value_of(l: &Listing) -> f64 {
    l.estimated_value.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, value: f64, status: &str) -> Listing {
        Listing {
            id: name.to_lowercase(),
            name: name.to_string(),
            estimated_value: Some(value),
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("Drill", 500.0, "available"),
            listing("Book", 50.0, "available"),
            listing("Drone", 2000.0, "unavailable"),
        ]
    }

    #[test]
    /// What: Status filter plus descending value ordering
    ///
    /// - Input: Drill/Book/Drone; status "available"; sort value_high
    /// - Output: [Drill, Book]; Drone excluded by status
    fn status_filter_then_value_high() {
        let out = filter_and_sort(&sample(), "", &[], "available", SortKey::ValueHigh);
        let names: Vec<&str> = out.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Drill", "Book"]);
        for pair in out.windows(2) {
            assert!(
                pair[0].estimated_value.unwrap_or(0.0) >= pair[1].estimated_value.unwrap_or(0.0)
            );
        }
    }

    #[test]
    /// What: Text filter is independent of status and preserves input order
    ///
    /// - Input: Query "dr" over the sample, no status filter, unsorted
    /// - Output: [Drill, Drone] in original relative order
    fn text_filter_name_only_original_order() {
        let out = filter_and_sort(&sample(), "dr", &[], "", SortKey::Unsorted);
        let names: Vec<&str> = out.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Drill", "Drone"]);
    }

    #[test]
    /// What: Empty category filter set is a no-op stage
    ///
    /// - Input: Sample with mixed categories; empty filter set
    /// - Output: Same membership as the input (no narrowing)
    fn empty_category_filters_pass_everything() {
        let mut items = sample();
        items[0].category = Some("Home".into());
        // items[1] and [2] deliberately uncategorized
        let out = filter_and_sort(&items, "", &[], "", SortKey::Unsorted);
        assert_eq!(out.len(), items.len());
    }

    #[test]
    /// What: Active category filter drops uncategorized listings
    ///
    /// - Input: One categorized and two uncategorized listings; filter Home
    /// - Output: Only the categorized listing survives
    fn category_filter_drops_uncategorized() {
        let mut items = sample();
        items[0].category = Some("Home".into());
        let out = filter_and_sort(&items, "", &["home".to_string()], "", SortKey::Unsorted);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Drill");
    }

    #[test]
    /// What: Status matching is case-insensitive both ways
    ///
    /// - Input: Listing with status "Available"; filter "available"
    /// - Output: Retained
    fn status_match_case_insensitive() {
        let items = vec![listing("Lamp", 20.0, "Available")];
        let out = filter_and_sort(&items, "", &[], "available", SortKey::Unsorted);
        assert_eq!(out.len(), 1);
        let out = filter_and_sort(&items, "", &[], "AVAILABLE", SortKey::Unsorted);
        assert_eq!(out.len(), 1);
    }

    #[test]
    /// What: Missing dates sort as the earliest possible instant
    ///
    /// - Input: Dated and undated listings under newest and oldest
    /// - Output: Undated last under newest, first under oldest
    fn missing_date_sorts_as_epoch() {
        let mut dated = listing("New", 1.0, "available");
        dated.date = Some("2024-06-01T00:00:00Z".into());
        let undated = listing("Old", 1.0, "available");
        let items = vec![undated.clone(), dated.clone()];
        let newest = filter_and_sort(&items, "", &[], "", SortKey::Newest);
        assert_eq!(newest[0].name, "New");
        assert_eq!(newest[1].name, "Old");
        let oldest = filter_and_sort(&items, "", &[], "", SortKey::Oldest);
        assert_eq!(oldest[0].name, "Old");
    }

    #[test]
    /// What: Filtering is idempotent across repeated identical calls
    ///
    /// - Input: Same criteria applied twice, second pass over first output
    /// - Output: Identical sequences
    fn filtering_idempotent() {
        let once = filter_and_sort(&sample(), "o", &[], "", SortKey::NameAsc);
        let twice = filter_and_sort(&once, "o", &[], "", SortKey::NameAsc);
        let a: Vec<&str> = once.iter().map(|l| l.name.as_str()).collect();
        let b: Vec<&str> = twice.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    /// What: Name sort is case-insensitive ascending
    ///
    /// - Input: Names with mixed case
    /// - Output: alphabetical regardless of case
    fn name_sort_case_insensitive() {
        let items = vec![
            listing("banana stand", 1.0, "available"),
            listing("Anvil", 1.0, "available"),
            listing("crate", 1.0, "available"),
        ];
        let out = filter_and_sort(&items, "", &[], "", SortKey::NameAsc);
        let names: Vec<&str> = out.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Anvil", "banana stand", "crate"]);
    }

    #[test]
    /// What: Missing values count as zero under value ordering
    ///
    /// - Input: One listing without a value among valued ones
    /// - Output: It sorts last under value_high and first under value_low
    fn missing_value_counts_as_zero() {
        let mut no_value = listing("Mystery", 0.0, "available");
        no_value.estimated_value = None;
        let items = vec![no_value, listing("Drill", 500.0, "available")];
        let high = filter_and_sort(&items, "", &[], "", SortKey::ValueHigh);
        assert_eq!(high.last().map(|l| l.name.as_str()), Some("Mystery"));
        let low = filter_and_sort(&items, "", &[], "", SortKey::ValueLow);
        assert_eq!(low.first().map(|l| l.name.as_str()), Some("Mystery"));
    }

    #[test]
    /// What: Stable sort keeps input order for equal keys
    ///
    /// - Input: Three equal-value listings in a known order
    /// - Output: Order unchanged under value sorting
    fn equal_keys_keep_relative_order() {
        let items = vec![
            listing("First", 100.0, "available"),
            listing("Second", 100.0, "available"),
            listing("Third", 100.0, "available"),
        ];
        let out = filter_and_sort(&items, "", &[], "", SortKey::ValueHigh);
        let names: Vec<&str> = out.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    /// What: The input slice is never mutated
    ///
    /// - Input: Sample listings, any criteria
    /// - Output: Input sequence unchanged after the call
    fn input_not_mutated() {
        let items = sample();
        let before: Vec<String> = items.iter().map(|l| l.name.clone()).collect();
        let _ = filter_and_sort(&items, "dr", &[], "available", SortKey::ValueHigh);
        let after: Vec<String> = items.iter().map(|l| l.name.clone()).collect();
        assert_eq!(before, after);
    }
}
