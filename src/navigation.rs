//! Read-only queries over a [`Catalog`]: year listing, per-year sessions,
//! lookup and the "next track" walk across years.

use crate::catalog::{Catalog, TrackDescriptor};
use crate::player::Selection;

/// Distinct years, newest first.
pub fn distinct_years(catalog: &Catalog) -> Vec<i32> {
    let mut years: Vec<i32> = catalog.tracks().iter().map(|t| t.year).collect();
    years.dedup();
    years.reverse();
    years
}

/// Session numbers recorded for `year`, ascending. Empty when the year is absent.
pub fn sessions_for_year(catalog: &Catalog, year: i32) -> Vec<u32> {
    catalog
        .tracks()
        .iter()
        .filter(|t| t.year == year)
        .map(|t| t.session)
        .collect()
}

/// Look up the track a selection points at.
pub fn resolve(catalog: &Catalog, selection: Selection) -> Option<&TrackDescriptor> {
    catalog.find(selection.year, selection.session)
}

/// Newest year, smallest session. `None` for an empty catalog.
pub fn initial_selection(catalog: &Catalog) -> Option<Selection> {
    let year = *distinct_years(catalog).first()?;
    let session = *sessions_for_year(catalog, year).first()?;
    Some(Selection::new(year, session))
}

/// The selection that follows `current`.
///
/// Moves to the next session of the same year; past the last session it
/// moves one step toward the front of the newest-first year list (the next
/// newer year), wrapping from the newest year to the oldest, and picks that
/// year's first session. A year missing from the catalog wraps to the oldest
/// year as well. Returns `None` only when the catalog is empty.
pub fn next_selection(catalog: &Catalog, current: Selection) -> Option<Selection> {
    let sessions = sessions_for_year(catalog, current.year);
    if let Some(pos) = sessions.iter().position(|&s| s == current.session) {
        if let Some(&next) = sessions.get(pos + 1) {
            return Some(Selection::new(current.year, next));
        }
    }

    let years = distinct_years(catalog);
    let next_year = match years.iter().position(|&y| y == current.year) {
        Some(idx) if idx > 0 => years[idx - 1],
        _ => *years.last()?,
    };
    let session = *sessions_for_year(catalog, next_year).first()?;
    Some(Selection::new(next_year, session))
}
