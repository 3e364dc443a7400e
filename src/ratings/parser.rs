//! HTML parsing for the Massey ratings table.
//!
//! The upstream page has shipped the same logical table under different
//! attributes over time, so the table is located with a two-tier lookup:
//! first the stable `id="tbl"`, then a looser match on a `mytable` class
//! token plus header text naming a team column and a rating column.
//!
//! Rows are parsed independently: a malformed row is logged and dropped
//! without aborting the fetch.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::{RatingsError, RatingsTable, RowParseError};

/// Extract the team → rating mapping from the ratings page HTML.
pub fn parse_ratings(html: &str) -> Result<RatingsTable, RatingsError> {
    let document = Html::parse_document(html);
    let table = locate_table(&document).ok_or(RatingsError::TableNotFound)?;

    let row_selector = Selector::parse("tbody > tr").unwrap();
    let rows: Vec<ElementRef> = table.select(&row_selector).collect();
    if rows.is_empty() {
        return Err(RatingsError::EmptyTable);
    }

    let mut ratings = RatingsTable::new();
    let mut dropped = 0usize;
    for row in &rows {
        match parse_row(*row) {
            Ok((team, rating)) => {
                ratings.insert(team, rating);
            }
            Err(e) => {
                dropped += 1;
                warn!("Skipping malformed ratings row: {}", e);
            }
        }
    }

    if ratings.is_empty() {
        return Err(RatingsError::NoValidRatings { dropped });
    }
    if dropped > 0 {
        warn!("Dropped {} of {} ratings rows", dropped, rows.len());
    }
    Ok(ratings)
}

/// Two-tier table lookup.
///
/// Tier 1: `table#tbl`, the id the site has used for years.
/// Tier 2: any table carrying a `mytable`-ish class token whose header row
/// mentions both a team column and a rating column (case-insensitive), so
/// attribute drift doesn't break the fetch while the header semantics hold.
fn locate_table(document: &Html) -> Option<ElementRef<'_>> {
    let by_id = Selector::parse("table#tbl").unwrap();
    if let Some(table) = document.select(&by_id).next() {
        return Some(table);
    }

    let any_table = Selector::parse("table").unwrap();
    document
        .select(&any_table)
        .find(|t| has_mytable_class(*t) && header_names_team_and_rating(*t))
}

fn has_mytable_class(table: ElementRef) -> bool {
    table
        .value()
        .attr("class")
        .map(|c| c.split_whitespace().any(|tok| tok.contains("mytable")))
        .unwrap_or(false)
}

fn header_names_team_and_rating(table: ElementRef) -> bool {
    let th_selector = Selector::parse("th").unwrap();
    let header: String = table
        .select(&th_selector)
        .flat_map(|th| th.text())
        .collect::<String>()
        .to_lowercase();
    header.contains("team") && header.contains("rat")
}

/// Parse one `<tr>` into `(team, rating)`.
///
/// Team name comes from the first cell, preferring an embedded link's text;
/// the rating comes from the `.detail` element inside the third cell.
pub(crate) fn parse_row(row: ElementRef) -> Result<(String, f64), RowParseError> {
    let cell_selector = Selector::parse("td").unwrap();
    let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
    if cells.len() < 3 {
        return Err(RowParseError::MissingColumns { found: cells.len() });
    }

    let link_selector = Selector::parse("a").unwrap();
    let raw_name = match cells[0].select(&link_selector).next() {
        Some(link) => link.text().collect::<String>(),
        None => cells[0].text().collect::<String>(),
    };
    let team = normalize_team_name(&raw_name);
    if team.is_empty() {
        return Err(RowParseError::EmptyTeamName);
    }

    let detail_selector = Selector::parse(".detail").unwrap();
    let detail = cells[2]
        .select(&detail_selector)
        .next()
        .ok_or(RowParseError::MissingDetail)?;
    let text = detail.text().collect::<String>();
    let text = text.trim();
    let rating: f64 = text.parse().map_err(|_| RowParseError::BadRating {
        text: text.to_string(),
    })?;

    Ok((team, rating))
}

/// Trim and collapse internal whitespace so spellings that differ only in
/// spacing land on the same key.
fn normalize_team_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
