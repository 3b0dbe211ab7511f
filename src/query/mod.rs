//! Faceted search query parsing.
//!
//! The search language is a list of `||`-separated sections, each of the
//! form `prefix:value1&&value2&&...`. Recognized prefixes:
//!
//! | prefix | facet  |
//! |--------|--------|
//! | `ti:`  | title  |
//! | `ar:`  | artist |
//! | `al:`  | album  |
//! | `ye:`  | year   |
//! | `ge:`  | genre  |
//!
//! Sections with an unrecognized prefix are silently dropped. Values are
//! not trimmed or validated here. This is a tokenizer, not a boolean
//! evaluator: the caller looks every value up independently and
//! concatenates the results, so `&&`-joined values are effectively OR'd
//! despite the conjunction-looking token. Kept for compatibility with the
//! established search syntax.

/// Per-facet term lists produced by [`parse`]. Facets that did not appear
/// in the query are empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub titles: Vec<String>,
    pub artists: Vec<String>,
    pub albums: Vec<String>,
    pub years: Vec<String>,
    pub genres: Vec<String>,
}

/// Split a search string into per-facet term lists.
pub fn parse(search: &str) -> ParsedQuery {
    let mut query = ParsedQuery::default();

    for section in search.split("||") {
        if let Some(rest) = section.strip_prefix("ti:") {
            push_values(&mut query.titles, rest);
        } else if let Some(rest) = section.strip_prefix("ar:") {
            push_values(&mut query.artists, rest);
        } else if let Some(rest) = section.strip_prefix("al:") {
            push_values(&mut query.albums, rest);
        } else if let Some(rest) = section.strip_prefix("ye:") {
            push_values(&mut query.years, rest);
        } else if let Some(rest) = section.strip_prefix("ge:") {
            push_values(&mut query.genres, rest);
        }
    }

    query
}

fn push_values(facet: &mut Vec<String>, section: &str) {
    facet.extend(section.split("&&").map(str::to_string));
}
