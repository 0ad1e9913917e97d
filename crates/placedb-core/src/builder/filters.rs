// crates/placedb-core/src/builder/filters.rs

//! Per-source row filters for the ingestion loader.
//!
//! Geoname extract field positions used here: 3 = alternatenames,
//! 6 = feature class, 7 = feature code, 14 = population. Alternate-name
//! extract: 2 = language tag, 3 = name text.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::text::{
    hebrew_normalize_quotes, hebrew_strip_nikkud, is_hebrew_letter, latin_fold_hebrew_scheme,
};

/// Closed set of place-type feature codes kept for query purposes:
/// populated places, admin seats at three levels, capitals, localities,
/// sections of populated places, and Israeli settlements.
static FCODE_KEEP: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "PPL", "PPLA", "PPLA2", "PPLA3", "PPLC", "PPLL", "PPLX", "STLMT",
    ])
});

/// Blanks the oversized comma-joined `alternatenames` column; alternate
/// names are loaded into their own table instead.
pub fn truncate_alternate_names() -> impl FnMut(&mut Vec<String>) -> bool {
    |fields: &mut Vec<String>| {
        fields[3].clear();
        true
    }
}

/// Main city-extract filter: feature-code allow-list plus an optional
/// population floor. The floor only rejects plain `PPL` rows; admin
/// seats and capitals are kept no matter how small. An empty population
/// field means "unknown" and passes; a literal `0` does not.
pub fn cities_filter(min_population: Option<i64>) -> impl FnMut(&mut Vec<String>) -> bool {
    move |fields: &mut Vec<String>| {
        let fcode = fields[7].as_str();
        if !FCODE_KEEP.contains(fcode) {
            return false;
        }
        if let Some(floor) = min_population {
            if fcode == "PPL" && !fields[14].is_empty() {
                if let Ok(population) = fields[14].parse::<i64>() {
                    if population < floor {
                        return false;
                    }
                }
            }
        }
        fields[3].clear();
        true
    }
}

/// Israel city-extract filter: the country file carries every feature
/// class, so restrict to populated places on the allow-list.
pub fn il_cities_filter() -> impl FnMut(&mut Vec<String>) -> bool {
    |fields: &mut Vec<String>| {
        fields[3].clear();
        fields[6] == "P" && FCODE_KEEP.contains(fields[7].as_str())
    }
}

/// Israel alternate-names filter.
///
/// Rows tagged `he` whose first character is not a Hebrew base letter
/// are misclassified transliterations; their tag is corrected to `en`
/// and the row kept. Hebrew rows get quote variants folded to geresh
/// and points stripped; English rows get the constrained
/// transliteration scheme collapsed to plain digraphs. Everything in
/// other languages is dropped.
pub fn il_alternate_filter() -> impl FnMut(&mut Vec<String>) -> bool {
    |fields: &mut Vec<String>| {
        let first = fields[3].chars().next();
        if fields[2] == "he" && !first.is_some_and(is_hebrew_letter) {
            fields[2] = "en".to_owned();
        }
        match fields[2].as_str() {
            "he" => {
                fields[3] = hebrew_strip_nikkud(&hebrew_normalize_quotes(&fields[3]));
                true
            }
            "en" => {
                fields[3] = latin_fold_hebrew_scheme(&fields[3]);
                true
            }
            _ => false,
        }
    }
}
