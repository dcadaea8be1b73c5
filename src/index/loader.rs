//! Record collection loading and catalog hygiene.
//!
//! The engine never touches the filesystem; this module is the loader side
//! of the boundary. It reads the JSON array written by the plant scraping
//! pipeline and offers the merge/name-list helpers that run before an index
//! is built.

use crate::error::LoadError;
use crate::index::types::{FieldValue, PlantRecord};
use memmap2::Mmap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;

/// Placeholder the scraper writes for values it could not find
pub const UNKNOWN: &str = "Unknown";

/// Fields never overwritten when merging duplicates
const MERGE_EXEMPT: [&str; 6] = [
    "plant_id",
    "common_name",
    "youtube_link",
    "wikipedia_link",
    "source",
    "smg_link",
];

/// Load a record collection from a JSON file containing an array of objects.
pub fn load_records(path: &Path) -> Result<Vec<PlantRecord>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();

    let records = if len == 0 {
        parse_records(b"", path)?
    } else {
        // SAFETY: the map is read-only and dropped before this function returns
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
        parse_records(&mmap, path)?
    };

    tracing::debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Parse a record collection from JSON bytes; `path` is used for error context.
pub fn parse_records(bytes: &[u8], path: &Path) -> Result<Vec<PlantRecord>, LoadError> {
    serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge records sharing a scientific name.
///
/// Names are compared trimmed and case-insensitively. The first occurrence
/// keeps its position; later duplicates are folded into it. Records without
/// a scientific name are passed through untouched.
pub fn dedupe_records(records: Vec<PlantRecord>) -> Vec<PlantRecord> {
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();
    let mut unique: Vec<PlantRecord> = Vec::with_capacity(records.len());

    for record in records {
        let Some(key) = record
            .text("scientific_name")
            .map(|name| name.trim().to_lowercase())
        else {
            unique.push(record);
            continue;
        };

        match positions.get(&key) {
            Some(&pos) => merge_into(&mut unique[pos], &record),
            None => {
                positions.insert(key, unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

fn merge_into(existing: &mut PlantRecord, duplicate: &PlantRecord) {
    if let Some(source) = duplicate.get("source") {
        let merged = match existing.get("source") {
            Some(current) => format!("{}, {}", current, source),
            None => source.to_string(),
        };
        existing.set("source", merged);
    }

    for (field, value) in duplicate.fields() {
        if MERGE_EXEMPT.contains(&field) || is_unknown(Some(value)) {
            continue;
        }
        if is_unknown(existing.get(field)) {
            existing.set(field, value.clone());
        }
    }

    if let Some(link) = duplicate.get("smg_link") {
        existing.set("smg_link", link.clone());
    }
}

/// Absent values count as unknown for merging purposes
fn is_unknown(value: Option<&FieldValue>) -> bool {
    value.is_none_or(|v| v.as_text() == Some(UNKNOWN))
}

/// Sorted, unique scientific and common names of a collection.
///
/// A common name is listed only when it differs from its record's
/// scientific name.
pub fn plant_names(records: &[PlantRecord]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for record in records {
        let scientific = record.text("scientific_name").unwrap_or("");
        let common = record.text("common_name").unwrap_or("");
        if !scientific.is_empty() {
            names.insert(scientific.to_string());
        }
        if !common.is_empty() && common != scientific {
            names.insert(common.to_string());
        }
    }
    names.into_iter().collect()
}

/// Names from `expected` that no record carries as scientific or common name.
///
/// Comparison is trimmed and case-insensitive; the returned names keep the
/// spelling and order of `expected`.
pub fn missing_names<'a>(records: &[PlantRecord], expected: &'a [String]) -> Vec<&'a str> {
    let mut known: FxHashSet<String> = FxHashSet::default();
    for record in records {
        let scientific = record.text("scientific_name").unwrap_or("").trim();
        let common = record.text("common_name").unwrap_or("").trim();
        if !scientific.is_empty() {
            known.insert(scientific.to_lowercase());
        }
        if !common.is_empty() && common != scientific {
            known.insert(common.to_lowercase());
        }
    }

    expected
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && !known.contains(&name.to_lowercase()))
        .collect()
}

/// Read a names list: one name per line, blank lines ignored.
pub fn load_names(path: &Path) -> Result<Vec<String>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn scraped(name: &str, source: &str) -> PlantRecord {
        PlantRecord::new()
            .with("plant_id", format!("{}-{}", name, source))
            .with("scientific_name", name)
            .with("common_name", name)
            .with("source", source)
            .with("family", UNKNOWN)
            .with("plant_type", UNKNOWN)
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"plant_id": "1", "scientific_name": "Abelia"}}, {{"plant_id": "2", "family": null}}]"#
        )
        .unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("scientific_name"), Some("Abelia"));
        assert!(records[1].get("family").is_none());
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/nonexistent/plants.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_records_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_load_records_empty_file_is_malformed() {
        let file = NamedTempFile::new().unwrap();
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_parse_records_rejects_nested_values() {
        let err = parse_records(br#"[{"synonyms": ["a", "b"]}]"#, Path::new("inline")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_dedupe_merges_sources_and_unknowns() {
        let wiki = scraped("Abelia", "Wikipedia");
        let smg = scraped("abelia ", "San Marcos Growers")
            .with("family", "Caprifoliaceae")
            .with("smg_link", "https://example.org/abelia")
            .with("common_name", "Glossy abelia");

        let merged = dedupe_records(vec![wiki, smg]);
        assert_eq!(merged.len(), 1);

        let abelia = &merged[0];
        assert_eq!(abelia.text("source"), Some("Wikipedia, San Marcos Growers"));
        assert_eq!(abelia.text("family"), Some("Caprifoliaceae"));
        assert_eq!(abelia.text("plant_type"), Some(UNKNOWN));
        assert_eq!(abelia.text("smg_link"), Some("https://example.org/abelia"));
        // Exempt fields keep the first occurrence
        assert_eq!(abelia.text("common_name"), Some("Abelia"));
        assert_eq!(abelia.text("plant_id"), Some("Abelia-Wikipedia"));
    }

    #[test]
    fn test_dedupe_does_not_overwrite_known_values() {
        let first = scraped("Abies", "Wikipedia").with("family", "Pinaceae");
        let second = scraped("Abies", "San Marcos Growers").with("family", "Rosaceae");
        let merged = dedupe_records(vec![first, second]);
        assert_eq!(merged[0].text("family"), Some("Pinaceae"));
    }

    #[test]
    fn test_dedupe_keeps_order_and_unnamed_records() {
        let records = vec![
            scraped("Abies", "Wikipedia"),
            PlantRecord::new().with("common_name", "mystery"),
            scraped("Abelia", "Wikipedia"),
            scraped("ABIES", "San Marcos Growers"),
            PlantRecord::new().with("common_name", "mystery"),
        ];
        let merged = dedupe_records(records);
        let names: Vec<_> = merged
            .iter()
            .map(|r| r.text("scientific_name").unwrap_or("-"))
            .collect();
        assert_eq!(names, vec!["Abies", "-", "Abelia", "-"]);
    }

    #[test]
    fn test_plant_names() {
        let records = vec![
            PlantRecord::new()
                .with("scientific_name", "Abies")
                .with("common_name", "fir"),
            PlantRecord::new()
                .with("scientific_name", "Abelia")
                .with("common_name", "Abelia"),
            PlantRecord::new().with("scientific_name", "Abies"),
        ];
        assert_eq!(plant_names(&records), vec!["Abelia", "Abies", "fir"]);
    }

    #[test]
    fn test_missing_names() {
        let records = vec![
            PlantRecord::new()
                .with("scientific_name", "Abies")
                .with("common_name", "Fir"),
        ];
        let expected = vec![
            "abies".to_string(),
            "FIR".to_string(),
            "  Acer ".to_string(),
            "".to_string(),
        ];
        assert_eq!(missing_names(&records, &expected), vec!["Acer"]);
    }

    #[test]
    fn test_load_names() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Abies\n\n  Acer  \nfir").unwrap();
        let names = load_names(file.path()).unwrap();
        assert_eq!(names, vec!["Abies", "Acer", "fir"]);
    }
}
