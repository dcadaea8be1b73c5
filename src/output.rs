//! Output formatting for query results

use crate::index::PlantRecord;
use crate::query::{Page, SearchResults};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Secondary fields shown under each record, with their labels
const DETAIL_FIELDS: [(&str, &str); 4] = [
    ("family", "family"),
    ("plant_type", "type"),
    ("sun_exposure", "sun"),
    ("plant_id", "id"),
];

/// JSON document emitted by `query --json`
#[derive(Debug, Serialize)]
pub struct JsonPage<'a> {
    pub total: u64,
    pub offset: usize,
    pub limit: usize,
    pub records: &'a [&'a PlantRecord],
}

/// Print one page of results as JSON to stdout
pub fn print_json(results: &SearchResults<'_>, page: Page) -> io::Result<()> {
    let doc = JsonPage {
        total: results.total,
        offset: page.offset,
        limit: page.limit,
        records: &results.records,
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &doc)?;
    writeln!(stdout)
}

/// Print one page of results in a human-readable, optionally colored format
pub fn print_results(results: &SearchResults<'_>, page: Page, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_results(&mut stdout, results, page)
}

/// Write results to any color-capable writer
pub fn write_results<W: WriteColor>(
    out: &mut W,
    results: &SearchResults<'_>,
    page: Page,
) -> io::Result<()> {
    if results.records.is_empty() {
        if results.total > 0 {
            writeln!(
                out,
                "No results at offset {} ({} total matches)",
                page.offset, results.total
            )?;
        } else {
            writeln!(out, "No matching plants")?;
        }
        return Ok(());
    }

    for record in &results.records {
        write_record(out, record)?;
    }

    let first = page.offset + 1;
    let last = page.offset + results.records.len();
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(out, "-- {}-{} of {}", first, last, results.total)?;
    out.reset()
}

fn write_record<W: WriteColor>(out: &mut W, record: &PlantRecord) -> io::Result<()> {
    let scientific = record.text("scientific_name").unwrap_or("(unnamed)");

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "{}", scientific)?;
    out.reset()?;

    if let Some(common) = record.text("common_name") {
        if !common.is_empty() && common != scientific {
            write!(out, " ({})", common)?;
        }
    }
    writeln!(out)?;

    let details: Vec<String> = DETAIL_FIELDS
        .iter()
        .filter_map(|(field, label)| {
            let value = record.get(field)?;
            (!value.is_empty()).then(|| format!("{}: {}", label, value))
        })
        .collect();
    if !details.is_empty() {
        writeln!(out, "    {}", details.join("  "))?;
    }

    Ok(())
}
