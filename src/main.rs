use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use plotify_search::index::{IndexStats, loader};
use plotify_search::output;
use plotify_search::query::{Page, Query, parse_filter};
use plotify_search::utils::{AppConfig, get_config_path, logging};
use plotify_search::{PlantRecord, SearchEngine};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "plotify")]
#[command(about = "Search a collection of plant records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Record collection (JSON array); overrides the configured data path
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Merge records sharing a scientific name before indexing
    #[arg(long, global = true)]
    dedupe: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search records by free text and field filters
    Query {
        /// Free-text phrase; records matching any term are returned
        phrase: Vec<String>,

        /// Exact field filter as field=value (repeatable, all must match)
        #[arg(short = 'f', long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,

        /// Maximum number of records to print
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Number of matching records to skip
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        /// Print results as a JSON document
        #[arg(long)]
        json: bool,
    },
    /// Show index statistics
    Stats {
        /// Number of most frequent terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// List scientific and common names in the collection
    Names {
        /// Write names to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report names from a list that are missing from the collection
    Reconcile {
        /// File with one expected plant name per line
        names_file: PathBuf,
    },
    /// Write the collection with duplicate scientific names merged
    Dedupe {
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AppConfig::load()?;

    match &cli.command {
        Commands::Query {
            phrase,
            filters,
            limit,
            offset,
            json,
        } => {
            let limit = limit.unwrap_or(config.default_limit as i64);
            let page = Page::checked(*offset, limit)?;

            let mut query = Query::new(page);
            if !phrase.is_empty() {
                query = query.phrase(phrase.join(" "));
            }
            for arg in filters {
                query.filters.push(parse_filter(arg)?);
            }

            let records = load(&cli, &config)?;
            let engine = build_engine(records)?;
            let results = engine.search(&query);

            if *json {
                output::print_json(&results, page)?;
            } else {
                output::print_results(&results, page, io::stdout().is_terminal())?;
            }
        }
        Commands::Stats { top } => {
            let records = load(&cli, &config)?;
            let engine = build_engine(records)?;
            IndexStats::collect(engine.index(), *top).print();
        }
        Commands::Names { output } => {
            let records = load(&cli, &config)?;
            let names = loader::plant_names(&records);
            match output {
                Some(path) => {
                    write_lines(path, &names)?;
                    info!(count = names.len(), path = %path.display(), "wrote plant names");
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    for name in &names {
                        writeln!(stdout, "{}", name)?;
                    }
                }
            }
        }
        Commands::Reconcile { names_file } => {
            let records = load(&cli, &config)?;
            let expected = loader::load_names(names_file)
                .with_context(|| format!("Failed to read names list {}", names_file.display()))?;
            let missing = loader::missing_names(&records, &expected);

            if missing.is_empty() {
                println!("All {} names are present", expected.len());
            } else {
                println!("Missing {} of {} names:", missing.len(), expected.len());
                for name in &missing {
                    println!("  {}", name);
                }
            }
        }
        Commands::Dedupe { output } => {
            let records = read_collection(&cli, &config)?;
            let before = records.len();
            let merged = loader::dedupe_records(records);
            info!(before, after = merged.len(), "merged duplicate records");

            let json = serde_json::to_string_pretty(&merged)?;
            fs::write(output, json)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Wrote {} records ({} duplicates merged) to {}",
                merged.len(),
                before - merged.len(),
                output.display()
            );
        }
        Commands::Config => {
            let path = get_config_path()?;
            println!("Config file: {}", path.display());
            if !path.exists() {
                println!("(not found, using defaults)");
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Resolve the collection path: `--data` first, then the configured path
fn data_path(cli: &Cli, config: &AppConfig) -> Result<PathBuf> {
    match cli.data.as_ref().or(config.data_path.as_ref()) {
        Some(path) => Ok(path.clone()),
        None => bail!(
            "No record collection given; pass --data FILE or set data_path in {}",
            get_config_path()?.display()
        ),
    }
}

/// Read the collection without any post-processing
fn read_collection(cli: &Cli, config: &AppConfig) -> Result<Vec<PlantRecord>> {
    let path = data_path(cli, config)?;
    let records = loader::load_records(&path)
        .with_context(|| format!("Failed to load records from {}", path.display()))?;
    info!(records = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

/// Read the collection, merging duplicates when requested
fn load(cli: &Cli, config: &AppConfig) -> Result<Vec<PlantRecord>> {
    let records = read_collection(cli, config)?;
    if !(cli.dedupe || config.dedupe_on_load) {
        return Ok(records);
    }

    let before = records.len();
    let merged = loader::dedupe_records(records);
    if merged.len() < before {
        info!(before, after = merged.len(), "merged duplicate records");
    }
    Ok(merged)
}

fn build_engine(records: Vec<PlantRecord>) -> Result<SearchEngine> {
    if records.is_empty() {
        warn!("record collection is empty; every query will return nothing");
    }
    let engine = SearchEngine::build(records).context("Failed to build search index")?;
    info!(records = engine.len(), "index ready");
    Ok(engine)
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
