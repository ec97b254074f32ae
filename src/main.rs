mod checkpoint;
mod db;
mod diff;
mod error;
mod llm;
mod metrics;
mod model;
mod pdf;
mod pokeapi;
mod translate;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use llm::StatBlockExtractor;
use model::{Pokemon, StatBlock};

const PARSED_CHECKPOINT: &str = "data/parsed-data.json";
const TRANSLATED_CHECKPOINT: &str = "data/translated-data.json";

#[derive(Parser)]
#[command(name = "dex_ingest", about = "PTU homebrew dex ingester: PDF stat blocks to database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract stat blocks from the PDF into the parsed checkpoint
    Extract {
        /// Path to the source PDF
        pdf: PathBuf,
        /// First page index to parse
        #[arg(long, default_value = "0")]
        start: usize,
        /// Page index to stop before (default: all pages)
        #[arg(long)]
        end: Option<usize>,
    },
    /// Translate the parsed checkpoint into database-ready records
    Translate {
        /// Offset added to computed page numbers when extraction did not
        /// start at the book's first dex page
        #[arg(long, default_value = "0")]
        page_offset: usize,
    },
    /// Insert the translated checkpoint into the database
    Save,
    /// Compare the translated checkpoint against stored records
    Diff,
    /// Extract + translate + save in one pipeline
    Run {
        /// Path to the source PDF
        pdf: PathBuf,
        /// First page index to parse
        #[arg(long, default_value = "0")]
        start: usize,
        /// Page index to stop before (default: all pages)
        #[arg(long)]
        end: Option<usize>,
    },
    /// Show ingest statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { pdf, start, end } => {
            let extractor = llm::OpenAiExtractor::from_env()?;
            let blocks = extract_pdf(&extractor, &pdf, start, end).await?;
            println!("Parsed {} pages into {}", blocks.len(), PARSED_CHECKPOINT);
            Ok(())
        }
        Commands::Translate { page_offset } => {
            let records = translate_checkpoint(page_offset).await?;
            println!(
                "Translated {} records into {}",
                records.len(),
                TRANSLATED_CHECKPOINT
            );
            Ok(())
        }
        Commands::Save => {
            let inserted = save_checkpoint()?;
            println!("Inserted {} records.", inserted);
            Ok(())
        }
        Commands::Diff => diff_checkpoint(),
        Commands::Run { pdf, start, end } => {
            let extractor = llm::OpenAiExtractor::from_env()?;

            // Phase 1: extract (checkpointing after every page)
            let t_extract = Instant::now();
            let blocks = extract_pdf(&extractor, &pdf, start, end).await?;
            println!(
                "Parsed {} pages in {:.1}s",
                blocks.len(),
                t_extract.elapsed().as_secs_f64()
            );

            // Phase 2: translate against the reference dex
            let records = translate_checkpoint(start).await?;
            println!("Translated {} records.", records.len());

            // Phase 3: save
            let inserted = save_checkpoint()?;
            println!("Inserted {} records.", inserted);
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let stats = db::get_stats(&conn)?;
            println!("Stored:  {}", stats.total);
            for (source, count) in &stats.by_source {
                println!("  {}: {}", source, count);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Extract every page in range through the LLM, rewriting the parsed
/// checkpoint after each page so a crash loses at most one page of work.
async fn extract_pdf<E: StatBlockExtractor>(
    extractor: &E,
    pdf_path: &Path,
    start: usize,
    end: Option<usize>,
) -> anyhow::Result<Vec<StatBlock>> {
    let pages = pdf::read_pages(pdf_path)?;
    let end = end.unwrap_or(pages.len()).min(pages.len());
    anyhow::ensure!(start < end, "page range {}..{} is empty", start, end);

    println!("Parsing {} pages (checkpointing each)...", end - start);
    extract_pages(extractor, &pages[start..end], start, Path::new(PARSED_CHECKPOINT)).await
}

async fn extract_pages<E: StatBlockExtractor>(
    extractor: &E,
    pages: &[String],
    first_index: usize,
    checkpoint_path: &Path,
) -> anyhow::Result<Vec<StatBlock>> {
    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")?
            .progress_chars("=> "),
    );

    let mut timer = metrics::PageTimer::new();
    let mut results: Vec<StatBlock> = Vec::with_capacity(pages.len());

    for (offset, page) in pages.iter().enumerate() {
        let index = first_index + offset;

        timer.start(index);
        let block = extractor.extract(page).await?;
        timer.end(index);

        results.push(block);
        checkpoint::write(checkpoint_path, &results)?;
        pb.inc(1);

        let remaining = pages.len() - offset - 1;
        if remaining > 0 {
            info!(
                "{}/{} pages done, ~{:.1}s per page, ~{:.1}min remaining",
                offset + 1,
                pages.len(),
                timer.average_secs(),
                timer.average_mins() * remaining as f64,
            );
        }
    }

    pb.finish_and_clear();
    info!(
        "parsed {} pages, ~{:.1}s per page",
        pages.len(),
        timer.average_secs()
    );
    Ok(results)
}

async fn translate_checkpoint(page_offset: usize) -> anyhow::Result<Vec<Pokemon>> {
    let blocks: Vec<StatBlock> = checkpoint::read(Path::new(PARSED_CHECKPOINT))?;
    info!("translating {} stat blocks for the database", blocks.len());

    let api = pokeapi::PokeApi::new();
    let records = translate::translate(&api, &blocks, page_offset).await?;
    checkpoint::write(Path::new(TRANSLATED_CHECKPOINT), &records)?;
    Ok(records)
}

fn save_checkpoint() -> anyhow::Result<usize> {
    let records: Vec<Pokemon> = checkpoint::read(Path::new(TRANSLATED_CHECKPOINT))?;
    let conn = db::connect()?;
    db::init_schema(&conn)?;
    db::insert_pokemon(&conn, &records)
}

/// Review what saving the translated checkpoint would change: new records,
/// changed records (with their minimal patch), and untouched ones.
fn diff_checkpoint() -> anyhow::Result<()> {
    let records: Vec<Pokemon> = checkpoint::read(Path::new(TRANSLATED_CHECKPOINT))?;
    let conn = db::connect()?;
    db::init_schema(&conn)?;

    let mut new = 0usize;
    let mut changed = 0usize;
    let mut unchanged = 0usize;

    for record in &records {
        match db::fetch_by_name(&conn, &record.name)? {
            None => {
                new += 1;
                println!("new: {}", record.name);
            }
            Some(stored) if diff::is_equal(&stored, record) => unchanged += 1,
            Some(stored) => {
                changed += 1;
                let patch = diff::diff(&stored, record);
                println!("{}", serde_json::to_string_pretty(&patch)?);
            }
        }
    }

    println!("{} new, {} changed, {} unchanged.", new, changed, unchanged);
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──
