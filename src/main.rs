use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use yield_qa::dataset::write_jsonl;
use yield_qa::synth::{self, HttpGenerator};
use yield_qa::{Config, QaDataset, QaPair, Result, ScrapedPage, Source, rules, utils};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_time = std::time::Instant::now();
    let result = run(args.command, config).await;
    ::log::info!("Finished in {:.2} seconds", start_time.elapsed().as_secs_f64());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            Config::from_file(path)
        }
        None => {
            let mut config = Config::default();
            config.apply_env();
            Ok(config)
        }
    }
}

async fn run(command: Command, mut config: Config) -> Result<()> {
    match command {
        Command::Scrape { uri, local, output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(utils::page_file_name(&uri)));
            let page = QaDataset::new(source(uri.clone(), local))
                .with_config(config)
                .page()
                .await?;
            page.write_to(&output)?;

            println!("Everything extracted from {} and saved to {}", uri, output.display());
            print_page_stats(&page);
            Ok(())
        }
        Command::Generate {
            input,
            output,
            max_paragraphs,
        } => {
            if let Some(max) = max_paragraphs {
                config.generator.max_paragraphs = max;
            }
            let page = ScrapedPage::from_file(&input)?;
            let pairs = rules::generate(&page, &config.generator);
            save_pairs(&output, &pairs)
        }
        Command::Run {
            uri,
            local,
            output,
            save_page,
            max_paragraphs,
        } => {
            if let Some(max) = max_paragraphs {
                config.generator.max_paragraphs = max;
            }
            let limits = config.generator;
            let page = QaDataset::new(source(uri, local))
                .with_config(config)
                .page()
                .await?;
            if let Some(path) = save_page {
                page.write_to(&path)?;
                ::log::info!("Saved scraped page to {}", path.display());
            }
            let pairs = rules::generate(&page, &limits);
            save_pairs(&output, &pairs)
        }
        Command::Synth {
            source,
            output,
            endpoint,
            chunk_words,
            pairs_per_chunk,
            max_chunks,
        } => {
            let synth_config = &mut config.synth;
            if let Some(endpoint) = endpoint {
                synth_config.endpoint = endpoint;
            }
            if let Some(words) = chunk_words {
                synth_config.chunk_words = words;
            }
            if let Some(n) = pairs_per_chunk {
                synth_config.pairs_per_chunk = n;
            }
            if max_chunks.is_some() {
                synth_config.max_chunks = max_chunks;
            }

            let text = synth::load_text(&source, config.synth.max_attempts).await?;
            ::log::info!("Loaded {} characters of text", text.len());
            let mut generator = HttpGenerator::new(&config.synth);
            let pairs = synth::synthesize(&text, &mut generator, &config.synth).await?;
            save_pairs(&output, &pairs)
        }
    }
}

fn source(uri: String, local: bool) -> Source {
    if local {
        Source::Document(PathBuf::from(uri))
    } else {
        Source::Web(uri)
    }
}

fn save_pairs(output: &Path, pairs: &[QaPair]) -> Result<()> {
    let written = write_jsonl(output, pairs)?;
    println!(
        "Generated {} Q&A pairs and saved to {}",
        written,
        output.display()
    );

    if let Some(first) = pairs.first() {
        println!("Sample pair:");
        println!("{}", serde_json::to_string_pretty(first)?);
    }
    Ok(())
}

fn print_page_stats(page: &ScrapedPage) {
    println!(
        "Full text length: {} characters",
        page.full_text.as_ref().map_or(0, |t| t.chars().count())
    );
    println!(
        "Found {} links, {} images, {} lists, {} tables",
        page.links.as_ref().map_or(0, Vec::len),
        page.images.as_ref().map_or(0, Vec::len),
        page.lists.as_ref().map_or(0, Vec::len),
        page.tables.as_ref().map_or(0, Vec::len),
    );
}
