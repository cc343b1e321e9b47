use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "yield-qa")]
#[command(about = "Builds question/answer fine-tuning datasets from webpages and books")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape a webpage into a structured page document
    Scrape {
        /// Page URL (or a local HTML file with --local)
        uri: String,

        /// Treat the URI as a local file instead of a web URL
        #[arg(long)]
        local: bool,

        /// Output file (defaults to a name derived from the URL)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate rule-based pairs from a scraped page document
    Generate {
        /// Page document produced by `scrape`
        input: PathBuf,

        #[arg(short, long, default_value = "qa_dataset.jsonl")]
        output: PathBuf,

        /// Override the number of paragraphs turned into pairs
        #[arg(long)]
        max_paragraphs: Option<usize>,
    },

    /// Scrape a webpage and generate rule-based pairs in one step
    Run {
        /// Page URL (or a local HTML file with --local)
        uri: String,

        #[arg(long)]
        local: bool,

        #[arg(short, long, default_value = "qa_dataset.jsonl")]
        output: PathBuf,

        /// Also keep the scraped page document here
        #[arg(long)]
        save_page: Option<PathBuf>,

        #[arg(long)]
        max_paragraphs: Option<usize>,
    },

    /// Synthesize pairs from book text with a text-generation model
    Synth {
        /// Text file or http(s) URL of the book
        source: String,

        #[arg(short, long, default_value = "book_qa_dataset.jsonl")]
        output: PathBuf,

        /// Text-generation server base URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Words per chunk
        #[arg(long)]
        chunk_words: Option<usize>,

        /// Pairs requested per chunk
        #[arg(short = 'n', long)]
        pairs_per_chunk: Option<usize>,

        /// Only process this many chunks
        #[arg(long)]
        max_chunks: Option<usize>,
    },
}
