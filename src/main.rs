use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use transcribble::io::default_output_paths;
use transcribble::{
    clean_html, execute_stage2, load_html, FetchConfig, HtmlSource, Stage2Config, TranscriptStats,
};

#[derive(Parser)]
#[command(name = "transcribble")]
#[command(author, version, about = "Clean up published transcript pages into TXT or DOCX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "url"])))]
struct SourceArgs {
    /// Saved HTML page containing the embedded transcript
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Public share URL to fetch the page from
    #[arg(short, long)]
    url: Option<String>,
}

impl SourceArgs {
    fn into_source(self) -> Result<HtmlSource> {
        match (self.input, self.url) {
            (Some(path), _) => Ok(HtmlSource::File(path)),
            (None, Some(url)) => Ok(HtmlSource::Url(url)),
            (None, None) => anyhow::bail!("Either --input or --url is required"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the transcript and export it
    Clean {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file for the plain-text transcript
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the DOCX transcript
        #[arg(long)]
        docx: Option<PathBuf>,

        /// Directory to write transcript.txt and transcript.docx into
        #[arg(long, conflicts_with_all = ["output", "docx"])]
        out_dir: Option<PathBuf>,

        /// Title stored in the DOCX document properties
        #[arg(long, default_value = "Transcript")]
        title: String,

        /// Don't print the transcript to stdout
        #[arg(long)]
        no_preview: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize speakers and runs without exporting
    Analyze {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            source,
            output,
            docx,
            out_dir,
            title,
            no_preview,
            verbose,
        } => {
            setup_logging(verbose);
            let (output, docx) = match out_dir {
                Some(dir) => {
                    let (text_path, docx_path) = default_output_paths(&dir);
                    (Some(text_path), Some(docx_path))
                }
                None => (output, docx),
            };
            clean_transcript(source.into_source()?, output, docx, title, !no_preview).await
        }
        Commands::Analyze {
            source,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_transcript(source.into_source()?, json).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn load(source: &HtmlSource) -> Result<String> {
    let fetch_config = FetchConfig::from_env()?;
    load_html(source, &fetch_config)
        .await
        .context("Failed to load HTML")
}

async fn clean_transcript(
    source: HtmlSource,
    output: Option<PathBuf>,
    docx: Option<PathBuf>,
    title: String,
    preview: bool,
) -> Result<()> {
    let html = load(&source).await?;

    let transcript = clean_html(&html).context("Error parsing HTML")?;
    let text = transcript.to_text();

    if preview {
        println!("{}", text);
    }

    let config = Stage2Config {
        document_title: title,
        ..Default::default()
    };
    let result = execute_stage2(&text, output.as_deref(), docx.as_deref(), &config)?;

    if let Some(path) = result.text_path {
        info!("Text transcript written to {:?}", path);
    }
    if let Some(path) = result.docx_path {
        info!("DOCX transcript written to {:?}", path);
    }

    info!("Complete: {} speaker runs", transcript.header_count());

    Ok(())
}

async fn analyze_transcript(source: HtmlSource, json: bool) -> Result<()> {
    let html = load(&source).await?;
    let transcript = clean_html(&html).context("Error parsing HTML")?;
    let stats = TranscriptStats::from_transcript(&transcript);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Transcript Analysis");
    println!("===================");
    println!("Total words: {}", stats.total_words);
    println!("Speaker runs: {}", stats.total_runs);
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    for speaker in &stats.speakers {
        let avg_run = speaker.words as f64 / speaker.runs.max(1) as f64;
        println!(
            "{} ({}): {} words, {} runs, avg run {:.1} words",
            speaker.name, speaker.speaker_id, speaker.words, speaker.runs, avg_run
        );
    }

    Ok(())
}
