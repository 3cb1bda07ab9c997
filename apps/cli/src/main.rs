use std::{future::Future, path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tldw_core::{
    ApiKeys, AppConfig, Backend, MISSING_API_KEY, Session, UrlPolicy, YoutubeTranscriptSource,
    format_language, format_transcript_with_timestamps,
};

/// CLI wrapper for Backend enum (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliBackend {
    #[value(alias = "openai")]
    Chatgpt,
    Gemini,
    #[value(alias = "spacy")]
    WordFrequency,
}

impl From<CliBackend> for Backend {
    fn from(cli: CliBackend) -> Self {
        match cli {
            CliBackend::Chatgpt => Backend::ChatGpt,
            CliBackend::Gemini => Backend::Gemini,
            CliBackend::WordFrequency => Backend::WordFrequency,
        }
    }
}

#[derive(Parser)]
#[command(name = "tldw")]
#[command(about = "Fetch YouTube transcripts and summarize them with an LLM or extractive scoring")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to <config dir>/tldw/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct VideoArgs {
    /// Video URL (watch, live or youtu.be link)
    url: String,

    /// Reject links that match no known YouTube pattern instead of using them as ids
    #[arg(long)]
    strict: bool,
}

impl VideoArgs {
    fn url_policy(&self) -> UrlPolicy {
        if self.strict {
            UrlPolicy::Strict
        } else {
            UrlPolicy::Lenient
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show title, thumbnail and available transcript languages
    Info {
        #[command(flatten)]
        video: VideoArgs,
    },

    /// Print a video's transcript
    Transcript {
        #[command(flatten)]
        video: VideoArgs,

        /// Transcript language (e.g., "en", "fr")
        #[arg(short, long)]
        lang: Option<String>,

        /// Prefix each caption with its [MM:SS] start time
        #[arg(long)]
        timestamps: bool,
    },

    /// Summarize a video's transcript
    Summarize {
        #[command(flatten)]
        video: VideoArgs,

        /// Transcript language (e.g., "en", "fr")
        #[arg(short, long)]
        lang: Option<String>,

        /// Summarization backend
        #[arg(short, long)]
        backend: Option<CliBackend>,

        /// Instruction sent ahead of the transcript to generative backends
        #[arg(short, long)]
        prompt: Option<String>,

        /// API key for the generative backend (overrides OPENAI_API_KEY / GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Share of sentences kept by the word-frequency backend
        #[arg(long)]
        ratio: Option<f64>,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn with_spinner<T>(msg: &str, fut: impl Future<Output = T>) -> T {
    let spinner = create_spinner(msg);
    let result = fut.await;
    spinner.finish_and_clear();
    result
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "tldw=debug,tldw_core=debug"
    } else {
        "tldw=warn,tldw_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn session(config: &AppConfig, video: &VideoArgs) -> Result<Session<YoutubeTranscriptSource>> {
    let source = YoutubeTranscriptSource::new(config.timeout())?;
    Ok(Session::new(source).with_url_policy(video.url_policy()))
}

async fn info(config: &AppConfig, video: VideoArgs) -> Result<()> {
    let session = session(config, &video)?;
    let info = with_spinner("Fetching video info...", session.load_video(&video.url))
        .await
        .context("Failed to retrieve transcript list")?;

    println!(
        "{} {}",
        style("Video:").dim(),
        style(info.title.as_deref().unwrap_or("(untitled)")).cyan().bold()
    );
    println!("{} {}", style("Id:").dim(), info.id);
    println!("{} {}", style("Thumbnail:").dim(), info.thumbnail_url);
    println!("{}", style("Languages:").dim());
    for language in &info.languages {
        println!("  • {}", format_language(language));
    }
    Ok(())
}

async fn transcript(
    config: &AppConfig,
    video: VideoArgs,
    lang: Option<String>,
    timestamps: bool,
) -> Result<()> {
    let language = lang.unwrap_or_else(|| config.language.clone());
    let session = session(config, &video)?;
    let transcript = with_spinner(
        &format!("Fetching {} transcript...", language),
        session.transcript(&video.url, &language),
    )
    .await
    .context("Failed to retrieve transcript")?;

    if timestamps {
        println!("{}", format_transcript_with_timestamps(&transcript));
    } else {
        println!("{}", transcript.full_text());
    }
    Ok(())
}

struct SummarizeArgs {
    lang: Option<String>,
    backend: Option<CliBackend>,
    prompt: Option<String>,
    api_key: Option<String>,
    ratio: Option<f64>,
}

async fn summarize_video(config: &AppConfig, video: VideoArgs, args: SummarizeArgs) -> Result<()> {
    let backend = args.backend.map(Backend::from).unwrap_or(config.backend);
    let language = args.lang.unwrap_or_else(|| config.language.clone());
    let ratio = args.ratio.unwrap_or(config.ratio);
    if !(ratio > 0.0 && ratio <= 1.0) {
        bail!("--ratio must be in (0, 1], got {}", ratio);
    }

    let keys = ApiKeys::from_env();
    let generation = backend
        .provider()
        .map(|provider| config.generation(provider, &keys, args.api_key.as_deref()));
    if let Some(generation) = &generation
        && generation.api_key == MISSING_API_KEY
    {
        warn!(
            env_var = generation.provider.config().env_var,
            "No API key set for {}", generation.provider
        );
    }

    let session = session(config, &video)?;
    let transcript = with_spinner(
        &format!("Fetching {} transcript...", language),
        session.transcript(&video.url, &language),
    )
    .await
    .context("Failed to retrieve transcript")?;

    let instruction = args.prompt.unwrap_or_else(|| config.prompt.clone());
    let summary = with_spinner(
        &format!("Summarizing with {}...", backend),
        session.summarize(transcript, backend, &instruction, ratio, generation.as_ref()),
    )
    .await
    .context("Failed to summarize transcript")?;

    println!("{}", summary);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Command::Info { video } => info(&config, video).await,
        Command::Transcript {
            video,
            lang,
            timestamps,
        } => transcript(&config, video, lang, timestamps).await,
        Command::Summarize {
            video,
            lang,
            backend,
            prompt,
            api_key,
            ratio,
        } => {
            let args = SummarizeArgs {
                lang,
                backend,
                prompt,
                api_key,
                ratio,
            };
            summarize_video(&config, video, args).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
