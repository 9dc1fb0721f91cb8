use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytblog",
    about = "Summarize a YouTube video or turn it into a blog post",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube watch URL containing `v=` (first stdin line if omitted)
    pub url: Option<String>,

    /// Convert the summary into a structured blog post
    #[arg(short, long, conflicts_with = "transcript")]
    pub blog: bool,

    /// Print the transcript only, without calling the model
    #[arg(short, long)]
    pub transcript: bool,

    /// Google API key for Gemini
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format: markdown (default), json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Preferred caption language
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Gemini model for summarization
    #[arg(short, long)]
    pub model: Option<String>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show video ID, thumbnail and model details
    #[arg(short, long)]
    pub verbose: bool,
}
