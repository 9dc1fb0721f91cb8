use std::io::{self, BufRead};
use std::path::PathBuf;

use eyre::{Result, WrapErr, bail};
use log::{debug, info, warn};

use ytblog::config::Config;
use ytblog::output::{self, Kind, Rendered};
use ytblog::summarize::{self, ApiKey, Gemini};
use ytblog::youtube::{self, InnerTube};

mod cli;

use cli::{Cli, OutputFormat};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytblog.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytblog")
        .join("logs")
}

fn build_after_help() -> String {
    let log_path = log_dir().join("ytblog.log");
    let config_path = ytblog::config::config_path();

    format!(
        "\nGet an API key at https://aistudio.google.com/app/apikey and export it as GOOGLE_API_KEY.\n\nConfig is read from: {}\nLogs are written to: {}",
        config_path.display(),
        log_path.display()
    )
}

fn read_url(cli: &Cli) -> Result<String> {
    if let Some(ref url) = cli.url {
        return Ok(url.clone());
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let url = line.trim().to_string();
    if url.is_empty() {
        bail!("no URL provided\n\nUsage: ytblog <URL>\n       echo <URL> | ytblog");
    }
    Ok(url)
}

fn output_format(cli: &Cli, config: &Config) -> OutputFormat {
    if let Some(format) = cli.format {
        return format;
    }
    match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        Some("markdown") | None => OutputFormat::Markdown,
        Some(other) => {
            warn!("Unknown format {other:?} in config, using markdown");
            OutputFormat::Markdown
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        Config::default()
    });

    let model = cli.model.as_deref().unwrap_or(config.model());
    let lang = cli.lang.as_deref().unwrap_or(config.lang());
    let format = output_format(&cli, &config);

    let url = read_url(&cli)?;

    // Extracted once; the thumbnail and the transcript fetch share it
    let video_id = ytblog::extract_video_id(&url)?;
    debug!("Video ID: {video_id}");

    if cli.verbose {
        eprintln!("Video: {video_id}\nThumbnail: {}", video_id.thumbnail_url());
        if !cli.transcript {
            eprintln!("Model: {model}");
        }
    }

    // Checked before any network call so a missing key doesn't cost a transcript fetch
    let api_key = match (&cli.api_key, cli.transcript) {
        (_, true) => None,
        (Some(key), false) if !key.trim().is_empty() => Some(ApiKey::new(key.trim())),
        _ => bail!("no API key provided; pass --api-key or set GOOGLE_API_KEY"),
    };

    let client = summarize::http_client(config.timeout())?;

    let source = InnerTube::new(client.clone(), lang);
    let transcript = youtube::fetch_transcript(&source, &video_id)
        .await
        .wrap_err("Failed to fetch transcript")?;

    if cli.verbose {
        eprintln!("Transcript: {} chars", transcript.chars().count());
    }

    let (kind, content) = match api_key {
        None => (Kind::Transcript, transcript),
        Some(api_key) => {
            let gemini = Gemini::new(client, api_key, model).with_api_base(config.api_base());
            let max_input_chars = config.max_input_chars();
            if cli.blog {
                let post = ytblog::blog::convert_to_blog(&gemini, &transcript, summarize::PROMPT, max_input_chars)
                    .await
                    .wrap_err("Failed to generate blog post")?;
                (Kind::Blog, post)
            } else {
                let summary = summarize::summarize(&gemini, &transcript, summarize::PROMPT, max_input_chars)
                    .await
                    .wrap_err("Failed to generate summary")?;
                (Kind::Summary, summary)
            }
        }
    };

    let rendered = Rendered::new(&video_id, kind, &content);
    let rendered = match format {
        OutputFormat::Markdown => output::render_markdown(&rendered),
        OutputFormat::Json => output::render_json(&rendered),
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{rendered}");
    }

    Ok(())
}
