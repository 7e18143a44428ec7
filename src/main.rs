use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use parley::cli::{Cli, Commands};
use parley::config::Config;
use parley::observer::LogObserver;
use parley::recognize::LineStream;
use parley::session::SessionPipeline;
use parley::synth::AzureSynthesizer;
use parley::translate::AzureTranslator;
use std::sync::Arc;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(&cli)?;
            run_session(config, cli.quiet).await?;
        }
        Some(Commands::Config) => {
            let config = load_config(&cli)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "parley",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration and apply overrides.
///
/// Priority order (lowest to highest):
/// 1. Built-in defaults
/// 2. Config file (--config path or ~/.config/parley/config.toml)
/// 3. Environment variables (PARLEY_*)
/// 4. Command-line flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = cli.config.as_deref() {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    }
    .with_env_overrides();

    if let Some(lang) = &cli.source_language {
        config.session.source_language = lang.clone();
    }
    if let Some(lang) = &cli.target_language {
        config.session.target_language = lang.clone();
    }
    if let Some(voice) = &cli.voice {
        config.session.voice = voice.clone();
    }
    if let Some(phrase) = &cli.termination_phrase {
        config.session.termination_phrase = phrase.clone();
    }
    if let Some(region) = &cli.region {
        config.api.region = region.clone();
    }

    Ok(config)
}

/// Run one interpretation session over stdin transcripts.
///
/// Each line read from stdin is treated as a recognized final transcript,
/// translated and spoken. The session ends on the termination phrase, EOF,
/// or Ctrl+C.
async fn run_session(config: Config, quiet: bool) -> Result<()> {
    if let Err(e) = config.require_keys() {
        eprintln!("{}", format!("Error: {}", e).red());
        eprintln!("Set keys in the config file or via PARLEY_SPEECH_KEY / PARLEY_TRANSLATOR_KEY.");
        std::process::exit(1);
    }

    let translator = Arc::new(AzureTranslator::new(config.api.translator_key.clone()));
    let synthesizer = Arc::new(
        AzureSynthesizer::new(
            config.api.speech_key.clone(),
            &config.api.region,
            config.session.voice.clone(),
        )
        .with_language(config.session.target_language.clone()),
    );
    let observer = Arc::new(LogObserver::new(quiet));
    let stream = LineStream::new(BufReader::new(tokio::io::stdin()));

    let pipeline = SessionPipeline::new(config.session(), translator, synthesizer)
        .with_observer(observer);
    let handle = pipeline.start(Box::new(stream)).await?;

    // Ctrl+C requests the same idempotent stop as the spoken cue.
    let signal = handle.stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.trigger();
        }
    });

    handle.wait().await?;
    Ok(())
}
