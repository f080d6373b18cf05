//! Birdglot - bird sound recognition with localized species names.
//!
//! This crate analyzes audio recordings with `BirdNET`, translates the
//! detected common names into a target language, and optionally looks
//! up a representative image per species.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod enrich;
pub mod error;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod translate;

use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command};
use config::{
    Config, InferenceDevice, ModelConfig, config_file_path, load_default_config,
    save_default_config, working_file_path,
};
use constants::DEFAULT_TOP_K;
use enrich::{DuckDuckGoImages, Enricher};
use inference::{BirdClassifier, build_range_filter_config};
use output::JsonSettings;
use pipeline::{AnalysisOptions, ReportContext, analyze_file, write_results};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use translate::{GoogleTranslate, Translator};

pub use error::{Error, Result};

/// Main entry point for the birdglot CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    // No subcommand and nothing to analyze: usage error, before any
    // runtime or model setup
    if cli.command.is_none() && cli.inputs.is_empty() {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    // Initialize ONNX Runtime (auto-detects bundled libraries)
    birdnet_onnx::init_runtime().map_err(|e| Error::RuntimeInitialization {
        reason: e.to_string(),
    })?;

    // Load configuration
    let config = load_default_config()?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    // Run analysis
    analyze_files(&cli.inputs, &cli.analyze, &config)
}

/// Analyze input files with the given options.
#[allow(clippy::too_many_lines)]
fn analyze_files(inputs: &[PathBuf], args: &AnalyzeArgs, config: &Config) -> Result<()> {
    // Fail on a bad path before paying for the model load
    validate_inputs(inputs)?;
    config::validate_config(config)?;

    // Resolve model configuration
    let model_name = args
        .model
        .clone()
        .or_else(|| config.defaults.model.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no model specified (use -m or set defaults.model in config)".to_string(),
        })?;

    let model_config = config::get_model(config, &model_name)?;

    // Resolve analysis settings
    let min_confidence = args
        .min_confidence
        .unwrap_or(config.defaults.min_confidence);
    let overlap = args.overlap.unwrap_or(config.defaults.overlap);
    let batch_size = args.batch_size.unwrap_or(config.defaults.batch_size);
    let gain_db = args.gain.unwrap_or(config.defaults.gain_db);
    let formats = args
        .format
        .clone()
        .unwrap_or_else(|| config.defaults.formats.clone());
    let lat = args.lat.or(config.defaults.lat);
    let lon = args.lon.or(config.defaults.lon);

    // Resolve device
    let device = if args.gpu {
        InferenceDevice::Gpu
    } else if args.cpu {
        InferenceDevice::Cpu
    } else {
        config.inference.device
    };

    // Build range filter config
    let range_filter_config = build_range_filter_config(
        lat,
        lon,
        &model_name,
        model_config,
        config.inference.range_filter_threshold,
    )?;

    // Build classifier
    info!("Loading model: {}", model_name);
    let classifier = BirdClassifier::from_config(
        model_config,
        device,
        min_confidence,
        DEFAULT_TOP_K,
        range_filter_config,
    )?;

    // Build network services. Both backends are blocking facades over
    // async HTTP, so they share one runtime owned by this frame.
    let translation_enabled = !args.no_translate && config.translation.enabled;
    let enrichment_enabled = args.images && config.enrichment.enabled;

    let runtime = if translation_enabled || enrichment_enabled {
        Some(
            tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
                message: format!("failed to create async runtime: {e}"),
            })?,
        )
    } else {
        None
    };

    let target_language = args
        .language
        .clone()
        .unwrap_or_else(|| config.translation.target_language.clone());

    let mut translator = match &runtime {
        Some(runtime) if translation_enabled => {
            let backend = GoogleTranslate::new(
                runtime.handle().clone(),
                config.translation.endpoint.clone(),
                Duration::from_secs(config.translation.timeout_secs),
            )?;
            info!("Translating common names to {}", target_language);
            Some(Translator::new(Box::new(backend), target_language.clone()))
        }
        _ => None,
    };

    let enricher = match &runtime {
        Some(runtime) if enrichment_enabled => {
            let backend = DuckDuckGoImages::new(
                runtime.handle().clone(),
                Duration::from_secs(config.enrichment.timeout_secs),
            )?;
            Some(Enricher::new(Box::new(backend)))
        }
        _ => None,
    };

    let options = AnalysisOptions {
        min_confidence,
        overlap,
        batch_size,
        progress_enabled: !args.quiet,
    };
    let working_path = working_file_path()?;

    for input in inputs {
        // Ingest: decode, boost, and write the working artifact
        let artifact = audio::ingest(input, gain_db, &working_path)?;

        let outcome = analyze_file(
            &artifact,
            input,
            &classifier,
            translator.as_mut(),
            &options,
        )?;

        if outcome.detections.is_empty() {
            println!("{}", output::no_detections_hint(min_confidence));
        } else {
            output::print_detections(&outcome.detections, enricher.as_ref());
        }

        let context = ReportContext {
            model: &model_name,
            settings: JsonSettings {
                min_confidence,
                overlap,
                gain_db,
                language: translation_enabled.then(|| target_language.clone()),
                lat,
                lon,
            },
            audio_duration_secs: outcome.audio_duration_secs,
        };
        let written = write_results(input, &formats, &outcome.detections, &context)?;
        for path in &written {
            info!("Results written: {}", path.display());
        }
    }

    Ok(())
}

/// Check that every input file exists.
fn validate_inputs(inputs: &[PathBuf]) -> Result<()> {
    for input in inputs {
        if !input.exists() {
            return Err(Error::InputFileNotFound {
                path: input.clone(),
            });
        }
    }
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Build filter string based on verbosity level.
    // ORT logging is suppressed by default because CUDA fallback is expected in auto mode.
    // Use -v to see ORT warnings, -vv for info, -vvv for full trace.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(), // -vvv: no ORT filter, full trace
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Models { action } => handle_models_command(action, config),
    }
}

fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
                println!("Use 'birdglot models add' to add models.");
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!(
                    "  birdglot models add <name> --path <model.onnx> --labels <labels.txt> --default"
                );
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn handle_models_command(action: cli::ModelsAction, config: &Config) -> Result<()> {
    use cli::ModelsAction;

    match action {
        ModelsAction::List => {
            if config.models.is_empty() {
                println!("No models configured.");
            } else {
                println!("Configured models:");
                for (name, model) in &config.models {
                    let default_marker = config.defaults.model.as_ref().is_some_and(|d| d == name);
                    let type_label = model.model_type.as_deref().unwrap_or("birdnet");
                    println!(
                        "  {} ({}){}",
                        name,
                        type_label,
                        if default_marker { " [default]" } else { "" }
                    );
                }
            }
            Ok(())
        }
        ModelsAction::Add {
            name,
            path,
            labels,
            meta_model,
            default,
        } => handle_models_add(name, path, labels, meta_model, default),
        ModelsAction::Check => {
            for (name, model) in &config.models {
                config::validate_model_config(name, model)?;
                println!("  {name}: OK");
            }
            Ok(())
        }
    }
}

/// Handle the `models add` command.
fn handle_models_add(
    name: String,
    path: PathBuf,
    labels: PathBuf,
    meta_model: Option<PathBuf>,
    set_default: bool,
) -> Result<()> {
    // Validate files exist
    if !path.exists() {
        return Err(Error::ModelFileNotFound { path });
    }
    if !labels.exists() {
        return Err(Error::LabelsFileNotFound { path: labels });
    }
    if let Some(meta_path) = &meta_model {
        if !meta_path.exists() {
            return Err(Error::ModelFileNotFound {
                path: meta_path.clone(),
            });
        }
    }

    // Load existing config
    let mut config = load_default_config()?;

    if config.models.contains_key(&name) {
        return Err(Error::ModelAlreadyExists { name });
    }

    config.models.insert(
        name.clone(),
        ModelConfig {
            path: path.clone(),
            labels: labels.clone(),
            model_type: None,
            meta_model,
        },
    );

    if set_default {
        config.defaults.model = Some(name.clone());
    }

    let config_path = save_default_config(&config)?;

    println!("Added model '{name}'");
    println!("  Model: {}", path.display());
    println!("  Labels: {}", labels.display());
    println!("  Default: {}", if set_default { "yes" } else { "no" });
    println!("\nConfiguration saved to: {}", config_path.display());

    Ok(())
}
