//! Command-line entry point: prints the merged translations for a language.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use component_translations::config::{
    self,
    TranslationSettings,
};
use component_translations::registry::FilesystemRegistry;
use component_translations::{
    ActiveComponents,
    Identifier,
    TranslationCache,
    TranslationService,
};
use tracing_subscriber::EnvFilter;

/// Print the merged translations of the given components as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory searched for components; repeat to add lower-priority roots.
    #[arg(long = "root", value_name = "DIR")]
    roots: Vec<PathBuf>,

    /// Loaded component or platform (e.g. `light`, `light.hue`).
    #[arg(long = "component", value_name = "ID")]
    components: Vec<Identifier>,

    /// Integration currently being set up.
    #[arg(long = "flow", value_name = "ID")]
    flows: Vec<Identifier>,

    /// Language to resolve.
    #[arg(long, short, env = "TRANSLATIONS_LANGUAGE", default_value = "en")]
    language: String,

    /// Directory containing `.component-translations.json`.
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Do not fill missing keys from the default language.
    #[arg(long)]
    no_fallback: bool,
}

/// Set up logging and run the command.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve translations and write them to stdout.
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = config::load_settings(cli.config.as_deref())?;
    settings.component_roots.extend(cli.roots);

    let active = ActiveComponents::with_loaded(cli.components);
    for flow in cli.flows {
        active.begin_flow(flow);
    }

    let service = TranslationService::new(
        Arc::new(registry(&settings)),
        Arc::new(active),
        TranslationCache::new(),
        &settings,
    );

    let translations = if cli.no_fallback {
        service.get_component_resources(&cli.language).await?
    } else {
        service.get_translations(&cli.language).await?
    };

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &translations)?;
    writeln!(stdout)?;
    Ok(())
}

/// Filesystem registry configured from `settings`.
fn registry(settings: &TranslationSettings) -> FilesystemRegistry {
    FilesystemRegistry::new(settings.component_roots.clone())
        .with_module_extension(&settings.module_extension)
        .with_package_entry(&settings.package_entry)
}
