use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use devtranslate::batch::{self, split_terms};
use devtranslate::config::config_search_paths;
use devtranslate::providers::ProviderPreset;
use devtranslate::{build_router, AppConfig, AppState, FormatMode, FormattedResult, Translator};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "devtranslate",
    about = "Translate terms into PascalCase/camelCase identifiers with an LLM",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Provider name (overrides config)
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Model name (overrides config and provider default)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate terms and print identifiers
    Translate {
        /// Terms to translate (commas also separate terms). Reads stdin when empty.
        terms: Vec<String>,

        /// Read terms from a file, one per line
        #[arg(short, long, conflicts_with = "terms")]
        file: Option<PathBuf>,

        /// Identifier casing (overrides config)
        #[arg(long, value_enum)]
        format: Option<FormatMode>,

        /// Output layout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Format text locally without translating
    Format {
        /// Text to format, one identifier per argument
        #[arg(required = true)]
        text: Vec<String>,

        /// Identifier casing (overrides config)
        #[arg(long, value_enum)]
        format: Option<FormatMode>,
    },
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List built-in provider presets
    Providers,
    /// Print config search paths
    ConfigPaths,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        config,
        provider,
        model,
        command,
    } = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devtranslate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match command {
        Command::Providers => {
            for p in ProviderPreset::all() {
                println!(
                    "{:<12} {:<60} {:<22} {}",
                    p.name, p.base_url, p.default_api_key_env, p.default_model
                );
            }
            Ok(())
        }
        Command::ConfigPaths => {
            println!("Config search paths:");
            for (i, path) in config_search_paths().iter().enumerate() {
                println!("  {}. {}", i + 1, path.display());
            }
            Ok(())
        }
        Command::Format { text, format } => {
            let config = load_config(config.as_deref(), provider.as_deref(), model)?;
            let mode = format.unwrap_or(config.format);
            for t in &text {
                println!("{}", devtranslate::format(t, mode));
            }
            Ok(())
        }
        Command::Translate {
            terms,
            file,
            format,
            output,
        } => {
            let config = load_config(config.as_deref(), provider.as_deref(), model)?;
            let mode = format.unwrap_or(config.format);
            let input = read_input(terms, file)?;
            let terms = split_terms(&input);
            if terms.is_empty() {
                anyhow::bail!("No terms to translate");
            }

            let translator = Translator::from_config(&config, build_client(&config)?)?;
            let results = batch::translate_terms(&translator, &terms, mode)
                .await
                .context("Failed to translate")?;

            print_results(&results, output)?;
            Ok(())
        }
        Command::Serve { port } => {
            let mut config = load_config(config.as_deref(), provider.as_deref(), model)?;
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
    }
}

/// Load the config file and apply the global `--provider`/`--model` overrides.
fn load_config(
    path: Option<&Path>,
    provider: Option<&str>,
    model: Option<String>,
) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::find_and_load(path)?;
    if let Some(provider) = provider {
        config.set_provider(provider);
    }
    if let Some(model) = model {
        config.provider.model = Some(model);
    }
    Ok(config)
}

fn build_client(config: &AppConfig) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

fn read_input(terms: Vec<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    if !terms.is_empty() {
        return Ok(terms.join("\n"));
    }
    if std::io::stdin().is_terminal() {
        eprintln!("Enter terms, one per line. End with Ctrl-D.");
    }
    std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")
}

fn print_results(results: &[FormattedResult], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
        OutputFormat::Tsv => println!("{}", batch::to_tsv(results)),
        OutputFormat::Table => {
            let width = results
                .iter()
                .map(|r| r.formatted.len())
                .max()
                .unwrap_or(0)
                .max("Identifier".len());
            println!("{:<width$}  Original", "Identifier");
            for r in results {
                println!("{:<width$}  {}", r.formatted, r.original);
            }
        }
    }
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let translator = Translator::from_config(&config, build_client(&config)?)?;

    info!("devtranslate v{}", env!("CARGO_PKG_VERSION"));
    info!("  Provider:  {}", config.provider.name);
    info!("  Endpoint:  {}", translator.url());
    info!("  Model:     {}", translator.model());
    info!("  Format:    {}", config.format);
    info!("  Port:      {}", config.port);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState { config, translator });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
