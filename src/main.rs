//! SupaBrowser - natural-language browser tasks
//!
//! Main entry point for the CLI application.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use supabrowser::{
    cli,
    web::{self, WebState},
    AnthropicAgentFactory, Config, ConsolePresenter, Credential, TaskRunner,
};
use tracing_subscriber::EnvFilter;

/// SupaBrowser - browser automation with Anthropic Claude
#[derive(Parser, Debug)]
#[command(name = "supabrowser")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug output
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a task in the console
    Run {
        /// Task description
        task: Option<String>,

        /// Model to use
        #[arg(long, short = 'm')]
        model: Option<String>,

        /// Run in headed browser mode (visible window)
        #[arg(long)]
        headed: bool,

        /// Anthropic API key (defaults to ANTHROPIC_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Serve the web form
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long, short = 'p')]
        port: Option<u16>,

        /// Open the form in the system browser
        #[arg(long)]
        open: bool,
    },

    /// Print step panels for a textual trace read from FILE or stdin
    RenderTrace { file: Option<PathBuf> },

    /// List supported models
    Models,

    /// Print the effective configuration
    Config {
        /// Save it to the config file
        #[arg(long)]
        write: bool,
    },
}

fn init_logging(debug: bool) {
    let fallback = if debug {
        "supabrowser=debug"
    } else {
        "supabrowser=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = match args.config {
        Some(ref path) => {
            let _ = dotenvy::dotenv();
            Config::load_from_path(path)?
        }
        None => Config::load(),
    };

    if args.debug {
        config.agent.debug = true;
    }

    init_logging(config.agent.debug);

    match args.command {
        Command::Run {
            task,
            model,
            headed,
            api_key,
        } => {
            // Apply CLI overrides
            if let Some(model) = model {
                config.agent.model = model;
            }
            if headed {
                config.browser.headless = false;
            }

            let credential = api_key
                .map(Credential::new)
                .unwrap_or_else(Config::credential_from_env);
            let request = cli::console_request(
                task,
                credential,
                &config.agent.model,
                config.browser.headless,
            )?;

            let runner = TaskRunner::new(Arc::new(AnthropicAgentFactory::new(config)));
            let mut presenter = ConsolePresenter::stdout();
            cli::run_task(&runner, request, &mut presenter).await?;
        }

        Command::Serve { host, port, open } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let addr = config.server_addr();
            let url = config.server_url();
            let runner = TaskRunner::new(Arc::new(AnthropicAgentFactory::new(config.clone())));
            let state = WebState::from_config(runner, &config)?;

            if open {
                if let Err(e) = webbrowser::open(&url) {
                    tracing::warn!("Could not open {}: {}", url, e);
                }
            }

            web::serve(state, &addr).await?;
        }

        Command::RenderTrace { file } => {
            let trace = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    text
                }
            };

            let mut presenter = ConsolePresenter::stdout();
            cli::render_trace(&trace, &mut presenter)?;
        }

        Command::Models => {
            println!("{}", cli::models_text(&config));
        }

        Command::Config { write } => {
            print!("{}", cli::config_text(&config, write)?);
        }
    }

    Ok(())
}
