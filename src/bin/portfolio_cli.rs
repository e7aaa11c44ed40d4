//! Portfolio CLI
//!
//! Commands: serve, projects, route, render, validate, contact, ping
//! Outputs JSON to stdout
//! Returns 2 on validation failure, 1 on any other error

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_core::{
    form::{ContactSubmitter, SimulatedDelivery},
    ApiClient, AppState, ContactForm, ContactInput, CountingViewport, Navigator, ServerConfig,
    SubmissionStatus, Validator,
};

#[derive(Parser)]
#[command(name = "portfolio-cli")]
#[command(about = "Portfolio site - stub server and page tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON catalog replacing the built-in projects
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the stub server
    Serve {
        /// Port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding resume.pdf
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// List catalog projects
    Projects,

    /// Navigate through one or more paths and print the composed pages
    Route {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the rendered HTML for a path
    Render { path: String },

    /// Validate a contact form payload
    Validate {
        /// JSON payload (ContactInput)
        #[arg(short, long)]
        payload: String,
    },

    /// Run a contact form submission through the simulated destination
    Contact {
        /// JSON payload (ContactInput)
        #[arg(short, long)]
        payload: String,
    },

    /// Fetch the greeting from a running server
    Ping {
        #[arg(short, long, default_value = "http://localhost:5000")]
        base_url: String,
    },
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => println!(r#"{{"error": "Failed to encode output: {}"}}"#, e),
    }
}

fn parse_input(payload: &str) -> Result<ContactInput, ExitCode> {
    serde_json::from_str(payload).map_err(|e| {
        print_json(&serde_json::json!({
            "valid": false,
            "error": format!("Invalid payload: {e}"),
        }));
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }
    init_tracing(config.log_json);

    let state = match AppState::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            print_json(&serde_json::json!({ "error": e.to_string() }));
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve { port, static_dir } => {
            if let Some(port) = port {
                config.port = port;
            }
            let state = match static_dir {
                Some(dir) => AppState {
                    static_dir: std::sync::Arc::new(dir),
                    ..state
                },
                None => state,
            };

            match portfolio_core::serve(&config, state).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!("{e}");
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Projects => {
            let projects: Vec<_> = state
                .composer
                .catalog()
                .list()
                .iter()
                .map(|p| serde_json::json!({
                    "id": p.id,
                    "title": p.title,
                    "tags": p.tags,
                }))
                .collect();

            print_json(&serde_json::Value::from(projects));
            ExitCode::SUCCESS
        }

        Commands::Route { paths } => {
            let viewport = CountingViewport::new();
            let mut navigator = Navigator::with_scroll_reset(viewport.clone());

            let mut pages = vec![];
            for path in &paths {
                let route = navigator.navigate(path);
                pages.push(serde_json::json!({
                    "path": path,
                    "route": route,
                    "page": state.composer.compose(&route),
                }));
            }

            print_json(&serde_json::json!({
                "pages": pages,
                "scroll_resets": viewport.resets(),
            }));
            ExitCode::SUCCESS
        }

        Commands::Render { path } => {
            let route = portfolio_core::Route::resolve(&path);
            let page = state.composer.compose(&route);
            print!("{}", portfolio_core::render_page(&page));
            ExitCode::SUCCESS
        }

        Commands::Validate { payload } => {
            let input = match parse_input(&payload) {
                Ok(i) => i,
                Err(code) => return code,
            };

            let errors = Validator::new().validate(&input);
            let messages: serde_json::Map<_, _> = errors
                .iter()
                .map(|(field, error)| {
                    (field.label().to_lowercase(), serde_json::Value::from(error.message(*field)))
                })
                .collect();

            print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "errors": errors,
                "messages": messages,
            }));

            if errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Contact { payload } => {
            let input = match parse_input(&payload) {
                Ok(i) => i,
                Err(code) => return code,
            };

            let submitter = ContactSubmitter::new(SimulatedDelivery::default(), config.submit_timeout);
            let mut form = ContactForm::with_input(input);
            let status = submitter.submit(&mut form).await;

            print_json(&serde_json::json!({ "status": status, "form": form }));
            match status {
                SubmissionStatus::Success => ExitCode::SUCCESS,
                SubmissionStatus::Idle => ExitCode::from(2), // Validation failure
                _ => ExitCode::FAILURE,
            }
        }

        Commands::Ping { base_url } => {
            let client = ApiClient::new(base_url, Duration::from_secs(5));
            match client.greeting().await {
                Ok(greeting) => {
                    print_json(&serde_json::json!({ "success": true, "message": greeting.message }));
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    print_json(&serde_json::json!({ "success": false, "error": e }));
                    ExitCode::FAILURE
                }
            }
        }
    }
}
