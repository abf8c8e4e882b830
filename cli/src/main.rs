use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use photolens_client::net::types::{AiModel, Credentials, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, HistoryQuery, PhotoUpload};
use photolens_client::state::storage::FileStorage;
use photolens_client::util::navigate::Navigator;
use photolens_client::util::notify::LogNotifier;
use photolens_client::{ApiError, App, AppError, ClientConfig};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("not signed in; run `photolens login`")]
    NotSignedIn,
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported image type for {0}; expected jpg, png, webp, gif or bmp")]
    UnsupportedImage(PathBuf),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "photolens", about = "Photo critique API client")]
struct Cli {
    #[arg(long, env = "PHOTOLENS_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "PHOTOLENS_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the server's health endpoint.
    Ping,
    Register(CredentialArgs),
    Login(CredentialArgs),
    Logout,
    /// Show the signed-in user.
    Me,
    /// Upload an image for analysis.
    Analyze {
        file: PathBuf,
        #[arg(long, help = "deepseek, openai or claude; server default when omitted")]
        model: Option<AiModel>,
    },
    History {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    Detail {
        photo_id: i64,
    },
    Delete {
        photo_id: i64,
    },
    /// Show where the navigation guard sends a path.
    Route {
        path: String,
    },
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    username: String,

    #[arg(long, env = "PHOTOLENS_PASSWORD", hide_env_values = true)]
    password: String,
}

impl From<CredentialArgs> for Credentials {
    fn from(args: CredentialArgs) -> Self {
        Credentials::new(args.username, args.password)
    }
}

/// Navigation has no screen to change here; tell the user where they landed.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        match path {
            "/login" => eprintln!("-> {path} (sign in with `photolens login`)"),
            _ => eprintln!("-> {path}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url);
    }
    if let Some(storage_path) = cli.storage_path {
        config.storage_path = storage_path;
    }

    let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
    let mut app = App::new(config, storage, Arc::new(LogNotifier), Arc::new(TerminalNavigator))?;
    run(&mut app, cli.command).await
}

async fn run(app: &mut App, command: Command) -> Result<(), CliError> {
    match command {
        Command::Ping => run_ping(app.config()).await,
        Command::Register(args) => {
            let user = app.register(&Credentials::from(args)).await?;
            print_json(&user)
        }
        Command::Login(args) => {
            let user = app.sign_in(&Credentials::from(args)).await?.ok_or(CliError::NotSignedIn)?;
            print_json(&user)
        }
        Command::Logout => {
            app.sign_out()?;
            Ok(())
        }
        Command::Me => {
            let user = app.current_user().await?.ok_or(CliError::NotSignedIn)?;
            print_json(&user)
        }
        Command::Analyze { file, model } => {
            let upload = read_upload(&file, model).await?;
            let analysis = app.analyze(upload).await?;
            print_json(&analysis)
        }
        Command::History { page, page_size } => {
            let page = app.history(HistoryQuery::new(page, page_size)).await?;
            print_json(&page)
        }
        Command::Detail { photo_id } => {
            let detail = app.photo_detail(photo_id).await?;
            print_json(&detail)
        }
        Command::Delete { photo_id } => {
            app.delete_photo(photo_id).await?;
            Ok(())
        }
        Command::Route { path } => {
            let nav = app.router().navigate(&path);
            print_json(&serde_json::json!({
                "requested": path,
                "path": nav.path,
                "redirected": nav.redirected,
                "route": nav.route.map(|matched| format!("{:?}", matched.name)),
            }))
        }
    }
}

async fn run_ping(config: &ClientConfig) -> Result<(), CliError> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    let url = format!("{}/health", config.base_url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn read_upload(path: &Path, model: Option<AiModel>) -> Result<PhotoUpload, CliError> {
    let mime_type = image_mime_type(path).ok_or_else(|| CliError::UnsupportedImage(path.to_path_buf()))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadFile { path: path.to_path_buf(), source })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
    Ok(PhotoUpload { file_name, mime_type: mime_type.to_owned(), bytes, model })
}

fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
