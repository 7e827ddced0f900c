//! CLI command definitions and dispatch.

pub mod auth;
pub mod browse;
pub mod files;
pub mod trash;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nimbus_client::api::ApiClient;
use nimbus_client::explorer::ExplorerStore;
use nimbus_client::state::{ClientState, default_state_path};
use nimbus_core::error::AppError;

use crate::output::OutputFormat;

/// Nimbus — personal cloud file storage client
#[derive(Debug, Parser)]
#[command(name = "nimbus", version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(short, long, default_value = "http://localhost:8080")]
    pub server: String,

    /// Path to the client state file (token + trash list)
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account
    Register,
    /// Log in and store the bearer token
    Login {
        /// Email address
        email: Option<String>,
    },
    /// Log out and clear the stored token
    Logout,
    /// List files (optionally within one folder)
    Ls(files::LsArgs),
    /// Upload a file
    Upload(files::UploadArgs),
    /// Download a file
    Download(files::DownloadArgs),
    /// Move a file to trash
    Rm {
        /// File name or id
        file: String,
    },
    /// List the trash
    Trash,
    /// Restore a file from trash into the local file list
    Restore {
        /// File name or id
        file: String,
    },
    /// Permanently delete one trash entry
    Purge {
        /// File name or id
        file: String,
    },
    /// Permanently delete everything in the trash
    EmptyTrash,
    /// Interactive file explorer
    Browse,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let mut ctx = ClientContext::load(&self.server, self.state_file.clone())?;

        match &self.command {
            Commands::Register => auth::register(&ctx).await,
            Commands::Login { email } => auth::login(&mut ctx, email.as_deref()).await,
            Commands::Logout => auth::logout(&mut ctx),
            Commands::Ls(args) => files::ls(&ctx, args, self.format).await,
            Commands::Upload(args) => files::upload(&ctx, args, self.format).await,
            Commands::Download(args) => files::download(&ctx, args).await,
            Commands::Rm { file } => trash::rm(&mut ctx, file).await,
            Commands::Trash => trash::list(&ctx, self.format),
            Commands::Restore { file } => trash::restore(&mut ctx, file).await,
            Commands::Purge { file } => trash::purge(&mut ctx, file),
            Commands::EmptyTrash => trash::empty(&mut ctx),
            Commands::Browse => browse::run(&mut ctx, self.format).await,
        }
    }
}

/// Shared command context: server address plus the persisted state.
pub struct ClientContext {
    /// Server base URL.
    pub server: String,
    /// Where the state file lives.
    pub state_path: PathBuf,
    /// Loaded client state.
    pub state: ClientState,
}

impl ClientContext {
    /// Load the persisted state.
    pub fn load(server: &str, state_file: Option<PathBuf>) -> Result<Self, AppError> {
        let state_path = state_file.unwrap_or_else(default_state_path);
        let state = ClientState::load(&state_path)?;
        Ok(Self {
            server: server.to_string(),
            state_path,
            state,
        })
    }

    /// An API client carrying the stored token (if any).
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.server, self.state.token.clone())
    }

    /// Build an explorer store seeded from persisted trash and synced
    /// from the server.
    pub async fn synced_store(&self, api: &ApiClient) -> Result<ExplorerStore, AppError> {
        let mut store = ExplorerStore::new(self.state.trash.clone());
        store.sync_listing(api.folder_listing().await?);
        Ok(store)
    }

    /// Persist the store's trash list back to the state file.
    pub fn persist_trash(&mut self, store: &ExplorerStore) -> Result<(), AppError> {
        self.state.trash = store.trash().to_vec();
        self.state.save(&self.state_path)
    }
}
