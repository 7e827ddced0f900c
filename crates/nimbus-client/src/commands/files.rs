//! File commands: ls, upload, download.

use std::path::PathBuf;

use clap::Args;

use nimbus_core::error::AppError;

use super::ClientContext;
use crate::output::{self, FileRow, OutputFormat, print_success};

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Show only this folder
    #[arg(short = 'F', long)]
    pub folder: Option<String>,

    /// Filter file names by a search term
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path of the file to upload
    pub path: PathBuf,

    /// Folder label to upload into
    #[arg(short = 'F', long, default_value = "root")]
    pub folder: String,
}

/// Arguments for `download`
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// File name or id
    pub file: String,

    /// Destination path (defaults to the file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// List files for the chosen view.
pub async fn ls(ctx: &ClientContext, args: &LsArgs, format: OutputFormat) -> Result<(), AppError> {
    let api = ctx.api();
    let mut store = ctx.synced_store(&api).await?;

    if let Some(folder) = &args.folder {
        store.open_folder(folder);
    }
    if let Some(term) = &args.search {
        store.set_search(term);
    }

    if args.folder.is_none() && format == OutputFormat::Table {
        let folders = store.folders();
        if !folders.is_empty() {
            println!("Folders: {}", folders.join(", "));
        }
    }

    let rows: Vec<FileRow> = store.visible_files().into_iter().map(FileRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Upload a local file.
pub async fn upload(
    ctx: &ClientContext,
    args: &UploadArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file_name = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation("Invalid file path"))?
        .to_string();

    let data = tokio::fs::read(&args.path).await.map_err(|e| {
        AppError::storage(format!("Failed to read {}: {e}", args.path.display()))
    })?;

    let mime_type = mime_guess::from_path(&args.path)
        .first()
        .map(|m| m.to_string());

    let record = ctx
        .api()
        .upload(&args.folder, &file_name, mime_type.as_deref(), data)
        .await?;

    match format {
        OutputFormat::Table => print_success(&format!(
            "Uploaded {} to {} ({})",
            record.name,
            record.folder,
            output::format_size(record.size_bytes)
        )),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}

/// Download a file to disk.
pub async fn download(ctx: &ClientContext, args: &DownloadArgs) -> Result<(), AppError> {
    let api = ctx.api();
    let store = ctx.synced_store(&api).await?;
    let record = store.resolve_file(&args.file)?;

    let data = api.download(record.id).await?;

    let dest = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&record.name));
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", dest.display())))?;

    print_success(&format!(
        "Downloaded {} ({})",
        dest.display(),
        output::format_size(data.len() as i64)
    ));
    Ok(())
}
