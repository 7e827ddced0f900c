//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use nimbus_entity::file::FileRecord;
use nimbus_entity::trash::TrashEntry;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    /// File name
    pub name: String,
    /// Folder
    pub folder: String,
    /// Size
    pub size: String,
    /// Uploaded at
    pub uploaded: String,
    /// File ID
    pub id: String,
}

impl From<&FileRecord> for FileRow {
    fn from(record: &FileRecord) -> Self {
        Self {
            name: record.name.clone(),
            folder: record.folder.clone(),
            size: format_size(record.size_bytes),
            uploaded: record.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
            id: record.id.to_string(),
        }
    }
}

/// Trash display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct TrashRow {
    /// File name
    pub name: String,
    /// Original folder
    pub original_folder: String,
    /// Deleted at
    pub deleted: String,
    /// File ID
    pub id: String,
}

impl From<&TrashEntry> for TrashRow {
    fn from(entry: &TrashEntry) -> Self {
        Self {
            name: entry.file.name.clone(),
            original_folder: entry.original_folder.clone(),
            deleted: entry.deleted_at.format("%Y-%m-%d %H:%M").to_string(),
            id: entry.file.id.to_string(),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Human-readable byte size.
pub fn format_size(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let exp = (((bytes as f64).ln() / 1024f64.ln()) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    if exp == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[exp])
    }
}
