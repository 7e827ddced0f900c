//! Trash commands: rm, list, restore, purge, empty.

use chrono::Utc;
use dialoguer::Confirm;

use nimbus_core::error::AppError;

use super::ClientContext;
use super::auth::prompt_error;
use crate::output::{self, OutputFormat, TrashRow, print_success, print_warning};

/// Move a file to trash.
///
/// The local mutation (file list + persisted trash) happens first; the
/// server delete follows, and a failure there only warns. The views can
/// therefore diverge silently; inherited behavior, deliberately kept.
pub async fn rm(ctx: &mut ClientContext, file: &str) -> Result<(), AppError> {
    let api = ctx.api();
    let mut store = ctx.synced_store(&api).await?;

    let id = store.resolve_file(file)?.id;
    let entry = store.move_to_trash(id, Utc::now())?;
    ctx.persist_trash(&store)?;

    if let Err(e) = api.delete_file(id).await {
        print_warning(&format!("Server delete failed: {e}"));
    }

    print_success(&format!("Moved {} to trash", entry.file.name));
    Ok(())
}

/// List the trash.
pub fn list(ctx: &ClientContext, format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<TrashRow> = ctx.state.trash.iter().map(TrashRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Restore a trashed file into the local file list.
pub async fn restore(ctx: &mut ClientContext, file: &str) -> Result<(), AppError> {
    let api = ctx.api();
    let mut store = ctx.synced_store(&api).await?;

    let id = store.resolve_trash(file)?.file.id;
    let record = store.restore(id)?;
    ctx.persist_trash(&store)?;

    print_success(&format!(
        "Restored {} to {}",
        record.name, record.folder
    ));
    print_warning("Restored files exist locally only and disappear on the next sync.");
    Ok(())
}

/// Permanently delete one trash entry. Asks for confirmation.
pub fn purge(ctx: &mut ClientContext, file: &str) -> Result<(), AppError> {
    let mut store = nimbus_client::explorer::ExplorerStore::new(ctx.state.trash.clone());
    let entry = store.resolve_trash(file)?;
    let (id, name) = (entry.file.id, entry.file.name.clone());

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Permanently delete \"{name}\"? This action cannot be undone."
        ))
        .default(false)
        .interact()
        .map_err(prompt_error)?;
    if !confirmed {
        return Ok(());
    }

    store.purge(id)?;
    ctx.persist_trash(&store)?;

    print_success("File permanently deleted");
    Ok(())
}

/// Permanently delete every trash entry. Asks for confirmation.
pub fn empty(ctx: &mut ClientContext) -> Result<(), AppError> {
    let mut store = nimbus_client::explorer::ExplorerStore::new(ctx.state.trash.clone());

    if store.trash().is_empty() {
        print_warning("Trash is already empty");
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Permanently delete all {} items from trash? This action cannot be undone.",
            store.trash().len()
        ))
        .default(false)
        .interact()
        .map_err(prompt_error)?;
    if !confirmed {
        return Ok(());
    }

    let count = store.empty_trash();
    ctx.persist_trash(&store)?;

    print_success(&format!("Trash emptied ({count} items)"));
    Ok(())
}
