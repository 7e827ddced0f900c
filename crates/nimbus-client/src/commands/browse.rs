//! Interactive explorer session.
//!
//! One `browse` run is one explorer session: session-local folders
//! created with `mkdir` live until `quit`, while the trash list is
//! persisted through the shared client state.

use chrono::Utc;
use dialoguer::{Confirm, Input};

use nimbus_client::explorer::{ExplorerStore, ExplorerView};
use nimbus_core::error::AppError;

use super::ClientContext;
use super::auth::prompt_error;
use crate::output::{self, FileRow, OutputFormat, TrashRow, print_success, print_warning};

const HELP: &str = "\
Commands:
  ls                 list the current view
  folders            list folders
  open <folder>      open a folder
  home               back to the folder grid
  trash              open the trash view
  search [term]      set or clear the search term
  select <file>      toggle selection of a file
  selection          show selected files
  mkdir <name>       create a session-local folder
  upload <path> [folder]   upload a file
  rm <file>          move a file to trash
  restore <file>     restore from trash
  purge <file>       permanently delete one trash entry
  empty              empty the trash
  refresh            re-sync from the server
  help               show this help
  quit               leave the session";

/// Run the interactive session.
pub async fn run(ctx: &mut ClientContext, format: OutputFormat) -> Result<(), AppError> {
    let api = ctx.api();
    let mut store = ctx.synced_store(&api).await?;

    println!("Nimbus explorer — type 'help' for commands.");

    loop {
        let prompt = store.breadcrumb().join(" / ");
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(word) => word,
            None => continue,
        };
        let rest: Vec<&str> = words.collect();

        let result = match command {
            "ls" => {
                show_view(&store, format);
                Ok(())
            }
            "folders" => {
                println!("Folders: {}", store.folders().join(", "));
                Ok(())
            }
            "open" => match rest.first() {
                Some(_) => {
                    store.open_folder(&rest.join(" "));
                    show_view(&store, format);
                    Ok(())
                }
                None => Err(AppError::validation("Usage: open <folder>")),
            },
            "home" | "back" => {
                store.go_home();
                show_view(&store, format);
                Ok(())
            }
            "trash" => {
                store.open_trash();
                show_view(&store, format);
                Ok(())
            }
            "search" => {
                store.set_search(&rest.join(" "));
                show_view(&store, format);
                Ok(())
            }
            "select" => select(&mut store, &rest),
            "selection" => {
                println!("{} selected", store.selection().len());
                Ok(())
            }
            "mkdir" => match rest.is_empty() {
                false => store.create_folder(&rest.join(" ")).map(|()| {
                    print_success("Folder created (this session only)");
                }),
                true => Err(AppError::validation("Usage: mkdir <name>")),
            },
            "upload" => upload(ctx, &api, &mut store, &rest).await,
            "rm" => rm(ctx, &api, &mut store, &rest).await,
            "restore" => restore(ctx, &mut store, &rest),
            "purge" => purge(ctx, &mut store, &rest),
            "empty" => empty(ctx, &mut store),
            "refresh" => match api.folder_listing().await {
                Ok(listing) => {
                    store.sync_listing(listing);
                    show_view(&store, format);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            "help" => {
                println!("{HELP}");
                Ok(())
            }
            "quit" | "exit" => break,
            other => Err(AppError::validation(format!(
                "Unknown command '{other}' (try 'help')"
            ))),
        };

        if let Err(e) = result {
            print_warning(&e.message);
        }
    }

    Ok(())
}

fn show_view(store: &ExplorerStore, format: OutputFormat) {
    match store.view() {
        ExplorerView::Trash => {
            let rows: Vec<TrashRow> = store.visible_trash().into_iter().map(TrashRow::from).collect();
            output::print_list(&rows, format);
        }
        ExplorerView::Home => {
            let folders = store.folders();
            if !folders.is_empty() {
                println!("Folders: {}", folders.join(", "));
            }
            let rows: Vec<FileRow> = store.visible_files().into_iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
        ExplorerView::Folder(_) => {
            let rows: Vec<FileRow> = store.visible_files().into_iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
    }
}

fn select(store: &mut ExplorerStore, rest: &[&str]) -> Result<(), AppError> {
    let needle = match rest.is_empty() {
        true => return Err(AppError::validation("Usage: select <file>")),
        false => rest.join(" "),
    };
    let id = store.resolve_file(&needle)?.id;
    store.toggle_select(id);
    Ok(())
}

async fn upload(
    ctx: &ClientContext,
    api: &nimbus_client::api::ApiClient,
    store: &mut ExplorerStore,
    rest: &[&str],
) -> Result<(), AppError> {
    let path = match rest.first() {
        Some(path) => std::path::PathBuf::from(path),
        None => return Err(AppError::validation("Usage: upload <path> [folder]")),
    };

    // Default to the open folder, like dropping a file into the view.
    let folder = match rest.get(1) {
        Some(folder) => (*folder).to_string(),
        None => match store.view() {
            ExplorerView::Folder(name) => name.clone(),
            _ => "root".to_string(),
        },
    };

    let args = super::files::UploadArgs { path, folder };
    super::files::upload(ctx, &args, OutputFormat::Table).await?;

    store.sync_listing(api.folder_listing().await?);
    Ok(())
}

async fn rm(
    ctx: &mut ClientContext,
    api: &nimbus_client::api::ApiClient,
    store: &mut ExplorerStore,
    rest: &[&str],
) -> Result<(), AppError> {
    let needle = match rest.is_empty() {
        true => return Err(AppError::validation("Usage: rm <file>")),
        false => rest.join(" "),
    };

    let id = store.resolve_file(&needle)?.id;
    let entry = store.move_to_trash(id, Utc::now())?;
    ctx.persist_trash(store)?;

    // Local state is already final; a failed server delete only warns.
    if let Err(e) = api.delete_file(id).await {
        print_warning(&format!("Server delete failed: {e}"));
    }

    print_success(&format!("Moved {} to trash", entry.file.name));
    Ok(())
}

fn restore(
    ctx: &mut ClientContext,
    store: &mut ExplorerStore,
    rest: &[&str],
) -> Result<(), AppError> {
    let needle = match rest.is_empty() {
        true => return Err(AppError::validation("Usage: restore <file>")),
        false => rest.join(" "),
    };

    let id = store.resolve_trash(&needle)?.file.id;
    let record = store.restore(id)?;
    ctx.persist_trash(store)?;

    print_success(&format!("Restored {} to {}", record.name, record.folder));
    Ok(())
}

fn purge(
    ctx: &mut ClientContext,
    store: &mut ExplorerStore,
    rest: &[&str],
) -> Result<(), AppError> {
    let needle = match rest.is_empty() {
        true => return Err(AppError::validation("Usage: purge <file>")),
        false => rest.join(" "),
    };

    let entry = store.resolve_trash(&needle)?;
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
    ctx.persist_trash(store)?;
    print_success("File permanently deleted");
    Ok(())
}

fn empty(ctx: &mut ClientContext, store: &mut ExplorerStore) -> Result<(), AppError> {
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
    ctx.persist_trash(store)?;
    print_success(&format!("Trash emptied ({count} items)"));
    Ok(())
}
