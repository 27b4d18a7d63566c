use std::path::{Path, PathBuf};

use anyhow::Context;
use mcdo_core::ImportFile;
use mcdo_store::FileKvStore;
use mcdo_tracker::{StartupReport, StoreActions, Tracker};

use crate::terminal::{mime_for_path, Camera, TerminalUi};

pub(crate) type Session = Tracker<FileKvStore, TerminalUi>;

/// Print catalog and visit counts.
pub(crate) fn run_status(tracker: &Session, report: &StartupReport) {
    if report.catalog_loaded {
        println!("stores loaded: {}", report.store_count);
    } else {
        println!("stores loaded: 0 (store feed unavailable)");
    }
    println!("visited:       {}", tracker.visited_count());
    let removed = report.reconciliation.removed_count();
    if removed > 0 {
        println!("pruned:        {removed} closed store(s)");
    }
}

/// Print the rows the list presentation rendered.
pub(crate) fn run_list(tracker: &Session) {
    let rows = &tracker.ui().rows;
    if rows.is_empty() {
        println!("no stores match");
        return;
    }

    let header = format!("{:<10}{:<9}{:<36}ADDRESS", "ID", "VISITED", "NAME");
    println!("{header}");
    for row in rows {
        println!(
            "{:<10}{:<9}{:<36}{}",
            row.store_id,
            if row.visited { "yes" } else { "no" },
            truncate(&row.name, 34),
            row.address
        );
    }
    println!();
    println!("{} store(s), {} visited", rows.len(), tracker.visited_count());
}

/// Print the markers the map presentation placed, plus camera and popup.
pub(crate) fn run_map(tracker: &mut Session, focus: Option<&str>) {
    if let Some(id) = focus {
        tracker.show_on_map(id);
    }

    let ui = tracker.ui();
    if ui.markers.is_empty() {
        println!("no markers on the map");
    } else {
        let header = format!("{:<10}{:<7}{:>10}{:>11}  NAME", "ID", "COLOR", "LAT", "LNG");
        println!("{header}");
        for marker in &ui.markers {
            println!(
                "{:<10}{:<7}{:>10.5}{:>11.5}  {}",
                marker.store_id,
                format!("{:?}", marker.color).to_lowercase(),
                marker.position.lat,
                marker.position.lng,
                marker.popup.title
            );
        }
    }

    println!();
    match ui.camera {
        Some(Camera::At { center, zoom }) => println!("view: {center} at zoom {zoom}"),
        Some(Camera::Fitted(bounds)) => {
            println!("view: fitted to {} .. {}", bounds.south_west, bounds.north_east);
        }
        None => println!("view: unchanged"),
    }

    let popup = ui
        .open_popup
        .as_deref()
        .and_then(|id| ui.markers.iter().find(|m| m.store_id == id));
    if let Some(marker) = popup {
        println!();
        println!("{}", marker.popup.title);
        if let Some(address) = &marker.popup.address {
            println!("{address}");
        }
        println!("{}", marker.popup.status);
        println!("[{}]", marker.popup.action.label());
    }
}

/// Mark a catalog store visited.
///
/// # Errors
///
/// Returns an error if `id` is not in the loaded catalog or the visited set
/// cannot be saved.
pub(crate) fn run_visit(tracker: &mut Session, id: &str) -> anyhow::Result<()> {
    let name = tracker
        .store(id)
        .map(|s| s.name.clone())
        .ok_or_else(|| anyhow::anyhow!("store '{id}' not found in the catalog"))?;

    if tracker.is_visited(id) {
        println!("{name} is already marked visited");
        return Ok(());
    }
    tracker.mark_visited(id)?;
    println!(
        "marked {name} visited ({} visited)",
        tracker.visited_count()
    );
    Ok(())
}

/// Undo a visit. Works for ids no longer in the catalog too.
///
/// # Errors
///
/// Returns an error if the visited set cannot be saved.
pub(crate) fn run_unvisit(tracker: &mut Session, id: &str) -> anyhow::Result<()> {
    if !tracker.is_visited(id) {
        println!("store '{id}' is not marked visited");
        return Ok(());
    }
    tracker.mark_unvisited(id)?;
    println!(
        "removed visit for '{id}' ({} visited)",
        tracker.visited_count()
    );
    Ok(())
}

/// # Errors
///
/// Returns an error if the cleared set cannot be saved.
pub(crate) fn run_erase(tracker: &mut Session) -> anyhow::Result<()> {
    if !tracker.erase_all()? {
        println!("erase cancelled");
    }
    Ok(())
}

/// Write today's export into `dir` and return the file's path.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub(crate) fn run_export(tracker: &Session, dir: &Path) -> anyhow::Result<PathBuf> {
    let file = tracker.export_today()?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(&file.file_name);
    std::fs::write(&path, &file.contents)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), count = tracker.visited_count(), "exported visited stores");
    println!(
        "exported {} visited store(s) to {}",
        tracker.visited_count(),
        path.display()
    );
    Ok(path)
}

/// Merge visited ids from the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is rejected, or the merged
/// set cannot be saved.
pub(crate) fn run_import(
    tracker: &mut Session,
    path: &Path,
    mime: Option<&str>,
) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file = ImportFile {
        name: path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
        mime_type: mime.unwrap_or_else(|| mime_for_path(path)).to_owned(),
        contents,
    };

    if tracker.import(&file)?.is_none() {
        anyhow::bail!("import of {} was rejected", path.display());
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_owned()
    }
}
