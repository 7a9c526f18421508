use exn::ResultExt;
use folio_config::{Config, ConflictPolicy as ConfigConflictPolicy};
use folio_library::{ConflictPolicy, ExportEvent, Exporter, ids_backend, output_backend, save_ids};
use futures::TryStreamExt;
use std::path::{Path, PathBuf, absolute};
use std::pin::pin;
use tracing::instrument;

use super::read_library;
use crate::error::{ErrorKind, Result};

/// Reads the export, writes every note to the output directory, then the
/// list of book IDs.
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.export.output.display(), dry_run = dry_run))]
pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    let library = read_library(&config.input)?;

    let exporter = Exporter::new(&config.export.book_template, &config.export.author_template)
        .or_raise(|| ErrorKind::Export)?
        .with_extension(&config.export.extension)
        .with_conflicts(conflict_policy(config.export.conflicts))
        .with_concurrency(config.export.concurrency);
    let output = output_backend(&resolve(&config.export.output)?, dry_run).or_raise(|| ErrorKind::Export)?;
    let (ids, ids_key) = ids_backend(&resolve(&config.export.ids)?, dry_run).or_raise(|| ErrorKind::Export)?;

    let mut events = pin!(exporter.export(&library, &output));
    let mut written = 0_u64;
    let mut stale = 0_u64;
    while let Some(event) = events.try_next().await.or_raise(|| ErrorKind::Export)? {
        match event {
            ExportEvent::Started => tracing::debug!("Export started"),
            ExportEvent::Planned(notes) => tracing::debug!(notes, "Export planned"),
            ExportEvent::Written(_) => written += 1,
            ExportEvent::Stale(file) => {
                stale += 1;
                tracing::info!(path = %file.path.display(), bytes = file.size, modified = %file.modified, "Note no longer in the export");
            },
            ExportEvent::Complete => tracing::info!(
                notes = written,
                stale,
                books = library.books().len(),
                authors = library.authors().len(),
                "Notes written"
            ),
        }
    }

    let added = save_ids(&library, &ids, &ids_key).await.or_raise(|| ErrorKind::Export)?;
    if !added.is_empty() {
        tracing::info!(count = added.len(), "New books since the last export");
    }
    Ok(())
}

/// Storage backends are rooted at absolute paths.
fn resolve(path: &Path) -> Result<PathBuf> {
    absolute(path).or_raise(|| ErrorKind::Input(path.to_path_buf()))
}

fn conflict_policy(policy: ConfigConflictPolicy) -> ConflictPolicy {
    match policy {
        ConfigConflictPolicy::Fail => ConflictPolicy::Fail,
        ConfigConflictPolicy::Overwrite => ConflictPolicy::Overwrite,
    }
}
