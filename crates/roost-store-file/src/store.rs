//! [`FileSelectionStore`]: the JSON-file implementation of [`SelectionStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::Arc,
};

use roost_core::{
  review::ReviewId,
  selection::{SelectionSet, SelectionStore},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{Error, Result};

// ─── Mode ────────────────────────────────────────────────────────────────────

/// Where toggles are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
  /// Every read loads the file; every toggle rewrites it.
  #[default]
  Durable,
  /// The file is read once, at open, as a seed. Toggles live in memory only
  /// and are lost when the process exits.
  Ephemeral,
}

// ─── Store ───────────────────────────────────────────────────────────────────

enum Backing {
  Durable {
    path:  PathBuf,
    /// Serialises read-modify-write cycles on the file.
    write: Mutex<()>,
  },
  Ephemeral(Mutex<SelectionSet>),
}

/// A selection store backed by a JSON file (or an in-memory copy of one).
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct FileSelectionStore {
  backing: Arc<Backing>,
}

impl FileSelectionStore {
  /// Open a store over `path` in the given mode.
  ///
  /// Never fails: a missing or unreadable file means nothing is selected.
  pub async fn open(path: impl Into<PathBuf>, mode: SelectionMode) -> Self {
    let path = path.into();
    let backing = match mode {
      SelectionMode::Durable => Backing::Durable {
        path,
        write: Mutex::new(()),
      },
      SelectionMode::Ephemeral => {
        let seed = read_or_empty(&path).await;
        tracing::warn!(
          path = %path.display(),
          seeded = seed.len(),
          "selection store is in-memory; toggles will be lost on restart"
        );
        Backing::Ephemeral(Mutex::new(seed))
      }
    };
    Self { backing: Arc::new(backing) }
  }

  /// An ephemeral store seeded with `seed`, never touching the filesystem.
  pub fn in_memory(seed: SelectionSet) -> Self {
    Self {
      backing: Arc::new(Backing::Ephemeral(Mutex::new(seed))),
    }
  }

  pub fn mode(&self) -> SelectionMode {
    match *self.backing {
      Backing::Durable { .. } => SelectionMode::Durable,
      Backing::Ephemeral(_) => SelectionMode::Ephemeral,
    }
  }
}

impl SelectionStore for FileSelectionStore {
  type Error = Error;

  async fn selected_ids(&self) -> SelectionSet {
    match &*self.backing {
      Backing::Durable { path, .. } => read_or_empty(path).await,
      Backing::Ephemeral(set) => set.lock().await.clone(),
    }
  }

  async fn toggle(&self, review_id: ReviewId) -> Result<bool> {
    match &*self.backing {
      Backing::Durable { path, write } => {
        let _guard = write.lock().await;
        let mut set = read_for_update(path).await?;
        let selected = set.toggle(review_id);
        persist(path, &set).await?;
        Ok(selected)
      }
      Backing::Ephemeral(set) => Ok(set.lock().await.toggle(review_id)),
    }
  }
}

// ─── File access ─────────────────────────────────────────────────────────────

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Error {
  let path = path.to_path_buf();
  move |source| Error::Io { action, path, source }
}

async fn read(path: &Path) -> Result<SelectionSet> {
  let raw = tokio::fs::read(path).await.map_err(io_error("read", path))?;
  Ok(serde_json::from_slice(&raw)?)
}

/// Read the selection file, treating any failure as "nothing selected".
async fn read_or_empty(path: &Path) -> SelectionSet {
  match read(path).await {
    Ok(set) => set,
    Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
      tracing::debug!(path = %path.display(), "no selection file yet");
      SelectionSet::new()
    }
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "unreadable selection file, treating as empty");
      SelectionSet::new()
    }
  }
}

/// Read the selection file ahead of a rewrite. A missing or corrupt file
/// starts from empty; any other failure aborts so the file is left as is.
async fn read_for_update(path: &Path) -> Result<SelectionSet> {
  match read(path).await {
    Ok(set) => Ok(set),
    Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
      Ok(SelectionSet::new())
    }
    Err(Error::Json(e)) => {
      tracing::warn!(path = %path.display(), error = %e, "corrupt selection file, starting from empty");
      Ok(SelectionSet::new())
    }
    Err(e) => Err(e),
  }
}

/// Write `set` next to `path` and rename it into place.
async fn persist(path: &Path, set: &SelectionSet) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .map_err(io_error("create directory", parent))?;
  }

  let mut body = serde_json::to_vec_pretty(set)?;
  body.push(b'\n');

  let tmp = path.with_extension("json.tmp");
  tokio::fs::write(&tmp, body)
    .await
    .map_err(io_error("write", &tmp))?;
  tokio::fs::rename(&tmp, path)
    .await
    .map_err(io_error("replace", path))?;
  Ok(())
}
