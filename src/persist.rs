use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::warn;

/// Output files written beside their destinations and moved into place together.
///
/// Dropping the set before `commit` removes every temp file staged so far.
#[derive(Debug, Default)]
pub struct StagedFiles {
    pending: Vec<(PathBuf, PathBuf)>,
}

impl StagedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a temp path for `dest`, creating its parent directory.
    pub fn stage(&mut self, dest: &Path) -> Result<PathBuf> {
        if dest.is_dir() {
            bail!("output path {} is a directory", dest.display());
        }
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
        let tmp = staging_path(dest);
        self.pending.push((tmp.clone(), dest.to_path_buf()));
        Ok(tmp)
    }

    /// Move every staged file onto its destination.
    pub fn commit(mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        for (idx, (tmp, dest)) in pending.iter().enumerate() {
            if let Err(e) = fs::rename(tmp, dest) {
                discard(&pending[idx..]);
                return Err(e).with_context(|| format!("move {} into place", dest.display()));
            }
        }
        Ok(())
    }
}

impl Drop for StagedFiles {
    fn drop(&mut self) {
        discard(&self.pending);
    }
}

/// `dest` with `.tmp` appended, so `risk_analysis.csv` stages as `risk_analysis.csv.tmp`.
pub fn staging_path(dest: &Path) -> PathBuf {
    let mut name: OsString = dest.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard(pending: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in pending {
        match fs::remove_file(tmp) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %tmp.display(), error = %e, "could not remove temp file"),
        }
    }
}
