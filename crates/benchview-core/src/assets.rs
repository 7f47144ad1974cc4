//! Static assets shipped with every report
//!
//! Assets are embedded at build time and written to `<output>/static/`.
//! Any previous copy is removed first, so stale files never survive a run.

use rust_embed::Embed;
use std::path::Path;
use tracing::debug;

use crate::error::{ReportError, ReportResult};

#[derive(Embed)]
#[folder = "static/"]
struct Assets;

/// Replace `dest` with a fresh copy of the embedded assets; returns the number of files written
pub fn install(dest: &Path) -> ReportResult<usize> {
    if dest.exists() {
        std::fs::remove_dir_all(dest).map_err(|e| ReportError::output_write(dest, e))?;
    }
    std::fs::create_dir_all(dest).map_err(|e| ReportError::output_write(dest, e))?;

    let mut written = 0;
    for name in <Assets as Embed>::iter() {
        let Some(file) = <Assets as Embed>::get(&name) else {
            continue;
        };
        let path = dest.join(name.as_ref());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::output_write(parent, e))?;
        }
        std::fs::write(&path, file.data.as_ref()).map_err(|e| ReportError::output_write(&path, e))?;
        debug!("Installed asset {}", path.display());
        written += 1;
    }
    Ok(written)
}
