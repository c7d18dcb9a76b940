//! Single-file copy with length verification.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use tracing::debug;

use filesync_core::SyncError;

/// Options for copy operations.
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Give the destination the source's modification time.
    pub preserve_timestamps: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            preserve_timestamps: true,
        }
    }
}

/// Copy the full content of `source` to `dest`, creating or overwriting it.
///
/// Returns the number of bytes written. Fails if fewer bytes were written than
/// the source held when the copy started.
pub fn copy_file(source: &Path, dest: &Path, options: CopyOptions) -> Result<u64, SyncError> {
    let metadata = fs::metadata(source)
        .map_err(|e| SyncError::copy(source, dest, format!("Failed to read metadata: {e}")))?;
    let expected = metadata.len();

    let written = fs::copy(source, dest)
        .map_err(|e| SyncError::copy(source, dest, format!("Failed to copy: {e}")))?;

    if written < expected {
        return Err(SyncError::copy(
            source,
            dest,
            format!("Short write: {written} of {expected} bytes"),
        ));
    }

    if options.preserve_timestamps {
        let mtime = FileTime::from_last_modification_time(&metadata);
        filetime::set_file_mtime(dest, mtime).map_err(|e| {
            SyncError::copy(source, dest, format!("Failed to set modification time: {e}"))
        })?;
    }

    debug!(
        source = %source.display(),
        dest = %dest.display(),
        bytes = written,
        "copied file"
    );

    Ok(written)
}
