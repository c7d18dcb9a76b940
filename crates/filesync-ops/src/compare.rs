//! Byte-for-byte content comparison.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use filesync_core::SyncError;

/// Check whether two files have different content.
///
/// Files of different length differ without being read. Otherwise both are
/// streamed in `buffer_size` chunks until a mismatch or the end. A zero
/// `buffer_size` is rejected as invalid configuration.
pub fn files_differ(source: &Path, destination: &Path, buffer_size: usize) -> Result<bool, SyncError> {
    if buffer_size == 0 {
        return Err(SyncError::InvalidConfig {
            message: "buffer size must be greater than zero".to_string(),
        });
    }

    let fail = |e: io::Error| SyncError::compare(source, destination, e);

    let mut a = File::open(source).map_err(fail)?;
    let mut b = File::open(destination).map_err(fail)?;

    let len_a = a.metadata().map_err(fail)?.len();
    let len_b = b.metadata().map_err(fail)?.len();
    if len_a != len_b {
        debug!(source = %source.display(), len_a, len_b, "sizes differ");
        return Ok(true);
    }

    let mut buf_a = vec![0u8; buffer_size];
    let mut buf_b = vec![0u8; buffer_size];

    loop {
        let n_a = read_chunk(&mut a, &mut buf_a).map_err(fail)?;
        let n_b = read_chunk(&mut b, &mut buf_b).map_err(fail)?;

        if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
            return Ok(true);
        }
        if n_a == 0 {
            return Ok(false);
        }
    }
}

/// Fill `buf` as far as possible, stopping early only at end of file.
fn read_chunk(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
