pub mod rates;

use std::ops::Range;

use anyhow::{bail, Result};

/// Index ranges of the three most recent windows of the oldest-first table,
/// newest first: A covers the latest `size` draws, B the `size` before
/// those, C the `size` before B.
pub fn recent_windows(len: usize, size: usize) -> Result<[Range<usize>; 3]> {
    if size == 0 {
        bail!("window size must be at least 1");
    }
    if len / 3 < size {
        bail!(
            "need three windows of {} draws, table has only {}",
            size,
            len
        );
    }
    Ok([
        len - size..len,
        len - 2 * size..len - size,
        len - 3 * size..len - 2 * size,
    ])
}

/// Index range of the `n` most recent draws.
pub fn recent_range(len: usize, n: usize) -> Result<Range<usize>> {
    if n == 0 {
        bail!("recent span must be at least 1");
    }
    if len < n {
        bail!("need at least {} draws, table has {}", n, len);
    }
    Ok(len - n..len)
}
