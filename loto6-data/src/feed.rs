use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use encoding_rs::SHIFT_JIS;

/// Published draw-history feed, a Shift_JIS CSV.
pub const FEED_URL: &str = "https://loto6.thekyo.jp/data/loto6.csv";

/// Local copy of the last successfully fetched payload, stored as UTF-8.
pub const CACHE_FILE: &str = "loto6_data.csv";

/// Default timeout for the blocking fetch, in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Where the draw table came from on this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOrigin {
    Remote,
    CacheFallback { fetch_error: String },
}

/// A source of the raw draw-history table.
pub trait DrawSource {
    fn fetch(&self) -> Result<String>;
}

/// Blocking HTTP source for the published feed.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl DrawSource for HttpSource {
    fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("request to {} failed", self.url))?
            .error_for_status()
            .context("feed answered with an error status")?;
        let bytes = response.bytes().context("cannot read feed body")?;
        decode_shift_jis(&bytes)
    }
}

/// Strict decode; a malformed payload counts as a failed fetch.
pub fn decode_shift_jis(bytes: &[u8]) -> Result<String> {
    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        bail!("feed payload is not valid Shift_JIS");
    }
    Ok(text.into_owned())
}

pub fn read_cache(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read cache file {}", path.display()))
}

pub fn write_cache(path: &Path, data: &str) -> Result<()> {
    fs::write(path, data).with_context(|| format!("cannot write cache file {}", path.display()))
}

/// Fetch the draw table, remote first.
///
/// A successful fetch refreshes the cache; a failed one falls back to the
/// cached copy and leaves the file untouched. Only when the fetch fails and
/// no cache can be read does this return an error.
pub fn acquire(source: &dyn DrawSource, cache_path: &Path) -> Result<(String, FeedOrigin)> {
    match source.fetch() {
        Ok(data) => {
            if let Err(e) = write_cache(cache_path, &data) {
                log::warn!("fetched data but could not refresh the cache: {:#}", e);
            }
            Ok((data, FeedOrigin::Remote))
        }
        Err(fetch_error) => {
            let fetch_error = format!("{:#}", fetch_error);
            let data = read_cache(cache_path).with_context(|| {
                format!(
                    "remote fetch failed ({}) and no usable local cache",
                    fetch_error
                )
            })?;
            Ok((data, FeedOrigin::CacheFallback { fetch_error }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct StaticSource(String);

    impl DrawSource for StaticSource {
        fn fetch(&self) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct DownSource;

    impl DrawSource for DownSource {
        fn fetch(&self) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    #[test]
    fn test_decode_shift_jis_roundtrip() {
        let (bytes, _, _) = SHIFT_JIS.encode("日付,第1数字\n2024/01/04,7\n");
        let text = decode_shift_jis(&bytes).unwrap();
        assert!(text.starts_with("日付,第1数字"));
    }

    #[test]
    fn test_decode_shift_jis_ascii() {
        assert_eq!(decode_shift_jis(b"1,2,3").unwrap(), "1,2,3");
    }

    #[test]
    fn test_decode_shift_jis_rejects_garbage() {
        assert!(decode_shift_jis(&[0x82, 0xFF, 0xFF]).is_err());
    }

    #[test]
    fn test_acquire_remote_refreshes_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache.csv");

        let source = StaticSource("fresh data".to_string());
        let (data, origin) = acquire(&source, &cache).unwrap();

        assert_eq!(data, "fresh data");
        assert_eq!(origin, FeedOrigin::Remote);
        assert_eq!(fs::read_to_string(&cache).unwrap(), "fresh data");
    }

    #[test]
    fn test_acquire_falls_back_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache.csv");
        fs::write(&cache, "cached data").unwrap();

        let (data, origin) = acquire(&DownSource, &cache).unwrap();

        assert_eq!(data, "cached data");
        match origin {
            FeedOrigin::CacheFallback { fetch_error } => {
                assert!(fetch_error.contains("connection refused"));
            }
            other => panic!("unexpected origin: {:?}", other),
        }
        // fallback must not touch the cache
        assert_eq!(fs::read_to_string(&cache).unwrap(), "cached data");
    }

    #[test]
    fn test_acquire_double_failure() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("missing.csv");

        let err = acquire(&DownSource, &cache).unwrap_err();
        assert!(format!("{:#}", err).contains("no usable local cache"));
    }

    #[test]
    fn test_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache.csv");

        write_cache(&cache, "a,b,c\n").unwrap();
        assert_eq!(read_cache(&cache).unwrap(), "a,b,c\n");
    }
}
