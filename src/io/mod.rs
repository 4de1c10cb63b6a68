mod http;
mod local;

pub use http::HttpSource;
pub use local::LocalFileSource;

use anyhow::Result;
use async_trait::async_trait;

/// Where the bytes of a screenplay come from
#[async_trait]
pub trait InputSource: Send + Sync {
    /// Read the whole input into memory
    async fn read_all(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, for logs and messages
    fn describe(&self) -> String;
}

/// Pick a source for a command-line argument: `http(s)://` URLs are
/// fetched, everything else is a local path.
pub fn open_source(location: &str) -> Result<Box<dyn InputSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location.to_string())?))
    } else {
        Ok(Box::new(LocalFileSource::new(location)))
    }
}
