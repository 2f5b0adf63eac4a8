use std::collections::HashMap;
use std::io;

use async_trait::async_trait;
use tokio::fs;

/// The external input collaborator: resolves an input reference to the
/// document's textual content, or fails with a read error.
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn fetch(&self, input: &str) -> io::Result<String>;
}

/// Reads input references as filesystem paths.
pub struct FsSource;

#[async_trait]
impl InputSource for FsSource {
    async fn fetch(&self, input: &str) -> io::Result<String> {
        fs::read_to_string(input).await
    }
}

/// In-memory documents keyed by input reference. A missing reference fails
/// with `NotFound`, same as a missing file would.
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            documents: documents
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl InputSource for MemorySource {
    async fn fetch(&self, input: &str) -> io::Result<String> {
        self.documents.get(input).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no document {:?}", input))
        })
    }
}
