use crate::source::DEFAULT_CHUNK_SIZE;

/// Configuration for a [`Reader`](crate::Reader).
///
/// # Examples
///
/// ```rust
/// use yamlreader::{Input, Reader, ReaderOptions};
///
/// let options = ReaderOptions {
///     name: Some("config.yaml".into()),
///     ..Default::default()
/// };
/// let reader = Reader::new(Input::Bytes(b"key: value\n"), options).unwrap();
/// assert_eq!(reader.name(), "config.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Bytes requested from a handle per read.
    ///
    /// In-memory byte blobs are decoded in windows of the same size. Values
    /// below one are treated as one.
    ///
    /// # Default
    ///
    /// `4096`
    pub chunk_size: usize,

    /// Name reported in errors and marks.
    ///
    /// # Default
    ///
    /// `None`, which selects `<unicode string>`, `<buffer>` or `<file>`
    /// depending on the input.
    pub name: Option<String>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            name: None,
        }
    }
}
