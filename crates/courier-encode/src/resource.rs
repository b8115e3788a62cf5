//! File-like byte sources.
//!
//! A [`Resource`] is a body value backed by bytes that live somewhere else:
//! a memory buffer, a file on disk, or an already-open reader. Resources
//! carry the metadata the multipart composer needs to synthesize upload
//! headers (an optional filename) and the transport needs for framing (an
//! optional known length).

use bytes::Bytes;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::EncodeError;

/// A file-like byte source with optional filename and optional known length.
///
/// Reading is a scoped acquisition: the source is opened, read fully, and
/// closed on every exit path. Reader-backed resources are single-use; their
/// bytes can be consumed only once.
///
/// # Example
///
/// ```rust
/// use courier_encode::Resource;
///
/// let named = Resource::from_bytes(b"PNG_DATA".as_slice()).with_filename("photo.png");
/// assert_eq!(named.filename(), Some("photo.png"));
/// assert_eq!(named.len_hint(), Some(8));
///
/// let anonymous = Resource::from_reader(std::io::empty());
/// assert_eq!(anonymous.filename(), None);
/// assert_eq!(anonymous.len_hint(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Resource {
    source: ResourceSource,
    filename: Option<String>,
}

#[derive(Clone)]
enum ResourceSource {
    Memory(Bytes),
    File(PathBuf),
    Reader(Arc<Mutex<Box<dyn Read + Send>>>),
}

impl fmt::Debug for ResourceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory(bytes) => f.debug_tuple("Memory").field(&bytes.len()).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}

impl Resource {
    /// Creates a resource from an in-memory buffer, with no filename.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self {
            source: ResourceSource::Memory(data.into()),
            filename: None,
        }
    }

    /// Creates a resource backed by a file on disk.
    ///
    /// The filename is derived from the last path segment. The file is not
    /// opened until the resource is read.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Self {
            source: ResourceSource::File(path),
            filename,
        }
    }

    /// Creates a resource backed by an already-open reader.
    ///
    /// Reader-backed resources have no filename and no discoverable length,
    /// and can be read only once.
    #[must_use]
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            source: ResourceSource::Reader(Arc::new(Mutex::new(Box::new(reader)))),
            filename: None,
        }
    }

    /// Sets the filename reported for this resource.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Returns the filename, if this resource has one.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Returns the length in bytes, if discoverable without reading.
    ///
    /// Memory buffers know their length; files report it from metadata;
    /// reader-backed resources return `None`.
    #[must_use]
    pub fn len_hint(&self) -> Option<u64> {
        match &self.source {
            ResourceSource::Memory(bytes) => Some(bytes.len() as u64),
            ResourceSource::File(path) => fs::metadata(path).ok().map(|meta| meta.len()),
            ResourceSource::Reader(_) => None,
        }
    }

    /// Reads the full content of this resource.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ResourceRead`] if the source fails to open or
    /// read. The source is closed on every exit path.
    pub fn read_bytes(&self) -> Result<Bytes, EncodeError> {
        match &self.source {
            ResourceSource::Memory(bytes) => Ok(bytes.clone()),
            ResourceSource::File(path) => fs::read(path)
                .map(Bytes::from)
                .map_err(|e| EncodeError::resource_read(path.display().to_string(), e)),
            ResourceSource::Reader(reader) => {
                let mut guard = reader.lock().map_err(|_| {
                    EncodeError::resource_read(
                        self.describe(),
                        std::io::Error::new(std::io::ErrorKind::Other, "reader lock poisoned"),
                    )
                })?;
                let mut buf = Vec::new();
                guard
                    .read_to_end(&mut buf)
                    .map_err(|e| EncodeError::resource_read(self.describe(), e))?;
                Ok(Bytes::from(buf))
            }
        }
    }

    /// Human-readable description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        if let Some(name) = &self.filename {
            return name.clone();
        }
        match &self.source {
            ResourceSource::Memory(_) => "<in-memory>".to_string(),
            ResourceSource::File(path) => path.display().to_string(),
            ResourceSource::Reader(_) => "<reader>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_memory_resource() {
        let resource = Resource::from_bytes(b"hello".as_slice());

        assert_eq!(resource.filename(), None);
        assert_eq!(resource.len_hint(), Some(5));
        assert_eq!(&resource.read_bytes().unwrap()[..], b"hello");
    }

    #[test]
    fn test_memory_resource_with_filename() {
        let resource = Resource::from_bytes(b"data".as_slice()).with_filename("data");

        assert_eq!(resource.filename(), Some("data"));
        assert_eq!(resource.describe(), "data");
    }

    #[test]
    fn test_reader_resource_has_no_metadata() {
        let resource = Resource::from_reader(Cursor::new(b"streamed".to_vec()));

        assert_eq!(resource.filename(), None);
        assert_eq!(resource.len_hint(), None);
        assert_eq!(&resource.read_bytes().unwrap()[..], b"streamed");
    }

    #[test]
    fn test_reader_resource_is_single_use() {
        let resource = Resource::from_reader(Cursor::new(b"once".to_vec()));

        assert_eq!(&resource.read_bytes().unwrap()[..], b"once");
        // A second read finds the reader exhausted.
        assert_eq!(&resource.read_bytes().unwrap()[..], b"");
    }

    #[test]
    fn test_file_resource_derives_filename() {
        let resource = Resource::from_file("/tmp/upload/data.bin");

        assert_eq!(resource.filename(), Some("data.bin"));
    }

    #[test]
    fn test_missing_file_read_fails() {
        let resource = Resource::from_file("/nonexistent/courier-test-file");

        let err = resource.read_bytes().unwrap_err();
        assert!(matches!(err, EncodeError::ResourceRead { .. }));
        assert_eq!(resource.len_hint(), None);
    }

    #[test]
    fn test_file_resource_reads_disk_contents() {
        let path = std::env::temp_dir().join("courier-encode-resource-test");
        fs::write(&path, b"on disk").unwrap();

        let resource = Resource::from_file(&path);
        assert_eq!(resource.len_hint(), Some(7));
        assert_eq!(&resource.read_bytes().unwrap()[..], b"on disk");

        fs::remove_file(&path).ok();
    }
}
