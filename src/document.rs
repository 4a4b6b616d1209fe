use std::io::Write;
use std::path::Path;

use crate::error::Error;

/// A fully rendered claim form. The bytes are complete before this value
/// exists; nothing is streamed to disk during rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    bytes: Vec<u8>,
    page_count: usize,
}

impl Document {
    /// File name the artifact is offered under.
    pub const FILE_NAME: &'static str = "insurance_claim_form.pdf";
    pub const MEDIA_TYPE: &'static str = "application/pdf";

    pub(crate) fn new(bytes: Vec<u8>, page_count: usize) -> Self {
        Self { bytes, page_count }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Write the document to `path`. The bytes go to a temporary file in the
    /// same directory which is then renamed over `path`, so a failed write
    /// never leaves a truncated PDF behind.
    pub fn write_to(&self, path: &Path) -> Result<(), Error> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".claimform-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| with_path(e, dir))?;
        tmp.write_all(&self.bytes).map_err(Error::Io)?;
        tmp.as_file().sync_all().map_err(Error::Io)?;
        tmp.persist(path).map_err(|e| with_path(e.error, path))?;

        log::debug!("wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(())
    }
}

fn with_path(e: std::io::Error, path: &Path) -> Error {
    match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    }
}
