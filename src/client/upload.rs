//! Client-side PDF validation for uploads
//!
//! Nothing reaches the network unless it looks like a PDF by both name
//! and content.

use std::path::Path;

use crate::error::{Result, UploadError};

/// MIME type sent with every upload
pub const PDF_MIME: &str = "application/pdf";

/// Leading bytes of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file that passed PDF validation
#[derive(Debug, Clone)]
pub struct PdfUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl PdfUpload {
    /// Validate in-memory content under the given file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();

        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(UploadError::NotPdf(file_name).into());
        }
        if bytes.is_empty() {
            return Err(UploadError::Empty(file_name).into());
        }
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(UploadError::NotPdf(file_name).into());
        }

        Ok(Self { file_name, bytes })
    }

    /// Read and validate a file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // Reject by name before touching the file contents
        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(UploadError::NotPdf(file_name).into());
        }

        let bytes = std::fs::read(path)?;
        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Multipart form with the file under field `file`
    pub fn to_form(&self) -> Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(PDF_MIME)
            .map_err(crate::error::ApiError::from)?;
        Ok(reqwest::multipart::Form::new().part("file", part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    const MINIMAL_PDF: &[u8] = b"%PDF-1.4\n%%EOF\n";

    #[test]
    fn test_accepts_pdf() {
        let upload = PdfUpload::new("contract.pdf", MINIMAL_PDF.to_vec()).unwrap();
        assert_eq!(upload.file_name(), "contract.pdf");
        assert_eq!(upload.size_bytes(), MINIMAL_PDF.len());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(PdfUpload::new("SCAN.PDF", MINIMAL_PDF.to_vec()).is_ok());
    }

    #[test]
    fn test_rejects_other_extensions() {
        let result = PdfUpload::new("notes.txt", MINIMAL_PDF.to_vec());
        assert!(matches!(result, Err(Error::Upload(UploadError::NotPdf(_)))));
    }

    #[test]
    fn test_rejects_renamed_non_pdf() {
        let result = PdfUpload::new("image.pdf", b"\x89PNG\r\n".to_vec());
        assert!(matches!(result, Err(Error::Upload(UploadError::NotPdf(_)))));
    }

    #[test]
    fn test_rejects_empty_file() {
        let result = PdfUpload::new("empty.pdf", Vec::new());
        assert!(matches!(result, Err(Error::Upload(UploadError::Empty(_)))));
    }

    #[test]
    fn test_from_path_reads_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("signed.pdf");
        std::fs::write(&path, MINIMAL_PDF).unwrap();

        let upload = PdfUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name(), "signed.pdf");
    }

    #[test]
    fn test_from_path_rejects_by_name_without_reading() {
        // file does not exist; the name check must fail first
        let result = PdfUpload::from_path(Path::new("/nonexistent/readme.md"));
        assert!(matches!(result, Err(Error::Upload(UploadError::NotPdf(_)))));
    }
}
