//! Input resolution: validate the resume path and load its bytes.
//!
//! The file is checked before anything else happens so that a missing or
//! foreign file fails with an InputUnreadable error instead of a decoder
//! crash, and before any output is touched. We validate the PDF magic bytes
//! (`%PDF`) here rather than relying on the decoder's error text.

use crate::error::ResumeError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate that `path` exists, is readable, and starts with `%PDF`.
pub fn validate_local(path: &Path) -> Result<(), ResumeError> {
    if !path.exists() {
        return Err(ResumeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = std::fs::File::open(path).map_err(|e| open_error(path, e))?;

    let mut magic = Vec::with_capacity(PDF_MAGIC.len());
    Read::take(&mut file, PDF_MAGIC.len() as u64)
        .read_to_end(&mut magic)
        .map_err(|e| ResumeError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    check_magic(path, &magic)?;

    debug!("Resolved local PDF: {}", path.display());
    Ok(())
}

/// Validate and read the whole input file.
pub async fn read_input(path: &Path) -> Result<Vec<u8>, ResumeError> {
    validate_local(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| open_error(path, e))?;
    check_magic(path, &bytes)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Reject byte streams that do not start with the PDF header.
pub fn check_magic(path: &Path, bytes: &[u8]) -> Result<(), ResumeError> {
    if bytes.len() < PDF_MAGIC.len() || &bytes[..PDF_MAGIC.len()] != PDF_MAGIC {
        return Err(ResumeError::NotAPdf {
            path: path.to_path_buf(),
            magic: bytes.iter().take(PDF_MAGIC.len()).copied().collect(),
        });
    }
    Ok(())
}

fn open_error(path: &Path, e: std::io::Error) -> ResumeError {
    let path: PathBuf = path.to_path_buf();
    match e.kind() {
        std::io::ErrorKind::NotFound => ResumeError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => ResumeError::PermissionDenied { path },
        _ => ResumeError::ReadFailed { path, source: e },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn missing_file_is_file_not_found() {
        let err = validate_local(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, ResumeError::FileNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::InputUnreadable);
    }

    #[test]
    fn wrong_magic_is_not_a_pdf() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello world").unwrap();
        let err = validate_local(tmp.path()).unwrap_err();
        match err {
            ResumeError::NotAPdf { magic, .. } => assert_eq!(magic, b"hell".to_vec()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_file_is_not_a_pdf() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let err = validate_local(tmp.path()).unwrap_err();
        assert!(matches!(err, ResumeError::NotAPdf { .. }));
    }

    #[test]
    fn pdf_header_is_accepted() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n").unwrap();
        assert!(validate_local(tmp.path()).is_ok());
    }

    #[test]
    fn read_input_returns_all_bytes() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%PDF-1.4 body").unwrap();
        let bytes = tokio_test::block_on(read_input(tmp.path())).unwrap();
        assert_eq!(bytes, b"%PDF-1.4 body".to_vec());
    }
}
