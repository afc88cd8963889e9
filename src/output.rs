use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::foundation::error::{NounError, NounResult};

/// Directory the reference run writes into.
pub const DEFAULT_OUT_DIR: &str = "images";

/// File name the reference run writes.
pub const DEFAULT_FILE_NAME: &str = "noun.svg";

/// Write `document` as UTF-8 to `out_dir/file_name`, replacing any previous contents.
///
/// `out_dir` is created when missing (one level only; its parent must exist). Failures are
/// returned as [`NounError::Io`] carrying the underlying `std::io::Error`.
#[tracing::instrument(skip(document, out_dir), fields(out_dir = %out_dir.display(), bytes = document.len()))]
pub fn write_output(document: &str, out_dir: &Path, file_name: &str) -> NounResult<PathBuf> {
    validate_file_name(file_name)?;

    if !out_dir.is_dir() {
        match std::fs::create_dir(out_dir) {
            Ok(()) => tracing::debug!("created output directory"),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(NounError::io(
                    format!("create output dir '{}'", out_dir.display()),
                    e,
                ));
            }
        }
    }

    let path = out_dir.join(file_name);
    std::fs::write(&path, document.as_bytes())
        .map_err(|e| NounError::io(format!("write '{}'", path.display()), e))?;
    Ok(path)
}

fn validate_file_name(file_name: &str) -> NounResult<()> {
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return Err(NounError::validation(format!(
            "output file name \"{file_name}\" is not a file name"
        )));
    }
    if file_name.contains(['/', '\\']) {
        return Err(NounError::validation(format!(
            "output file name \"{file_name}\" must not contain path separators"
        )));
    }
    Ok(())
}

/// Standard base64 (with padding) of the document's UTF-8 bytes.
pub fn encode_base64(document: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(document.as_bytes())
}

pub fn decode_base64(encoded: &str) -> NounResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| NounError::validation(format!("base64: {e}")))
}
