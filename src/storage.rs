use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, instrument};
use unicode_normalization::UnicodeNormalization;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex"));

const WINDOWS_DEVICE_FILES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduces a client-supplied filename to a flat, ASCII-only name that is safe to join onto the
/// upload directory.
///
/// The name is NFKD-decomposed and whatever is still non-ASCII is dropped, so accented letters keep
/// their base letter. Path separators and whitespace runs collapse to `_`, anything outside
/// `[A-Za-z0-9_.-]` is removed and leading/trailing dots and underscores are trimmed. Windows device
/// names get a `_` prefix when running on Windows. The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let name = stripped.trim_matches(|c| c == '.' || c == '_');

    let stem = name.split('.').next().unwrap_or_default().to_ascii_uppercase();
    if cfg!(windows) && !name.is_empty() && WINDOWS_DEVICE_FILES.contains(&stem.as_str()) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Upload directory holding attachment bytes, keyed by sanitized filename.
///
/// A second upload with the same sanitized name replaces the earlier file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the whole body under `filename`, which must already be sanitized.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn save(&self, filename: &str, data: &[u8]) -> io::Result<PathBuf> {
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to store unsanitized filename {filename:?}"),
            ));
        }

        let path = self.root.join(filename);
        tokio::fs::write(&path, data).await?;
        debug!(path = %path.display(), "stored upload");
        Ok(path)
    }
}
