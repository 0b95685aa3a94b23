/// Display name resolution and the one-value session store behind it
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Name used when neither storage nor the server URL provides one
pub const DEFAULT_PLAYER_NAME: &str = "Guest";

/// Query parameter that may carry a display name
pub const NAME_QUERY_PARAM: &str = "playerName";

const SESSION_FILE_NAME: &str = "spotlight-player-name";

/// Remembers the display name between runs in a single-line text file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `spotlight-player-name` in the OS temp dir
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(SESSION_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored name, if there is a non-blank one.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => non_blank(contents.lines().next().unwrap_or_default()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read session store");
                None
            }
        }
    }

    pub fn save(&self, name: &str) -> io::Result<()> {
        let name = name.trim();
        debug!(path = %self.path.display(), %name, "saving display name");
        fs::write(&self.path, format!("{name}\n"))
    }
}

/// Stored name first, then the URL parameter, then the placeholder.
///
/// Blank values count as absent.
pub fn resolve_player_name(stored: Option<String>, from_query: Option<String>) -> String {
    stored
        .and_then(|s| non_blank(&s))
        .or_else(|| from_query.and_then(|q| non_blank(&q)))
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string())
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
