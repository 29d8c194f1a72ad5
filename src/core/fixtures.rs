//! Recording helpers for persisting upstream bodies as test fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub(crate) fn fixture_dir() -> PathBuf {
    env::var("BELUGA_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Writes `<endpoint>_<key>.<ext>`, replacing characters that are awkward in file names.
pub(crate) fn record_fixture(
    endpoint: &str,
    key: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = fixture_dir();
    fs::create_dir_all(&dir)?;

    let key: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let path = dir.join(format!("{endpoint}_{key}.{ext}"));
    fs::write(&path, body)?;

    debug!(path = %path.display(), "recorded fixture");
    Ok(())
}
