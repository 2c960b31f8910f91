//! Watchlist and index pool files: JSON objects mapping display name to code.

use crate::error::WatchlistError;
use crate::services::symbols::{full_code, validate_stock_code};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

pub type Watchlist = BTreeMap<String, String>;

pub fn load_watchlist<P: AsRef<Path>>(path: P) -> Result<Watchlist, WatchlistError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| WatchlistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| WatchlistError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Like [`load_watchlist`], but a missing file is an empty list.
pub fn load_watchlist_or_empty<P: AsRef<Path>>(path: P) -> Result<Watchlist, WatchlistError> {
    if !path.as_ref().exists() {
        return Ok(Watchlist::new());
    }
    load_watchlist(path)
}

pub fn save_watchlist<P: AsRef<Path>>(path: P, watchlist: &Watchlist) -> Result<(), WatchlistError> {
    let path = path.as_ref();
    let io_err = |source| WatchlistError::Io {
        path: path.display().to_string(),
        source,
    };
    let content = serde_json::to_string_pretty(watchlist).map_err(|source| WatchlistError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)
}

/// Add (or rename) an entry, normalising the code to its prefixed form.
/// Returns the stored code.
pub fn add_to_watchlist<P: AsRef<Path>>(
    path: P,
    name: &str,
    code: &str,
) -> Result<String, WatchlistError> {
    if !validate_stock_code(code) {
        return Err(WatchlistError::InvalidCode(code.to_string()));
    }
    let code = full_code(&code.to_ascii_lowercase());

    let path = path.as_ref();
    let mut watchlist = load_watchlist_or_empty(path)?;
    watchlist.retain(|_, existing| existing != &code);
    watchlist.insert(name.to_string(), code.clone());
    save_watchlist(path, &watchlist)?;

    info!(display_name = %name, code = %code, "Watchlist: added {} ({})", name, code);
    Ok(code)
}
