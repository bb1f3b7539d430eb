//! Env-gated diagnostic logging switch.
//!
//! `VELLUM_DIAGNOSTICS` holds a comma-separated list of categories
//! (`css`, `html`, `render`); `all` enables everything. The variable is
//! read once per process.

use std::collections::HashSet;
use std::sync::OnceLock;

static CATEGORIES: OnceLock<HashSet<String>> = OnceLock::new();

/// Whether diagnostic output for `category` is enabled.
pub fn diagnostics_enabled(category: &str) -> bool {
    let set = CATEGORIES.get_or_init(|| {
        std::env::var("VELLUM_DIAGNOSTICS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    });
    set.contains("all") || set.contains(&category.to_ascii_lowercase())
}
