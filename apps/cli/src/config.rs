// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converter configuration loaded from environment variables.

/// Log filter used when neither `HBMESH_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter applied by `--quiet`.
pub const QUIET_LOG_FILTER: &str = "warn";

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rotate Z-up models into a Y-up frame (`HBMESH_ROTATE`).
    pub rotate: bool,
    /// `tracing_subscriber` filter directive (`HBMESH_LOG`, then `RUST_LOG`).
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            rotate: lookup("HBMESH_ROTATE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            log_filter: non_blank(lookup("HBMESH_LOG"))
                .or_else(|| non_blank(lookup("RUST_LOG")))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
