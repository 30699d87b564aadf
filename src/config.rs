// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Generator settings with defaults and an environment overlay.
//!
//! Nothing is persisted; each launch starts from [`GeneratorConfig::default`]
//! and applies `QRPACK_*` variables when present.

use std::str::FromStr;

use tracing::warn;

/// Default archive filename offered by the save dialog.
pub const DEFAULT_ARCHIVE_NAME: &str = "qrcodes.zip";

/// Host and tracker token for the promo-link URL template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromoTemplate {
    pub host: String,
    pub token: String,
}

impl Default for PromoTemplate {
    fn default() -> Self {
        Self {
            host: "app.adjust.com".into(),
            token: "qrpack".into(),
        }
    }
}

impl PromoTemplate {
    /// Build the promo URL. `code` is inserted verbatim, without escaping.
    pub fn url_for(&self, code: &str) -> String {
        format!(
            "https://{}/addpromocode?adj_t={}&ref=qr&code={}",
            self.host, self.token, code
        )
    }
}

/// Rendering and export settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub promo: PromoTemplate,
    /// Pixels per QR module.
    pub module_scale: u32,
    /// Whether to draw the four-module quiet zone around the symbol.
    pub quiet_zone: bool,
    pub archive_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            promo: PromoTemplate::default(),
            module_scale: 8,
            quiet_zone: true,
            archive_name: DEFAULT_ARCHIVE_NAME.into(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults overlaid with `QRPACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = non_empty(lookup("QRPACK_PROMO_HOST")) {
            config.promo.host = host;
        }
        if let Some(token) = non_empty(lookup("QRPACK_PROMO_TOKEN")) {
            config.promo.token = token;
        }
        if let Some(scale) = parse_var::<u32>("QRPACK_MODULE_SCALE", lookup("QRPACK_MODULE_SCALE"))
        {
            if (1..=64).contains(&scale) {
                config.module_scale = scale;
            } else {
                warn!(scale, "QRPACK_MODULE_SCALE out of range 1..=64, keeping default");
            }
        }
        if let Some(quiet) = parse_var::<bool>("QRPACK_QUIET_ZONE", lookup("QRPACK_QUIET_ZONE")) {
            config.quiet_zone = quiet;
        }
        if let Some(name) = non_empty(lookup("QRPACK_ARCHIVE_NAME")) {
            config.archive_name = name;
        }

        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Option<T> {
    let raw = non_empty(value)?;
    match raw.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}
