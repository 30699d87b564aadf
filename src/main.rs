// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

mod app;
mod config;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = config::GeneratorConfig::from_env();
    info!(
        module_scale = config.module_scale,
        quiet_zone = config.quiet_zone,
        promo_host = %config.promo.host,
        "Starting QR Pack"
    );

    app::run(config)
}
