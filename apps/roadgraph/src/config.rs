//! TOML configuration loading.
//!
//! ```toml
//! tolerance     = 0.5
//! max_speed_kmh = 140
//!
//! [speeds]
//! default_kmh = 50
//!
//! [speeds.classes]
//! A = 140
//! S = 120
//! ```
//!
//! Every key is optional.  Note that a `[speeds.classes]` table replaces the
//! built-in class table as a whole rather than patching it.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use rg_core::GraphConfig;

/// Load `path` if given, otherwise start from the defaults; then apply CLI
/// overrides.
pub fn load(
    path:          Option<&Path>,
    tolerance:     Option<f64>,
    max_speed_kmh: Option<f64>,
) -> Result<GraphConfig> {
    let mut config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            parse(&text).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => GraphConfig::default(),
    };

    if let Some(t) = tolerance {
        config.tolerance = t;
    }
    if let Some(s) = max_speed_kmh {
        config.max_speed_kmh = s;
    }
    config.validate()?;
    if config.heuristic_may_overestimate() {
        warn!(
            "max_speed_kmh ({}) is below the fastest road class ({}); \
             heuristic coordinates may overestimate travel time",
            config.max_speed_kmh,
            config.speeds.fastest_kmh()
        );
    }
    Ok(config)
}

fn parse(text: &str) -> Result<GraphConfig> {
    Ok(toml::from_str(text)?)
}
