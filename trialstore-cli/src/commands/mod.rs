//! CLI command implementations.

pub mod fields;
pub mod project;
pub mod roster;

pub use fields::list_fields;
pub use project::{project_samples, ProjectOptions};
pub use roster::show_roster;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use trialstore_types::TrialParams;

/// Read trial parameters from a YAML file
pub(crate) fn load_params(path: &Path) -> Result<TrialParams> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trial params {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse trial params {}", path.display()))
}
