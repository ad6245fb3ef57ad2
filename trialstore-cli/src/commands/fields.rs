//! Fields command implementation
use anyhow::Result;
use trialstore_types::{SampleField, FIELD_IDENTIFIER_PREFIX};

/// Print every field identifier accepted by `--field`
pub fn list_fields() -> Result<()> {
    for field in SampleField::ALL {
        println!(
            "{:<18} {}{}",
            field.as_str(),
            FIELD_IDENTIFIER_PREFIX,
            field.as_str().to_uppercase()
        );
    }
    Ok(())
}
