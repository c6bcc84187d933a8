//! Data validation utilities.

use std::path::Path;

use ccsim_core::data::ShipList;

use crate::document::read_text;
use crate::error::{Result, ToolError};

/// Load and validate a ship list file.
///
/// Each problem is logged; the returned list is the ship list if it is
/// consistent.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it fails
/// validation.
pub fn validate_ship_list(path: &Path) -> Result<ShipList> {
    let name = path.display().to_string();
    let list = ShipList::from_ron_str(&read_text(path)?, &name)?;
    let errors = list.validate();
    for error in &errors {
        tracing::error!(file = %name, "{error}");
    }
    if errors.is_empty() {
        tracing::info!(
            file = %name,
            hulls = list.hulls.len(),
            beams = list.beams.len(),
            launchers = list.launchers.len(),
            "Ship list is valid"
        );
        Ok(list)
    } else {
        Err(ToolError::Invalid {
            path: name,
            count: errors.len(),
        })
    }
}
