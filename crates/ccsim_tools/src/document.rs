//! Setup files and their text form.
//!
//! Binary setup files are read and written through the core loader with
//! the Latin-1 character set. The text form is a [`SetupDocument`] in RON
//! or JSON.
//!
//! # Example RON
//!
//! ```ron
//! SetupDocument(
//!     ships: [
//!         (object: (id: 10, name: "Ares", friendly_code: "abc", owner: 1, ...), crew: 180, ...),
//!     ],
//!     planet: None,
//! )
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use ccsim_core::charset::Latin1Charset;
use ccsim_core::loader::Loader;
use ccsim_core::planet::Planet;
use ccsim_core::setup::Setup;
use ccsim_core::ship::Ship;
use ccsim_core::translator::NullTranslator;

use crate::error::{Result, ToolError};

/// Text form of a setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupDocument {
    /// Ships in slot order.
    #[serde(default)]
    pub ships: Vec<Ship>,
    /// The planet, if any.
    #[serde(default)]
    pub planet: Option<Planet>,
}

impl SetupDocument {
    /// Copy the units of a setup.
    #[must_use]
    pub fn from_setup(setup: &Setup) -> Self {
        Self {
            ships: setup.ships().to_vec(),
            planet: setup.planet().cloned(),
        }
    }

    /// Build a setup holding these units.
    #[must_use]
    pub fn into_setup(self) -> Setup {
        let mut setup = Setup::new();
        for ship in self.ships {
            *setup.add_ship() = ship;
        }
        if let Some(planet) = self.planet {
            *setup.add_planet() = planet;
        }
        setup
    }

    /// Parse RON text.
    pub fn from_ron_str(text: &str, path: &str) -> Result<Self> {
        ron::from_str(text).map_err(|source| ToolError::Ron {
            path: path.to_string(),
            source,
        })
    }

    /// Render as pretty RON.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ToolError::Serialize(e.to_string()))
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ToolError::Serialize(e.to_string()))
    }
}

/// Read a binary setup file. Returns the setup and the file version.
pub fn read_setup_file(path: &Path) -> Result<(Setup, u8)> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| ToolError::io(&name, e))?;
    let mut reader = BufReader::new(file);
    let mut setup = Setup::new();
    let version = Loader::new(&Latin1Charset, &NullTranslator)
        .with_file_name(&name)
        .load(&mut reader, &mut setup)?;
    tracing::info!(file = %name, version, units = setup.num_objects(), "Read setup");
    Ok((setup, version))
}

/// Write a binary setup file.
///
/// Without an explicit `version`, the lowest version that stores the setup
/// completely is used. Returns the version written.
pub fn write_setup_file(path: &Path, setup: &Setup, version: Option<u8>) -> Result<u8> {
    let name = path.display().to_string();
    let loader = Loader::new(&Latin1Charset, &NullTranslator).with_file_name(&name);
    let mut bytes = Vec::new();
    let version = match version {
        Some(version) => {
            loader.save_version(&mut bytes, setup, version)?;
            version
        }
        None => loader.save(&mut bytes, setup)?,
    };

    let file = File::create(path).map_err(|e| ToolError::io(&name, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| ToolError::io(&name, e))?;
    tracing::info!(file = %name, version, units = setup.num_objects(), "Wrote setup");
    Ok(version)
}

/// Read a text file.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ToolError::io(path.display().to_string(), e))
}
