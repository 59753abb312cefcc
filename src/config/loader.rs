//! Settings loading functionality.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineSettings;

impl EngineSettings {
    /// Loads settings from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file (e.g. `./engine.yaml`)
    ///
    /// # Returns
    ///
    /// The parsed settings, or an error if the file is missing or
    /// contains invalid YAML. Fields absent from the file keep their
    /// compiled-in defaults.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::EngineSettings;
    ///
    /// let settings = EngineSettings::load("./engine.yaml")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|err| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}
