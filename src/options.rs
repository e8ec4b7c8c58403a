use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime options, loadable from a YAML file. Every field has a default so
/// an empty or missing file is always valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Frame rate cap for the render loop.
    pub fps: u16,

    /// Multiplier applied to every animation duration.
    pub time_scale: f32,

    /// Rows of virtual scroll added per mouse wheel tick.
    pub wheel_rows: f32,

    /// Rows of virtual scroll added per arrow/j/k key press.
    pub key_rows: f32,

    /// Rows of virtual scroll added per page up/down press.
    pub page_rows: f32,

    /// Interval between scramble re-renders, in milliseconds.
    pub scramble_tick_ms: u64,

    /// Delay before the first character's scramble runs at startup, in
    /// milliseconds.
    pub initial_scramble_delay_ms: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fps: 30,
            time_scale: 1.0,
            wheel_rows: 2.0,
            key_rows: 4.0,
            page_rows: 12.0,
            scramble_tick_ms: 30,
            initial_scramble_delay_ms: 100,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    #[error("failed to read options file '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse options file '{0}': {1}")]
    Parse(PathBuf, #[source] serde_yaml::Error),
}

impl Options {
    /// Load options from an explicit path, or from the user config directory
    /// when no path is given. A missing default-location file means defaults;
    /// an explicitly requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, OptionsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let Some(path) = Self::default_path() else {
                    return Ok(Self::default());
                };
                if path.exists() { Self::from_file(&path) } else { Ok(Self::default()) }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OptionsError::Io(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents).map_err(|e| OptionsError::Parse(path.to_path_buf(), e))
    }

    fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "legendterm")?;
        Some(dirs.config_dir().join("config.yaml"))
    }

    /// Duration of one frame at the configured cap.
    pub fn frame_budget(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.fps, 30);
        assert_eq!(options.scramble_tick_ms, 30);
        assert_eq!(options.initial_scramble_delay_ms, 100);
        assert_eq!(options.time_scale, 1.0);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let options: Options = serde_yaml::from_str("fps: 60\nwheel_rows: 3.5\n").unwrap();
        assert_eq!(options.fps, 60);
        assert_eq!(options.wheel_rows, 3.5);
        assert_eq!(options.scramble_tick_ms, 30);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Options, _> = serde_yaml::from_str("frames_per_second: 60\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_budget() {
        let mut options = Options::default();
        options.fps = 50;
        assert_eq!(options.frame_budget(), std::time::Duration::from_millis(20));
    }
}
