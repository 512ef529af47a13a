use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Glyph for a lit pixel; it should be one column wide.
    pub pixel_glyph: String,
    pub zoom_in: f64,
    pub zoom_out: f64,
    /// Device cells moved per arrow key.
    pub pan_step: f64,
    /// Degrees per rotation key.
    pub rotation_step: f64,
    /// Treat East Asian ambiguous glyphs as two columns wide.
    pub cjk: bool,
    pub headless_rows: usize,
    pub headless_cols: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { pixel_glyph: "\u{25a0}".into(),
               zoom_in: 1.5,
               zoom_out: 0.67,
               pan_step: 1.0,
               rotation_step: 1.0,
               cjk: false,
               headless_rows: 40,
               headless_cols: 120 }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&text).map_err(|e| Error::config(format!("invalid config at {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pixel_glyph.is_empty() {
            return Err(Error::config("pixel_glyph must not be empty"));
        }
        for (name, v) in [("zoom_in", self.zoom_in), ("zoom_out", self.zoom_out)].iter() {
            if !(v.is_finite() && *v > 0.0) {
                return Err(Error::config(format!("{} must be a positive number (given: {})", name, v)));
            }
        }
        if !self.pan_step.is_finite() || !self.rotation_step.is_finite() {
            return Err(Error::config("pan_step and rotation_step must be finite"));
        }
        if self.headless_rows == 0 || self.headless_cols == 0 {
            return Err(Error::config("headless surface needs at least one row and one column"));
        }
        Ok(())
    }
}
