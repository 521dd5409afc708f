use serde::{Deserialize, Serialize};

/// Packing configuration.
///
/// The atlas starts at the first source's extent and grows along its shorter
/// axis until it reaches `max_width`/`max_height`; past that point the
/// least-recent placement is evicted to make room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Maximum atlas width in pixels.
    pub max_width: u32,
    /// Maximum atlas height in pixels.
    pub max_height: u32,
    /// Check growth against the matching axis cap. The reference behavior
    /// (off) compares vertical growth against `max_width` and horizontal
    /// growth against `max_height`.
    #[serde(default)]
    pub corrected_growth_caps: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_width: 64,
            max_height: 64,
            corrected_growth_caps: false,
        }
    }
}

impl PackerConfig {
    /// Rejects zero caps.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasBakeError;
        if self.max_width == 0 || self.max_height == 0 {
            return Err(AtlasBakeError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn corrected_growth_caps(mut self, v: bool) -> Self {
        self.cfg.corrected_growth_caps = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
