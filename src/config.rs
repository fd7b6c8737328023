use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Starting values for every lesson.
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```
/// use pointer_basics::config::LessonConfig;
///
/// let config = LessonConfig::from_toml_str("[increment]\nday = 1\n")?;
/// assert_eq!(config.increment.day, 1);
/// assert_eq!(config.heap.years, 10);
/// # Ok::<(), pointer_basics::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LessonConfig {
    pub increment: IncrementConfig,
    pub pointer: PointerConfig,
    pub sizes: SizesConfig,
    pub heap: HeapConfig,
    pub color: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncrementConfig {
    pub day: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointerConfig {
    pub day: i32,
    pub update: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizesConfig {
    pub offsets_len: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeapConfig {
    pub month: i32,
    pub holiday: i32,
    pub years: usize,
}

impl Default for LessonConfig {
    fn default() -> Self {
        LessonConfig {
            increment: IncrementConfig::default(),
            pointer: PointerConfig::default(),
            sizes: SizesConfig::default(),
            heap: HeapConfig::default(),
            color: true,
        }
    }
}

impl Default for IncrementConfig {
    fn default() -> Self {
        IncrementConfig { day: 20 }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        PointerConfig { day: 29, update: 30 }
    }
}

impl Default for SizesConfig {
    fn default() -> Self {
        SizesConfig { offsets_len: 4 }
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            month: 11,
            holiday: 6,
            years: 10,
        }
    }
}

impl LessonConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LessonConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.offsets_len == 0 {
            return Err(ConfigError::invalid("sizes.offsets_len", "must be at least 1"));
        }
        if self.heap.years == 0 {
            return Err(ConfigError::invalid("heap.years", "must be at least 1"));
        }
        Ok(())
    }
}
