use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Imposition configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImpositionOptions {
    /// Source document
    pub source: PathBuf,

    /// Output sheet preset
    #[cfg_attr(feature = "serde", serde(default))]
    pub sheet_size: SheetSize,
}

impl ImpositionOptions {
    pub fn new(source: impl Into<PathBuf>, sheet_size: SheetSize) -> Self {
        Self {
            source: source.into(),
            sheet_size,
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_json(&bytes)
    }

    /// Parse options from JSON.
    ///
    /// The sheet size is matched by name, so an unknown preset fails with
    /// [`ImposeError::UnsupportedLayout`] rather than a parse error.
    #[cfg(feature = "serde")]
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: serde_impls::RawOptions = serde_json::from_slice(bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self {
            source: raw.source,
            sheet_size: match raw.sheet_size {
                Some(name) => name.parse()?,
                None => SheetSize::default(),
            },
        })
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(ImposeError::Config("No input file specified".to_string()));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Options as written on disk, before the sheet size is resolved
    #[derive(Deserialize)]
    pub(super) struct RawOptions {
        pub source: PathBuf,
        #[serde(default)]
        pub sheet_size: Option<String>,
    }

    impl Serialize for SheetSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for SheetSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let name = String::deserialize(deserializer)?;
            name.parse().map_err(D::Error::custom)
        }
    }
}
