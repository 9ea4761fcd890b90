//! Chart file buffers and Chart.yaml metadata

use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, Result};

/// A chart file buffered into memory, path relative to the chart root
/// (e.g. `Chart.yaml`, `templates/deployment.yaml`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFile {
    pub path: String,
    pub data: Vec<u8>,
}

impl ChartFile {
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }

    /// File content as UTF-8, failing with the file path on invalid bytes.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.data).map_err(|e| CoreError::FileAccess {
            path: self.path.clone(),
            message: format!("file is not valid UTF-8: {}", e),
        })
    }
}

/// Chart type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Application,
    Library,
}

/// The Chart.yaml model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    /// API version (v1 or v2)
    pub api_version: String,

    /// Chart name (required)
    pub name: String,

    /// Chart version (required, SemVer)
    #[serde(with = "version_serde")]
    pub version: Version,

    /// Chart type
    #[serde(default, rename = "type")]
    pub kind: ChartKind,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Application version
    #[serde(default)]
    pub app_version: Option<String>,

    /// Kubernetes version constraint
    #[serde(default)]
    pub kube_version: Option<String>,

    /// Home URL
    #[serde(default)]
    pub home: Option<String>,

    /// Icon URL
    #[serde(default)]
    pub icon: Option<String>,

    /// Source URLs
    #[serde(default)]
    pub sources: Vec<String>,

    /// Keywords
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Maintainers
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,

    /// Whether the chart is deprecated
    #[serde(default)]
    pub deprecated: bool,

    /// Annotations
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

/// Maintainer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ChartMetadata {
    /// Parse and validate a Chart.yaml document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let metadata: ChartMetadata = serde_yaml::from_str(yaml)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Check the invariants Chart.yaml must hold beyond deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.api_version != "v1" && self.api_version != "v2" {
            return Err(CoreError::InvalidChart {
                message: format!(
                    "unsupported apiVersion: {}. Expected: v1 or v2",
                    self.api_version
                ),
            });
        }

        if self.name.is_empty() {
            return Err(CoreError::InvalidChart {
                message: "chart name is required".to_string(),
            });
        }

        // The chart name prefixes every rendered source path; a '/' inside it
        // would make the prefix unrecoverable.
        if self.name.contains('/') {
            return Err(CoreError::InvalidChart {
                message: format!("chart name {:?} must not contain '/'", self.name),
            });
        }

        Ok(())
    }

    /// The reduced view templates see as `chart`.
    pub fn info(&self) -> ChartInfo {
        ChartInfo {
            name: self.name.clone(),
            version: self.version.to_string(),
            app_version: self.app_version.clone(),
        }
    }
}

/// Chart information for templates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInfo {
    /// Chart name
    pub name: String,

    /// Chart version
    pub version: String,

    /// App version
    pub app_version: Option<String>,
}

/// Custom serde for semver::Version
mod version_serde {
    use semver::Version;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(version: &Version, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&version.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Version, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}
