//! Frontend bundler configuration.
//!
//! The web application's bundler reads a static options object: the plugin
//! set, the public base path and compile-time defines. The only value that
//! is not fixed is the application version, which comes from package
//! metadata at build time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::ToolError;

/// View-layer framework integration plugin
pub const VIEW_PLUGIN: &str = "@vitejs/plugin-vue";

/// Public path the bundled assets are served from
pub const BASE_PATH: &str = "/";

/// Symbol the bundler replaces with the application version
pub const VERSION_DEFINE: &str = "__APP_VERSION__";

/// Git revision and timestamp embedded by the build script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_time: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_time: env!("BUILD_TIME"),
        }
    }
}

/// `0.1.0 (abc1234, built 2024-01-01T00:00:00+00:00)`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// The subset of package metadata the build configuration reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
}

impl PackageMetadata {
    /// Metadata of this crate
    pub fn current() -> Self {
        Self {
            name: Some(env!("CARGO_PKG_NAME").to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Reads a `package.json` manifest
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ToolError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
            .map_err(|e| ToolError::metadata(format!("{}: {}", path.display(), e)))
    }

    /// Parses manifest text; `version` must be a string
    pub fn from_json(raw: &str) -> Result<Self, ToolError> {
        let metadata: PackageMetadata = serde_json::from_str(raw)?;
        if metadata.version.is_empty() {
            return Err(ToolError::metadata("version field is empty"));
        }
        Ok(metadata)
    }
}

/// A bundler plugin reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plugin {
    pub name: String,
}

impl Plugin {
    pub fn view_layer() -> Self {
        Self {
            name: VIEW_PLUGIN.to_string(),
        }
    }
}

/// Declarative bundler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub plugins: Vec<Plugin>,
    pub base: String,
    /// Symbol to literal value; values are the raw strings, unquoted
    pub define: BTreeMap<String, String>,
}

impl BuildConfig {
    pub fn from_metadata(metadata: &PackageMetadata) -> Self {
        let mut define = BTreeMap::new();
        define.insert(VERSION_DEFINE.to_string(), metadata.version.clone());

        Self {
            plugins: vec![Plugin::view_layer()],
            base: BASE_PATH.to_string(),
            define,
        }
    }

    pub fn version_define(&self) -> Option<&str> {
        self.define.get(VERSION_DEFINE).map(String::as_str)
    }

    /// Options in the form the bundler consumes.
    ///
    /// Define values are substituted into source as expressions, so each one
    /// is emitted as a JSON string literal.
    pub fn to_bundler_json(&self) -> Result<serde_json::Value, ToolError> {
        let define = self
            .define
            .iter()
            .map(|(symbol, value)| {
                serde_json::to_string(value)
                    .map(|expr| (symbol.clone(), serde_json::Value::String(expr)))
            })
            .collect::<Result<serde_json::Map<String, serde_json::Value>, _>>()?;

        Ok(serde_json::json!({
            "plugins": self.plugins,
            "base": self.base,
            "define": define,
        }))
    }
}
