//! Route manifest emitted directly by the client build.
//!
//! Preferred over router point extraction: the build writes the ordered
//! route records itself, so nothing has to be recovered from source text.
//!
//! ```json
//! {
//!   "globals": ["Header", "Footer"],
//!   "routes": [
//!     { "handler": "Home", "route": "/", "exact": true },
//!     { "handler": "Docs", "route": "/docs", "exact": false }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::extract::types::{RouteDescriptor, RouteTable};

/// Error type for manifest loading.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),
}

/// On-disk manifest layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteManifest {
    pub globals: Vec<String>,
    pub routes: Vec<RouteDescriptor>,
}

impl RouteManifest {
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a manifest, choosing the format by file extension (JSON unless
    /// the file ends in `.toml`).
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Convert into a route table using the usual de-duplication rules.
    pub fn into_table(self) -> RouteTable {
        let mut table = RouteTable::new();
        for global in self.globals {
            table.push_global(global);
        }
        for descriptor in self.routes {
            table.insert_route(descriptor);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_manifest() {
        let manifest = RouteManifest::from_json(
            r#"{
                "globals": ["Header", "Header", "Footer"],
                "routes": [
                    {"handler": "Home", "route": "/"},
                    {"handler": "Docs", "route": "/docs", "exact": false}
                ]
            }"#,
        )
        .unwrap();
        let table = manifest.into_table();

        assert_eq!(table.globals(), &["Header".to_string(), "Footer".to_string()]);
        assert_eq!(
            table.routes(),
            &[
                RouteDescriptor::new("Home", "/", true),
                RouteDescriptor::new("Docs", "/docs", false),
            ]
        );
    }

    #[test]
    fn test_toml_manifest_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
globals = ["Layout"]

[[routes]]
handler = "About"
route = "/about"
exact = true
"#
        )
        .unwrap();

        let table = RouteManifest::load(file.path()).unwrap().into_table();
        assert_eq!(table.globals(), &["Layout".to_string()]);
        assert_eq!(table.routes(), &[RouteDescriptor::new("About", "/about", true)]);
    }

    #[test]
    fn test_invalid_manifest() {
        assert!(matches!(
            RouteManifest::from_json(r#"{"routes": [{"route": "/"}]}"#),
            Err(ManifestError::Json(_))
        ));
        assert!(matches!(
            RouteManifest::load(Path::new("/no/such/routes.json")),
            Err(ManifestError::Io { .. })
        ));
    }
}
