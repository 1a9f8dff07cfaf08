#![forbid(unsafe_code)]

//! Catalog and sample sources.
//!
//! The exported data set is a directory:
//!
//! ```text
//! <root>/algorithms.json          catalog, an array of descriptors
//! <root>/examples/<name>.json     one sample run per algorithm
//! ```
//!
//! [`DirSource`] reads that layout from disk; [`MemorySource`] holds the same
//! data in memory for tests and embedding.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use algoviz_core::catalog::{Catalog, CatalogError, SampleRun};
use tracing::debug;

/// Errors from loading catalog or sample data.
#[derive(Debug)]
pub enum LoadError {
    /// Reading a file failed.
    Io { path: PathBuf, source: std::io::Error },
    /// A sample file was not valid JSON of the expected shape.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The catalog file parsed but is not a valid catalog.
    Catalog { path: PathBuf, source: CatalogError },
    /// The name cannot be used as a file stem.
    InvalidName(String),
    /// No sample exists for the name.
    NotFound(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            LoadError::Parse { path, source } => write!(f, "{}: {source}", path.display()),
            LoadError::Catalog { path, source } => write!(f, "{}: {source}", path.display()),
            LoadError::InvalidName(name) => write!(f, "invalid algorithm name '{name}'"),
            LoadError::NotFound(name) => write!(f, "no sample for '{name}'"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            LoadError::Catalog { source, .. } => Some(source),
            LoadError::InvalidName(_) | LoadError::NotFound(_) => None,
        }
    }
}

/// Something that can produce the algorithm catalog.
pub trait CatalogSource {
    fn load_catalog(&self) -> Result<Catalog, LoadError>;
}

/// Something that can produce a sample run by algorithm name.
pub trait SampleSource {
    fn load_sample(&self, name: &str) -> Result<SampleRun, LoadError>;
}

/// Data set laid out in a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub const CATALOG_FILE: &'static str = "algorithms.json";
    pub const SAMPLES_DIR: &'static str = "examples";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(Self::CATALOG_FILE)
    }

    /// Path of a sample file. Names that would escape the samples directory
    /// are rejected.
    pub fn sample_path(&self, name: &str) -> Result<PathBuf, LoadError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !valid {
            return Err(LoadError::InvalidName(name.to_string()));
        }
        Ok(self
            .root
            .join(Self::SAMPLES_DIR)
            .join(format!("{name}.json")))
    }

    fn read(path: &Path) -> Result<String, LoadError> {
        std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CatalogSource for DirSource {
    fn load_catalog(&self) -> Result<Catalog, LoadError> {
        let path = self.catalog_path();
        let text = Self::read(&path)?;
        let catalog = Catalog::from_json(&text).map_err(|source| LoadError::Catalog {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

impl SampleSource for DirSource {
    fn load_sample(&self, name: &str) -> Result<SampleRun, LoadError> {
        let path = self.sample_path(name)?;
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(name.to_string()));
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };
        SampleRun::from_json(&text).map_err(|source| LoadError::Parse { path, source })
    }
}

/// Data set held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    catalog: Catalog,
    samples: HashMap<String, SampleRun>,
}

impl MemorySource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            samples: HashMap::new(),
        }
    }

    /// Add or replace the sample for `name`.
    #[must_use]
    pub fn with_sample(mut self, name: impl Into<String>, sample: SampleRun) -> Self {
        self.samples.insert(name.into(), sample);
        self
    }
}

impl CatalogSource for MemorySource {
    fn load_catalog(&self) -> Result<Catalog, LoadError> {
        Ok(self.catalog.clone())
    }
}

impl SampleSource for MemorySource {
    fn load_sample(&self, name: &str) -> Result<SampleRun, LoadError> {
        self.samples
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}
