#![forbid(unsafe_code)]

//! Algorithm catalog data model.
//!
//! These records are produced by the metadata exporter and only read by the
//! explorer. Field names follow the exported JSON (`snake_case`), so a
//! catalog file deserializes directly into [`Catalog`].
//!
//! # Example
//!
//! ```
//! use algoviz_core::catalog::Catalog;
//!
//! let json = r#"[{"name": "trial_division", "category": "basic",
//!     "summary": "s", "description": "d", "complexity": "O(sqrt n)"}]"#;
//! let catalog = Catalog::from_json(json).unwrap();
//! assert_eq!(catalog.first().unwrap().name, "trial_division");
//! assert!(catalog.first().unwrap().visualization.is_none());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A documented input of an algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Type label as written by the exporter (e.g. `"int"`).
    #[serde(rename = "type")]
    pub type_label: String,
    pub description: String,
    /// Default value of unspecified shape. `null` in the JSON reads as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Hint describing how an algorithm should be visualized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationHint {
    /// Mode label, e.g. `"bars"`, `"grid"`, `"graph"`.
    pub mode: String,
    /// Free-text walkthrough shown as canvas instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    /// Input the exporter used to produce the sample run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_input: Option<Map<String, Value>>,
}

impl VisualizationHint {
    /// Steps text, treating an empty string as absent.
    pub fn steps(&self) -> Option<&str> {
        self.steps.as_deref().filter(|s| !s.is_empty())
    }
}

/// Static metadata for one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmDescriptor {
    /// Unique key within a catalog.
    pub name: String,
    pub category: String,
    pub summary: String,
    pub description: String,
    /// Complexity label, e.g. `"O(n log log n)"`.
    pub complexity: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization: Option<VisualizationHint>,
}

impl AlgorithmDescriptor {
    /// Visualization mode label, if the descriptor carries a hint.
    pub fn visualization_mode(&self) -> Option<&str> {
        self.visualization.as_ref().map(|hint| hint.mode.as_str())
    }

    /// Instructional steps, if present and non-empty.
    pub fn visualization_steps(&self) -> Option<&str> {
        self.visualization.as_ref().and_then(VisualizationHint::steps)
    }
}

/// One recorded input/output pair for an algorithm.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleRun {
    #[serde(default)]
    pub input: Map<String, Value>,
    #[serde(default)]
    pub output: Map<String, Value>,
}

impl SampleRun {
    /// Build a sample run from its two records.
    pub fn new(input: Map<String, Value>, output: Map<String, Value>) -> Self {
        Self { input, output }
    }

    /// Parse a sample run from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The `result` field of the output record, where charts come from.
    pub fn result(&self) -> Option<&Value> {
        self.output.get("result")
    }
}

/// Errors raised while assembling a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// The JSON document did not match the catalog shape.
    Parse(serde_json::Error),
    /// Two descriptors share a name.
    DuplicateName(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "invalid catalog: {e}"),
            CatalogError::DuplicateName(name) => {
                write!(f, "algorithm '{name}' listed more than once")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(e) => Some(e),
            CatalogError::DuplicateName(_) => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

/// Descriptors sharing a category, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub members: Vec<&'a AlgorithmDescriptor>,
}

/// An ordered, name-unique collection of descriptors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entries: Vec<AlgorithmDescriptor>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names.
    pub fn new(entries: Vec<AlgorithmDescriptor>) -> Result<Self, CatalogError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|prev| prev.name == entry.name) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Parse the exported `algorithms.json` array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<AlgorithmDescriptor> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// First descriptor in catalog order.
    pub fn first(&self) -> Option<&AlgorithmDescriptor> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptors filtered to one category.
    pub fn in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a AlgorithmDescriptor> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.category == category)
    }

    /// Group descriptors by category.
    ///
    /// Groups appear in the order their category is first seen; members keep
    /// catalog order.
    pub fn group_by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for entry in &self.entries {
            match groups.iter_mut().find(|g| g.category == entry.category) {
                Some(group) => group.members.push(entry),
                None => groups.push(CategoryGroup {
                    category: &entry.category,
                    members: vec![entry],
                }),
            }
        }
        groups
    }
}
