use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const BUILTIN_TAXONOMY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/taxonomy.json"
));

/// Three-level root cause tree shared by every category triple.
///
/// `level3` is keyed by the level-2 value first and the record's
/// `last_specialised_queue` second. The queue is matched exactly, so the
/// `""` entry only serves records whose queue cell is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    pub level1: Vec<String>,
    pub level2: BTreeMap<String, Vec<String>>,
    pub level3: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Taxonomy {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TAXONOMY).context("failed to parse built-in taxonomy")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let taxonomy: Taxonomy =
            serde_json::from_str(text).context("taxonomy json is malformed")?;
        if taxonomy.level1.is_empty() {
            anyhow::bail!("taxonomy level1 list is empty")
        }
        Ok(taxonomy)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read taxonomy: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid taxonomy: {}", path.display()))
    }

    /// Loads `path` when given, otherwise the taxonomy bundled with the app.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }
}
