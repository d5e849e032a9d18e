use std::path::Path;
use std::sync::Arc;

use super::KnowledgeError;
use crate::models::Disease;

/// Disease list shipped with the binary.
const BUNDLED_DISEASES: &str = include_str!("../../resources/diseases.json");

/// Read-only disease list, cheap to clone and share across requests.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    diseases: Arc<Vec<Disease>>,
}

impl KnowledgeBase {
    pub fn new(diseases: Vec<Disease>) -> Self {
        Self {
            diseases: Arc::new(diseases),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let diseases: Vec<Disease> = serde_json::from_str(json)?;
        Ok(Self::new(diseases))
    }

    /// Parse a disease list from disk.
    pub fn from_file(path: &Path) -> Result<Self, KnowledgeError> {
        if !path.exists() {
            return Err(KnowledgeError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The list bundled into the binary at build time.
    pub fn bundled() -> Result<Self, KnowledgeError> {
        Self::from_json(BUNDLED_DISEASES)
    }

    /// Startup loader. A missing or malformed file is logged and yields an
    /// empty knowledge base so the rest of the service keeps running.
    pub fn load(path: Option<&Path>) -> Self {
        let result = match path {
            Some(p) => Self::from_file(p),
            None => Self::bundled(),
        };
        match result {
            Ok(kb) => {
                tracing::info!(count = kb.len(), "Loaded diseases into knowledge base");
                kb
            }
            Err(e) => {
                tracing::error!("Knowledge base unavailable: {e}");
                Self::default()
            }
        }
    }

    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    /// First disease whose lower-cased name contains `key` (already lower-case).
    pub fn find_by_name_fragment(&self, key: &str) -> Option<&Disease> {
        self.diseases
            .iter()
            .find(|d| d.name.to_lowercase().contains(key))
    }
}
