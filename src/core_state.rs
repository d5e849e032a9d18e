//! Application state shared by every request handler.
//!
//! Built once at startup from `Settings` and wrapped in `Arc`. Everything
//! inside is either immutable or opens its own resources per call, so
//! handlers never take a lock.

use std::sync::Arc;

use crate::accounts::UserStore;
use crate::chat::ChatService;
use crate::config::Settings;
use crate::db;
use crate::knowledge::KnowledgeBase;
use crate::pipeline::extraction::DocumentExtractor;

pub struct CoreState {
    pub settings: Settings,
    pub knowledge: KnowledgeBase,
    pub extractor: Arc<DocumentExtractor>,
    pub chat: Arc<ChatService>,
    pub users: UserStore,
}

impl CoreState {
    pub fn new(
        settings: Settings,
        knowledge: KnowledgeBase,
        extractor: DocumentExtractor,
        chat: ChatService,
        users: UserStore,
    ) -> Self {
        Self {
            settings,
            knowledge,
            extractor: Arc::new(extractor),
            chat: Arc::new(chat),
            users,
        }
    }

    /// Wire up production components: knowledge file (or bundled list),
    /// Tesseract if configured, the Groq client if a key is present, and the
    /// account database (created and migrated here).
    pub fn from_settings(settings: Settings) -> Result<Self, CoreError> {
        let knowledge = KnowledgeBase::load(settings.knowledge.path.as_deref());
        let extractor = DocumentExtractor::from_settings(&settings.ocr);
        let chat = ChatService::from_settings(&settings.chat);
        let users = UserStore::with_iterations(
            &settings.database.path,
            settings.database.hash_iterations,
        );
        users.initialize()?;

        tracing::info!(
            diseases = knowledge.len(),
            ocr = extractor.has_ocr(),
            chat = chat.is_enabled(),
            database = %users.db_path().display(),
            "Core state ready"
        );

        Ok(Self::new(settings, knowledge, extractor, chat, users))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm::{LlmClient, MockLlmClient};
    use crate::pipeline::extraction::{MockOcrEngine, PdfTextExtractor};

    /// Core state over a temp database, bundled knowledge, mock OCR and an
    /// optional mock chat client.
    pub(crate) fn test_core(
        dir: &tempfile::TempDir,
        chat: Option<MockLlmClient>,
    ) -> Arc<CoreState> {
        test_core_with_settings(dir, chat, Settings::defaults())
    }

    pub(crate) fn test_core_with_settings(
        dir: &tempfile::TempDir,
        chat: Option<MockLlmClient>,
        mut settings: Settings,
    ) -> Arc<CoreState> {
        settings.database.path = dir.path().join("nutricare.db");
        settings.database.hash_iterations = 10;

        let extractor = DocumentExtractor::new(
            Box::new(PdfTextExtractor),
            Some(Box::new(MockOcrEngine::new("Malaria parasite seen", 0.9))),
        );
        let chat = ChatService::new(
            chat.map(|c| Box::new(c) as Box<dyn LlmClient>),
            &settings.chat.model,
        );
        let users = UserStore::with_iterations(&settings.database.path, 10);
        users.initialize().unwrap();

        Arc::new(CoreState::new(
            settings,
            KnowledgeBase::bundled().unwrap(),
            extractor,
            chat,
            users,
        ))
    }

    #[test]
    fn from_settings_builds_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::defaults();
        settings.database.path = dir.path().join("db").join("nutricare.db");
        settings.database.hash_iterations = 10;

        let core = CoreState::from_settings(settings).unwrap();
        assert_eq!(core.knowledge.len(), 17);
        assert!(!core.extractor.has_ocr());
        assert!(!core.chat.is_enabled());
        assert!(core.users.db_path().exists());
    }

    #[test]
    fn missing_knowledge_file_yields_empty_base() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::defaults();
        settings.database.path = dir.path().join("nutricare.db");
        settings.knowledge.path = Some(dir.path().join("absent.json"));

        let core = CoreState::from_settings(settings).unwrap();
        assert!(core.knowledge.is_empty());
    }

    #[test]
    fn test_core_wires_mocks() {
        let dir = tempfile::tempdir().unwrap();
        let core = test_core(&dir, Some(MockLlmClient::new("hi")));
        assert!(core.extractor.has_ocr());
        assert!(core.chat.is_enabled());
    }
}
