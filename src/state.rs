use std::sync::Arc;

use crate::{
    config::Config,
    error::StartupError,
    quiz::{Catalog, QuizSession},
    store::RecordStore,
};

pub struct AppState {
    pub config: Config,
    pub store: RecordStore,
    pub quiz: QuizSession,
}

impl AppState {
    /// Opens the store and loads the quiz catalog. A bad catalog stops startup.
    pub fn new(config: Config) -> Result<Arc<Self>, StartupError> {
        let store = RecordStore::open(&config.database_path)?;

        let catalog = match &config.quiz_catalog {
            Some(path) => Catalog::from_file(path)?,
            None => Catalog::builtin(),
        };

        Ok(Self::from_parts(config, store, QuizSession::new(catalog)))
    }

    pub fn from_parts(config: Config, store: RecordStore, quiz: QuizSession) -> Arc<Self> {
        Arc::new(Self {
            config,
            store,
            quiz,
        })
    }
}
