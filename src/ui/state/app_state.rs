use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::config::AppConfig;
use crate::domain::entities::form::EditForm;
use crate::domain::entities::taxonomy::Taxonomy;
use crate::usecase::services::review_store::ReviewStore;

/// Read-only state handed to the UI at launch.
#[derive(Clone)]
pub struct AppContext {
    pub taxonomy: Arc<Taxonomy>,
    pub config: Arc<AppConfig>,
}

pub struct AppState {
    pub store: Signal<ReviewStore>,
    pub form: Signal<Option<EditForm>>,
    pub source_name: Signal<Option<String>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: use_signal(ReviewStore::default),
            form: use_signal(|| None::<EditForm>),
            source_name: use_signal(|| None::<String>),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
