use crate::bindings::BindingTable;
use crate::report::HandoffStore;
use crate::session::SessionController;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The page's single interview session
    pub controller: Arc<SessionController>,

    /// Control id -> controller operation
    pub bindings: Arc<BindingTable>,

    /// Where the finished report is handed off
    pub store: Arc<dyn HandoffStore>,
}

impl AppState {
    pub fn new(controller: Arc<SessionController>, store: Arc<dyn HandoffStore>) -> Self {
        Self {
            controller,
            bindings: Arc::new(BindingTable::standard()),
            store,
        }
    }
}
