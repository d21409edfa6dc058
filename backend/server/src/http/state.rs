use std::sync::Arc;

use super::store::TransactionReferenceStore;
use crate::configs::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transaction_references: Arc<dyn TransactionReferenceStore>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        transaction_references: Arc<dyn TransactionReferenceStore>,
    ) -> Self {
        Self {
            config,
            transaction_references,
        }
    }
}
