use std::collections::HashMap;

use tokio::sync::RwLock;

/// Merchant side storage of the transaction references kept after the
/// registration phase, keyed by `VendorTxCode`.
#[async_trait::async_trait]
pub trait TransactionReferenceStore: Send + Sync {
    async fn find_transaction_reference(&self, vendor_tx_code: &str) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct InMemoryTransactionReferenceStore {
    references: RwLock<HashMap<String, String>>,
}

impl InMemoryTransactionReferenceStore {
    pub async fn insert(&self, vendor_tx_code: impl Into<String>, reference: impl Into<String>) {
        self.references
            .write()
            .await
            .insert(vendor_tx_code.into(), reference.into());
    }
}

#[async_trait::async_trait]
impl TransactionReferenceStore for InMemoryTransactionReferenceStore {
    async fn find_transaction_reference(&self, vendor_tx_code: &str) -> Option<String> {
        self.references.read().await.get(vendor_tx_code).cloned()
    }
}
