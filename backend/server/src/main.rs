use std::sync::Arc;

use server::{app, configs, http::store::InMemoryTransactionReferenceStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = configs::Config::new()?;

    // References are only known to the merchant's own storage; this host
    // starts empty and answers unknown transactions with Status=ERROR.
    let transaction_references = Arc::new(InMemoryTransactionReferenceStore::default());

    app::start(config, transaction_references).await?;

    Ok(())
}
