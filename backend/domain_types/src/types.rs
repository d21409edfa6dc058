use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct Connectors {
    #[serde(default)]
    pub sagepay: SagepayConnectorParams,
}

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct SagepayConnectorParams {
    /// Merchant account name registered with Sage Pay
    #[serde(default)]
    pub vendor: Option<String>,
    /// Where the gateway forwards the customer once a notification is confirmed
    #[serde(default)]
    pub redirect_url: String,
    /// Where the gateway forwards the customer when a notification is rejected
    #[serde(default)]
    pub failure_redirect_url: Option<String>,
}

impl SagepayConnectorParams {
    pub fn failure_redirect_url(&self) -> &str {
        self.failure_redirect_url
            .as_deref()
            .unwrap_or(&self.redirect_url)
    }
}

// Trait to provide access to connectors field
pub trait HasConnectors {
    fn connectors(&self) -> &Connectors;
}
