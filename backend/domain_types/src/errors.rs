#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Missing required configuration: {field_name}")]
    MissingRequiredConfiguration { field_name: &'static str },
    #[error("Failed to parse the stored transaction reference")]
    MalformedTransactionReference,
    #[error("Invalid response received from the connector")]
    InvalidResponse,
    #[error("Failed to decode the notification body")]
    NotificationDecodingFailed,
    #[error("Source verification failed")]
    SourceVerificationFailed,
}

impl ConnectorError {
    /// Whether the failure is caused by missing or corrupted caller side setup
    /// rather than by the message received from the connector.
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredConfiguration { .. } | Self::MalformedTransactionReference
        )
    }
}
