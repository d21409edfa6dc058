use common_utils::{crypto, CustomResult, Secret};
use domain_types::errors::ConnectorError;
use error_stack::ResultExt;

#[derive(Clone, Debug)]
pub enum ConnectorSourceVerificationSecrets {
    /// Secret agreed with the connector for a single transaction, e.g. the
    /// security key returned during a registration phase.
    TransactionSecret(Secret<String>),
}

/// Core trait for source verification
///
/// `Payload` is whatever the connector signs over: a raw body, or a typed
/// notification combined with stored transaction data.
pub trait SourceVerification<Payload: ?Sized> {
    fn get_secrets(
        &self,
        _secrets: ConnectorSourceVerificationSecrets,
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Get the verification algorithm being used
    fn get_algorithm(&self) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, ConnectorError> {
        Ok(Box::new(crypto::NoAlgorithm))
    }

    /// Get the signature/hash value from the payload for verification
    fn get_signature(
        &self,
        _payload: &Payload,
        _secrets: &[u8],
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Get the message/payload that should be verified
    fn get_message(
        &self,
        _payload: &Payload,
        _secrets: &[u8],
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Perform the verification
    fn verify(
        &self,
        secrets: ConnectorSourceVerificationSecrets,
        payload: &Payload,
    ) -> CustomResult<bool, ConnectorError> {
        let algorithm = self.get_algorithm()?;
        let extracted_secrets = self.get_secrets(secrets)?;
        let signature = self.get_signature(payload, &extracted_secrets)?;
        let message = self.get_message(payload, &extracted_secrets)?;

        // Verify the signature against the message
        algorithm
            .verify_signature(&extracted_secrets, &signature, &message)
            .change_context(ConnectorError::SourceVerificationFailed)
    }
}
