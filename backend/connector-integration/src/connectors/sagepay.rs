#[cfg(test)]
mod test;
pub mod transformers;

use common_utils::{
    crypto::{self, VerifySignature},
    CustomResult, PeekInterface,
};
use domain_types::{
    connector_types::{NotificationAcknowledgement, RequestDetails},
    errors::ConnectorError,
};
use error_stack::{report, ResultExt};
use interfaces::{
    connector_types::{ConnectorCommon, IncomingServerNotification},
    verification::{ConnectorSourceVerificationSecrets, SourceVerification},
};
use transformers::{
    SagepayCardType, SagepayNotificationFields, SagepayNotificationStatus, SagepayServerReply,
    SagepaySignatureInput, SagepayTransactionReference,
};

#[derive(Debug, Clone, Copy)]
pub struct Sagepay;

impl ConnectorCommon for Sagepay {
    fn id(&self) -> &'static str {
        "sagepay"
    }
}

impl IncomingServerNotification for Sagepay {
    type Notification = SagepayNotificationFields;

    fn decode_notification(
        &self,
        request: &RequestDetails,
    ) -> CustomResult<Self::Notification, ConnectorError> {
        SagepayNotificationFields::from_form_body(&request.body)
            .attach_printable_lazy(|| format!("{} server notification", self.id()))
    }
}

impl<'a> SourceVerification<SagepaySignatureInput<'a>> for Sagepay {
    fn get_secrets(
        &self,
        secrets: ConnectorSourceVerificationSecrets,
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        let ConnectorSourceVerificationSecrets::TransactionSecret(security_key) = secrets;
        Ok(security_key.peek().as_bytes().to_vec())
    }

    fn get_algorithm(&self) -> CustomResult<Box<dyn VerifySignature + Send>, ConnectorError> {
        Ok(Box::new(crypto::Md5))
    }

    fn get_signature(
        &self,
        payload: &SagepaySignatureInput<'a>,
        _secrets: &[u8],
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        // Hex decoding is case insensitive, as is the comparison Sage Pay expects.
        let signature = payload
            .notification
            .vps_signature
            .as_deref()
            .unwrap_or_default();
        hex::decode(signature)
            .change_context(ConnectorError::InvalidResponse)
            .attach_printable("VPSSignature is not a hex encoded digest")
    }

    fn get_message(
        &self,
        payload: &SagepaySignatureInput<'a>,
        secrets: &[u8],
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(payload.signed_message(secrets))
    }
}

/// Notification Sage Pay Server posts to the merchant once a card has been
/// tokenized (the "complete create card" step).
///
/// The caller reads [`Self::request_transaction_id`], looks up the transaction
/// reference it stored after the registration phase and sets it together with
/// the vendor before calling [`Self::get_data`] or [`Self::send`], which
/// validate the `VPSSignature`.
#[derive(Debug, Clone)]
pub struct ServerCompleteCreateCardRequest {
    notification: SagepayNotificationFields,
    vendor: Option<String>,
    transaction_reference: Option<String>,
}

impl ServerCompleteCreateCardRequest {
    pub fn new(notification: SagepayNotificationFields) -> Self {
        Self {
            notification,
            vendor: None,
            transaction_reference: None,
        }
    }

    pub fn try_from_request(request: &RequestDetails) -> CustomResult<Self, ConnectorError> {
        Sagepay.decode_notification(request).map(Self::new)
    }

    pub fn set_vendor(&mut self, vendor: impl Into<String>) -> &mut Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Stores the JSON serialized transaction reference (`VPSTxId`,
    /// `VendorTxCode`, `SecurityKey`) kept from the registration phase.
    pub fn set_transaction_reference(&mut self, reference: impl Into<String>) -> &mut Self {
        self.transaction_reference = Some(reference.into());
        self
    }

    /// The transaction code allocated by the merchant, straight from the
    /// notification so the stored reference can be looked up.
    pub fn request_transaction_id(&self) -> Option<&str> {
        self.notification.vendor_tx_code.as_deref()
    }

    /// The token generated by Sage Pay for the registered card
    pub fn card_reference(&self) -> Option<&str> {
        self.notification.token.as_deref()
    }

    /// VISA, MC, DELTA, MAESTRO, UKE, AMEX, DC, JCB, LASER, PAYPAL
    pub fn card_type(&self) -> Option<&str> {
        self.notification.card_type.as_deref()
    }

    /// PayPal transactions report 0000
    pub fn last4_digits(&self) -> Option<&str> {
        self.notification.last4_digits.as_deref()
    }

    /// MMYY
    pub fn expiry_date(&self) -> Option<&str> {
        self.notification.expiry_date.as_deref()
    }

    /// Verifies the notification signature and returns the posted fields.
    pub fn get_data(&self) -> CustomResult<SagepayNotificationFields, ConnectorError> {
        let vendor = required(self.vendor.as_deref(), "vendor")?;
        let reference = SagepayTransactionReference::try_from(required(
            self.transaction_reference.as_deref(),
            "transaction_reference",
        )?)?;

        let input = SagepaySignatureInput {
            reference: &reference,
            vendor,
            notification: &self.notification,
        };
        let secrets = ConnectorSourceVerificationSecrets::TransactionSecret(
            reference.security_key.clone().unwrap_or_default(),
        );

        let verified = Sagepay
            .verify(secrets, &input)
            .change_context(ConnectorError::InvalidResponse)?;

        if !verified {
            tracing::warn!(
                vendor_tx_code = %reference.vendor_tx_code,
                "sagepay server notification signature mismatch"
            );
            return Err(report!(ConnectorError::InvalidResponse))
                .attach_printable("VPSSignature does not match the notification");
        }

        tracing::debug!(
            vendor_tx_code = %reference.vendor_tx_code,
            status = self.notification.status.as_deref().unwrap_or_default(),
            "sagepay server notification verified"
        );

        Ok(self.notification.clone())
    }

    pub fn send(&self) -> CustomResult<ServerCompleteCreateCardResponse<'_>, ConnectorError> {
        let data = self.get_data()?;
        Ok(ServerCompleteCreateCardResponse::new(self, data))
    }
}

fn required<'a>(
    value: Option<&'a str>,
    field_name: &'static str,
) -> Result<&'a str, ConnectorError> {
    value.ok_or(ConnectorError::MissingRequiredConfiguration { field_name })
}

/// Verified complete create card notification.
#[derive(Debug)]
pub struct ServerCompleteCreateCardResponse<'a> {
    request: &'a ServerCompleteCreateCardRequest,
    data: SagepayNotificationFields,
}

impl<'a> ServerCompleteCreateCardResponse<'a> {
    pub fn new(request: &'a ServerCompleteCreateCardRequest, data: SagepayNotificationFields) -> Self {
        Self { request, data }
    }

    /// The unique id allocated by the merchant to represent this transaction
    pub fn transaction_id(&self) -> Option<&'a str> {
        self.request.request_transaction_id()
    }

    pub fn data(&self) -> &SagepayNotificationFields {
        &self.data
    }

    /// The token generated by Sage Pay for the registered card
    pub fn card_reference(&self) -> Option<&str> {
        self.data.token.as_deref()
    }

    /// One of OK, MALFORMED, INVALID or ERROR. Anything else is passed on as is.
    pub fn status(&self) -> Option<&str> {
        self.data.status.as_deref()
    }

    pub fn notification_status(&self) -> Option<SagepayNotificationStatus> {
        self.status().map(SagepayNotificationStatus::from)
    }

    pub fn is_successful(&self) -> bool {
        self.notification_status() == Some(SagepayNotificationStatus::Ok)
    }

    /// VISA, MC, DELTA, MAESTRO, UKE, AMEX, DC, JCB, LASER, PAYPAL
    pub fn card_type(&self) -> Option<&str> {
        self.data.card_type.as_deref()
    }

    pub fn card_network(&self) -> Option<SagepayCardType> {
        self.card_type().map(SagepayCardType::from)
    }

    /// PayPal transactions report 0000
    pub fn last4_digits(&self) -> Option<&str> {
        self.data.last4_digits.as_deref()
    }

    /// MMYY
    pub fn expiry_date(&self) -> Option<&str> {
        self.data.expiry_date.as_deref()
    }

    /// Sage Pay Server calls the merchant, not the customer's browser, and
    /// expects the receipt to be confirmed with the URL it should forward the
    /// customer to.
    ///
    /// Update the merchant records before confirming. The returned
    /// acknowledgement must be sent verbatim and ends the request.
    pub fn confirm(self, next_url: &str) -> NotificationAcknowledgement {
        SagepayServerReply::ok(next_url).into()
    }
}
