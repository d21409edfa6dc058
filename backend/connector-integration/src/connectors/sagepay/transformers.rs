use std::{collections::BTreeMap, fmt};

use common_utils::{
    consts,
    ext_traits::{ByteSliceExt, StringExt},
    CustomResult, Secret,
};
use domain_types::{connector_types::NotificationAcknowledgement, errors::ConnectorError};
use error_stack::ResultExt;
use serde::Deserialize;

pub(crate) mod field {
    pub(crate) const VENDOR_TX_CODE: &str = "VendorTxCode";
    pub(crate) const STATUS: &str = "Status";
    pub(crate) const TX_AUTH_NO: &str = "TxAuthNo";
    pub(crate) const VPS_SIGNATURE: &str = "VPSSignature";
    pub(crate) const TOKEN: &str = "Token";
    pub(crate) const CARD_TYPE: &str = "CardType";
    pub(crate) const LAST_4_DIGITS: &str = "Last4Digits";
    pub(crate) const EXPIRY_DATE: &str = "ExpiryDate";
}

const CONFIRMATION_STATUS_DETAIL: &str = "All Good";

/// Fields posted by Sage Pay Server once the card registration completes.
///
/// Unknown keys are kept in `additional_fields`. When a key is repeated the
/// last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SagepayNotificationFields {
    pub vendor_tx_code: Option<String>,
    pub status: Option<String>,
    pub tx_auth_no: Option<String>,
    pub vps_signature: Option<String>,
    pub token: Option<String>,
    pub card_type: Option<String>,
    pub last4_digits: Option<String>,
    pub expiry_date: Option<String>,
    pub additional_fields: BTreeMap<String, String>,
}

impl SagepayNotificationFields {
    pub fn from_form_body(body: &[u8]) -> CustomResult<Self, ConnectorError> {
        let pairs: Vec<(String, String)> = body
            .parse_form("SagepayNotificationFields")
            .change_context(ConnectorError::NotificationDecodingFailed)?;

        Ok(pairs.into_iter().collect())
    }

    /// Looks a field up by its wire name, including fields we do not model.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            field::VENDOR_TX_CODE => self.vendor_tx_code.as_deref(),
            field::STATUS => self.status.as_deref(),
            field::TX_AUTH_NO => self.tx_auth_no.as_deref(),
            field::VPS_SIGNATURE => self.vps_signature.as_deref(),
            field::TOKEN => self.token.as_deref(),
            field::CARD_TYPE => self.card_type.as_deref(),
            field::LAST_4_DIGITS => self.last4_digits.as_deref(),
            field::EXPIRY_DATE => self.expiry_date.as_deref(),
            other => self.additional_fields.get(other).map(String::as_str),
        }
    }

    fn insert(&mut self, key: String, value: String) {
        let slot = match key.as_str() {
            field::VENDOR_TX_CODE => &mut self.vendor_tx_code,
            field::STATUS => &mut self.status,
            field::TX_AUTH_NO => &mut self.tx_auth_no,
            field::VPS_SIGNATURE => &mut self.vps_signature,
            field::TOKEN => &mut self.token,
            field::CARD_TYPE => &mut self.card_type,
            field::LAST_4_DIGITS => &mut self.last4_digits,
            field::EXPIRY_DATE => &mut self.expiry_date,
            _ => {
                self.additional_fields.insert(key, value);
                return;
            }
        };
        *slot = Some(value);
    }
}

impl FromIterator<(String, String)> for SagepayNotificationFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut fields = Self::default();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

/// Outcome of the registration as reported in the `Status` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SagepayNotificationStatus {
    /// Process executed without error
    Ok,
    /// Input message was missing fields or badly formatted
    Malformed,
    /// Well formed, but some information supplied was invalid (vendor name, currency)
    Invalid,
    /// A problem at Sage Pay prevented the registration
    Error,
    Other(String),
}

impl From<&str> for SagepayNotificationStatus {
    fn from(status: &str) -> Self {
        match status {
            "OK" => Self::Ok,
            "MALFORMED" => Self::Malformed,
            "INVALID" => Self::Invalid,
            "ERROR" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

impl SagepayNotificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Malformed => "MALFORMED",
            Self::Invalid => "INVALID",
            Self::Error => "ERROR",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for SagepayNotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SagepayCardType {
    Visa,
    Mc,
    Delta,
    Maestro,
    Uke,
    Amex,
    Dc,
    Jcb,
    Laser,
    Paypal,
    Other(String),
}

impl From<&str> for SagepayCardType {
    fn from(card_type: &str) -> Self {
        match card_type {
            "VISA" => Self::Visa,
            "MC" => Self::Mc,
            "DELTA" => Self::Delta,
            "MAESTRO" => Self::Maestro,
            "UKE" => Self::Uke,
            "AMEX" => Self::Amex,
            "DC" => Self::Dc,
            "JCB" => Self::Jcb,
            "LASER" => Self::Laser,
            "PAYPAL" => Self::Paypal,
            other => Self::Other(other.to_string()),
        }
    }
}

/// What the merchant stored after the registration phase, serialized as JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SagepayTransactionReference {
    #[serde(rename = "VPSTxId")]
    pub vps_tx_id: String,
    #[serde(rename = "VendorTxCode")]
    pub vendor_tx_code: String,
    #[serde(rename = "SecurityKey", default)]
    pub security_key: Option<Secret<String>>,
}

impl TryFrom<&str> for SagepayTransactionReference {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(reference: &str) -> Result<Self, Self::Error> {
        reference
            .parse_struct("SagepayTransactionReference")
            .change_context(ConnectorError::MalformedTransactionReference)
    }
}

/// Everything the `VPSSignature` is computed over, except the security key
/// which travels as the verification secret.
#[derive(Debug, Clone, Copy)]
pub struct SagepaySignatureInput<'a> {
    pub reference: &'a SagepayTransactionReference,
    pub vendor: &'a str,
    pub notification: &'a SagepayNotificationFields,
}

impl SagepaySignatureInput<'_> {
    pub(crate) fn signed_message(&self, security_key: &[u8]) -> Vec<u8> {
        let notification = self.notification;
        [
            self.reference.vps_tx_id.as_bytes(),
            self.reference.vendor_tx_code.as_bytes(),
            notification.status.as_deref().unwrap_or_default().as_bytes(),
            notification.tx_auth_no.as_deref().unwrap_or_default().as_bytes(),
            self.vendor.as_bytes(),
            notification.token.as_deref().unwrap_or_default().as_bytes(),
            security_key,
        ]
        .concat()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagepayReplyStatus {
    Ok,
    Invalid,
    Error,
}

impl SagepayReplyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Invalid => "INVALID",
            Self::Error => "ERROR",
        }
    }
}

/// Plaintext reply Sage Pay Server expects on its notification POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SagepayServerReply {
    pub status: SagepayReplyStatus,
    pub status_detail: String,
    pub redirect_url: String,
}

impl SagepayServerReply {
    pub fn ok(redirect_url: impl Into<String>) -> Self {
        Self {
            status: SagepayReplyStatus::Ok,
            status_detail: CONFIRMATION_STATUS_DETAIL.to_string(),
            redirect_url: redirect_url.into(),
        }
    }

    pub fn invalid(redirect_url: impl Into<String>, status_detail: impl Into<String>) -> Self {
        Self {
            status: SagepayReplyStatus::Invalid,
            status_detail: status_detail.into(),
            redirect_url: redirect_url.into(),
        }
    }

    pub fn error(redirect_url: impl Into<String>, status_detail: impl Into<String>) -> Self {
        Self {
            status: SagepayReplyStatus::Error,
            status_detail: status_detail.into(),
            redirect_url: redirect_url.into(),
        }
    }

    pub fn to_body(&self) -> String {
        [
            format!("Status={}", self.status.as_str()),
            format!("StatusDetail={}", self.status_detail),
            format!("RedirectURL={}", self.redirect_url),
        ]
        .join(consts::CRLF)
    }
}

impl From<SagepayServerReply> for NotificationAcknowledgement {
    fn from(reply: SagepayServerReply) -> Self {
        // The URL goes out verbatim, a line break in it would add reply lines.
        if reply.redirect_url.contains(['\r', '\n']) {
            tracing::warn!(
                status = reply.status.as_str(),
                "redirect url of the sagepay server reply contains a line break"
            );
        }
        Self::text_plain(reply.to_body())
    }
}
