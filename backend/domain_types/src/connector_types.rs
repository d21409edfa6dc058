use std::collections::HashMap;

use common_utils::consts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = http::Method;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        match *method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PUT => Ok(Self::Put),
            http::Method::DELETE => Ok(Self::Delete),
            http::Method::PATCH => Ok(Self::Patch),
            _ => Err(method.clone()),
        }
    }
}

/// Inbound request posted to us by a connector (webhooks, server notifications).
#[derive(Debug, Clone)]
pub struct RequestDetails {
    pub method: HttpMethod,
    pub uri: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub query_params: Option<String>,
}

/// Final reply to a connector notification.
///
/// Once produced, the host must send `body` verbatim and stop handling the
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAcknowledgement {
    pub content_type: &'static str,
    pub body: String,
}

impl NotificationAcknowledgement {
    pub fn text_plain(body: String) -> Self {
        Self {
            content_type: consts::TEXT_PLAIN,
            body,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body.into_bytes()
    }
}
