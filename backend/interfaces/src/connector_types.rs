use common_utils::CustomResult;
use domain_types::{connector_types::RequestDetails, errors::ConnectorError};

pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;
}

/// Notifications posted to us by the connector's servers, as opposed to
/// responses to requests we initiated.
pub trait IncomingServerNotification: ConnectorCommon {
    type Notification;

    fn decode_notification(
        &self,
        request: &RequestDetails,
    ) -> CustomResult<Self::Notification, ConnectorError>;
}
