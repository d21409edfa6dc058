use std::collections::HashMap;

use axum::{
    body::Bytes,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use domain_types::connector_types::{HttpMethod, NotificationAcknowledgement, RequestDetails};

use super::error::HttpError;

/// Collects the parts of an inbound HTTP request into [`RequestDetails`]
pub fn request_details(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<RequestDetails, HttpError> {
    let method = HttpMethod::try_from(method).map_err(|method| HttpError {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: format!("Unsupported method: {method}"),
    })?;

    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect::<HashMap<_, _>>();

    Ok(RequestDetails {
        method,
        uri: Some(uri.path().to_string()),
        headers,
        body: body.to_vec(),
        query_params: uri.query().map(str::to_string),
    })
}

/// Terminal reply to a connector notification, sent verbatim.
pub struct AcknowledgementResponse(pub NotificationAcknowledgement);

impl IntoResponse for AcknowledgementResponse {
    fn into_response(self) -> Response {
        let NotificationAcknowledgement { content_type, body } = self.0;
        ([(header::CONTENT_TYPE, content_type)], body).into_response()
    }
}
