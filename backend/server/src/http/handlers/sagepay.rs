use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
};
use connector_integration::connectors::sagepay::{
    transformers::SagepayServerReply, ServerCompleteCreateCardRequest,
};
use domain_types::types::HasConnectors;

use crate::{
    http::{
        error::HttpError,
        state::AppState,
        utils::{request_details, AcknowledgementResponse},
    },
    logger,
};

/// Sage Pay Server posts here, not the customer's browser. Whatever we reply
/// tells the gateway where to send the customer next.
#[logger::instrument(skip_all)]
pub async fn complete_create_card(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<AcknowledgementResponse, HttpError> {
    let params = &state.config.connectors().sagepay;
    let details = request_details(&method, &uri, &headers, body)?;

    let mut request = ServerCompleteCreateCardRequest::try_from_request(&details).map_err(|report| {
        logger::warn!(error = ?report, "undecodable sagepay server notification");
        HttpError::bad_request(report.current_context().to_string())
    })?;

    if let Some(vendor) = params.vendor.as_deref() {
        request.set_vendor(vendor);
    }

    let vendor_tx_code = request.request_transaction_id().map(str::to_owned);
    if let Some(vendor_tx_code) = vendor_tx_code.as_deref() {
        match state
            .transaction_references
            .find_transaction_reference(vendor_tx_code)
            .await
        {
            Some(reference) => {
                request.set_transaction_reference(reference);
            }
            None => {
                logger::warn!(vendor_tx_code, "no stored transaction reference");
            }
        }
    }

    let reply = match request.send() {
        Ok(response) => {
            logger::info!(
                vendor_tx_code = response.transaction_id().unwrap_or_default(),
                status = response.status().unwrap_or_default(),
                card_type = response.card_type().unwrap_or_default(),
                "sagepay card registration notification verified"
            );
            return Ok(AcknowledgementResponse(
                response.confirm(&params.redirect_url),
            ));
        }
        Err(report) => {
            let error = report.current_context();
            logger::warn!(error = ?report, "sagepay server notification rejected");
            if error.is_caller_fault() {
                SagepayServerReply::error(params.failure_redirect_url(), error.to_string())
            } else {
                SagepayServerReply::invalid(params.failure_redirect_url(), error.to_string())
            }
        }
    };

    Ok(AcknowledgementResponse(reply.into()))
}
