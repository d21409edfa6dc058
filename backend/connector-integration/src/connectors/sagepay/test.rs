#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::expect_used)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use domain_types::{
        connector_types::{HttpMethod, RequestDetails},
        errors::ConnectorError,
    };
    use serde_json::json;

    use super::super::{
        transformers::{
            SagepayCardType, SagepayNotificationFields, SagepayNotificationStatus,
            SagepayServerReply,
        },
        ServerCompleteCreateCardRequest,
    };

    // md5("VPS1" + "VTC1" + "OK" + "TX1" + "ACME" + "TOK1" + "")
    const EMPTY_KEY_SIGNATURE: &str = "5d2f31d10fdd3147ae692f54bf527ca1";
    // md5("V1" + "VTC1" + "OK" + "111" + "acme" + "tok-abc" + "S1")
    const SCENARIO_SIGNATURE: &str = "e94c9becd56c9a00a95cf7ae7e33dc44";

    fn fields(pairs: &[(&str, &str)]) -> SagepayNotificationFields {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn scenario_fields() -> SagepayNotificationFields {
        fields(&[
            ("VendorTxCode", "VTC1"),
            ("Status", "OK"),
            ("TxAuthNo", "111"),
            ("Token", "tok-abc"),
            ("VPSSignature", SCENARIO_SIGNATURE),
        ])
    }

    fn scenario_reference() -> String {
        json!({"VPSTxId": "V1", "VendorTxCode": "VTC1", "SecurityKey": "S1"}).to_string()
    }

    fn scenario_request(notification: SagepayNotificationFields) -> ServerCompleteCreateCardRequest {
        let mut request = ServerCompleteCreateCardRequest::new(notification);
        request
            .set_vendor("acme")
            .set_transaction_reference(scenario_reference());
        request
    }

    fn empty_key_request(
        reference: serde_json::Value,
        vendor: &str,
        overrides: &[(&str, &str)],
    ) -> ServerCompleteCreateCardRequest {
        let mut pairs = vec![
            ("VendorTxCode", "VTC1"),
            ("Status", "OK"),
            ("TxAuthNo", "TX1"),
            ("Token", "TOK1"),
            ("VPSSignature", EMPTY_KEY_SIGNATURE),
        ];
        pairs.extend_from_slice(overrides);
        let mut request = ServerCompleteCreateCardRequest::new(fields(&pairs));
        request
            .set_vendor(vendor)
            .set_transaction_reference(reference.to_string());
        request
    }

    fn empty_key_reference() -> serde_json::Value {
        json!({"VPSTxId": "VPS1", "VendorTxCode": "VTC1", "SecurityKey": ""})
    }

    fn error_of(request: &ServerCompleteCreateCardRequest) -> ConnectorError {
        match request.get_data() {
            Ok(_) => panic!("expected verification to fail"),
            Err(report) => report.current_context().clone(),
        }
    }

    #[test]
    fn test_signature_fixed_vector_with_empty_security_key() {
        let request = empty_key_request(empty_key_reference(), "ACME", &[]);
        let data = request.get_data().expect("signature should verify");
        assert_eq!(data.vps_signature.as_deref(), Some(EMPTY_KEY_SIGNATURE));
    }

    #[test]
    fn test_missing_security_key_hashes_as_empty() {
        let request = empty_key_request(
            json!({"VPSTxId": "VPS1", "VendorTxCode": "VTC1"}),
            "ACME",
            &[],
        );
        assert!(request.get_data().is_ok());

        let request = empty_key_request(
            json!({"VPSTxId": "VPS1", "VendorTxCode": "VTC1", "SecurityKey": null}),
            "ACME",
            &[],
        );
        assert!(request.get_data().is_ok());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let request = scenario_request(scenario_fields());
        let response = request.send().expect("notification should verify");

        assert_eq!(response.status(), Some("OK"));
        assert_eq!(response.card_reference(), Some("tok-abc"));
        assert_eq!(response.transaction_id(), Some("VTC1"));
        assert!(response.is_successful());
    }

    #[test]
    fn test_signature_comparison_is_case_insensitive() {
        let upper = SCENARIO_SIGNATURE.to_uppercase();
        let mut notification = scenario_fields();
        notification.vps_signature = Some(upper);

        assert!(scenario_request(notification).get_data().is_ok());
    }

    #[test]
    fn test_tampered_notification_fields_are_rejected() {
        for (key, value) in [
            ("Status", "Ok"),
            ("Status", "INVALID"),
            ("TxAuthNo", "112"),
            ("Token", "tok-abd"),
        ] {
            let request = empty_key_request(empty_key_reference(), "ACME", &[(key, value)]);
            assert_eq!(
                error_of(&request),
                ConnectorError::InvalidResponse,
                "tampering {key} must fail"
            );
        }
    }

    #[test]
    fn test_tampered_stored_values_are_rejected() {
        let references = [
            json!({"VPSTxId": "VPS2", "VendorTxCode": "VTC1", "SecurityKey": ""}),
            json!({"VPSTxId": "VPS1", "VendorTxCode": "VTC2", "SecurityKey": ""}),
            json!({"VPSTxId": "VPS1", "VendorTxCode": "VTC1", "SecurityKey": "K"}),
        ];
        for reference in references {
            let request = empty_key_request(reference, "ACME", &[]);
            assert_eq!(error_of(&request), ConnectorError::InvalidResponse);
        }

        let request = empty_key_request(empty_key_reference(), "acme", &[]);
        assert_eq!(error_of(&request), ConnectorError::InvalidResponse);
    }

    #[test]
    fn test_missing_or_malformed_signature_is_rejected() {
        let mut notification = scenario_fields();
        notification.vps_signature = None;
        assert_eq!(
            error_of(&scenario_request(notification)),
            ConnectorError::InvalidResponse
        );

        let mut notification = scenario_fields();
        notification.vps_signature = Some("not-a-digest".to_string());
        assert_eq!(
            error_of(&scenario_request(notification)),
            ConnectorError::InvalidResponse
        );
    }

    #[test]
    fn test_missing_vendor_is_a_configuration_error() {
        let mut request = ServerCompleteCreateCardRequest::new(scenario_fields());
        request.set_transaction_reference(scenario_reference());
        assert_eq!(
            error_of(&request),
            ConnectorError::MissingRequiredConfiguration {
                field_name: "vendor"
            }
        );
    }

    #[test]
    fn test_empty_vendor_is_hashed_like_any_other() {
        // md5("V1" + "VTC1" + "OK" + "111" + "" + "tok-abc" + "S1")
        let mut notification = scenario_fields();
        notification.vps_signature = Some("9870ec360c6462b231c8c5743a6a1ead".to_string());

        let mut request = ServerCompleteCreateCardRequest::new(notification);
        request
            .set_vendor("")
            .set_transaction_reference(scenario_reference());

        let response = request.send().unwrap();
        assert_eq!(response.card_reference(), Some("tok-abc"));

        // The configured-vendor signature no longer matches.
        let mut request = ServerCompleteCreateCardRequest::new(scenario_fields());
        request
            .set_vendor("")
            .set_transaction_reference(scenario_reference());
        assert_eq!(error_of(&request), ConnectorError::InvalidResponse);
    }

    #[test]
    fn test_empty_transaction_reference_is_malformed() {
        let mut request = ServerCompleteCreateCardRequest::new(scenario_fields());
        request.set_vendor("acme").set_transaction_reference("");
        assert_eq!(
            error_of(&request),
            ConnectorError::MalformedTransactionReference
        );
    }

    #[test]
    fn test_missing_transaction_reference_is_a_configuration_error() {
        let mut request = ServerCompleteCreateCardRequest::new(scenario_fields());
        request.set_vendor("acme");
        assert_eq!(
            error_of(&request),
            ConnectorError::MissingRequiredConfiguration {
                field_name: "transaction_reference"
            }
        );
        assert!(request.send().is_err());
    }

    #[test]
    fn test_malformed_transaction_reference() {
        for reference in [
            "{not json",
            r#"{"VendorTxCode":"VTC1","SecurityKey":"S1"}"#,
            r#"{"VPSTxId":"V1","SecurityKey":"S1"}"#,
            r#"{"VPSTxId":1,"VendorTxCode":"VTC1","SecurityKey":"S1"}"#,
            "null",
        ] {
            let mut request = ServerCompleteCreateCardRequest::new(scenario_fields());
            request
                .set_vendor("acme")
                .set_transaction_reference(reference);
            assert_eq!(
                error_of(&request),
                ConnectorError::MalformedTransactionReference,
                "{reference}"
            );
        }
    }

    #[test]
    fn test_accessors_return_none_when_absent() {
        let request = ServerCompleteCreateCardRequest::new(fields(&[]));
        assert_eq!(request.request_transaction_id(), None);
        assert_eq!(request.card_reference(), None);
        assert_eq!(request.card_type(), None);
        assert_eq!(request.last4_digits(), None);
        assert_eq!(request.expiry_date(), None);

        let mut notification = scenario_fields();
        notification.status = None;
        notification.token = None;
        notification.vps_signature = Some(md5_hex("V1VTC1111acmeS1"));
        let request = scenario_request(notification);
        let response = request.send().unwrap();
        assert_eq!(response.status(), None);
        assert_eq!(response.notification_status(), None);
        assert_eq!(response.card_reference(), None);
        assert_eq!(response.card_type(), None);
        assert_eq!(response.last4_digits(), None);
        assert_eq!(response.expiry_date(), None);
        assert!(!response.is_successful());
    }

    #[test]
    fn test_accessors_return_values_untouched() {
        let mut notification = scenario_fields();
        notification.card_type = Some(" VISA ".to_string());
        notification.last4_digits = Some("0000".to_string());
        notification.expiry_date = Some("0931".to_string());
        let request = scenario_request(notification);

        assert_eq!(request.card_type(), Some(" VISA "));
        assert_eq!(request.last4_digits(), Some("0000"));
        assert_eq!(request.expiry_date(), Some("0931"));
        assert_eq!(request.card_reference(), Some("tok-abc"));

        let response = request.send().unwrap();
        assert_eq!(response.card_type(), Some(" VISA "));
        assert_eq!(
            response.card_network(),
            Some(SagepayCardType::Other(" VISA ".to_string()))
        );
        assert_eq!(response.last4_digits(), Some("0000"));
        assert_eq!(response.expiry_date(), Some("0931"));
    }

    #[test]
    fn test_unrecognised_status_passes_through() {
        assert_eq!(
            SagepayNotificationStatus::from("MALFORMED"),
            SagepayNotificationStatus::Malformed
        );
        assert_eq!(
            SagepayNotificationStatus::from("REJECTED"),
            SagepayNotificationStatus::Other("REJECTED".to_string())
        );
        assert_eq!(SagepayNotificationStatus::from("ERROR").to_string(), "ERROR");
        assert_eq!(SagepayCardType::from("MC"), SagepayCardType::Mc);
    }

    #[test]
    fn test_confirm_body() {
        let request = scenario_request(scenario_fields());
        let response = request.send().unwrap();
        let acknowledgement = response.confirm("https://example.com/thanks");

        assert_eq!(acknowledgement.content_type, "text/plain");
        assert_eq!(
            acknowledgement.into_bytes(),
            b"Status=OK\r\nStatusDetail=All Good\r\nRedirectURL=https://example.com/thanks".to_vec()
        );
    }

    #[test]
    fn test_rejection_replies() {
        assert_eq!(
            SagepayServerReply::invalid("https://example.com/failed", "Signature mismatch")
                .to_body(),
            "Status=INVALID\r\nStatusDetail=Signature mismatch\r\nRedirectURL=https://example.com/failed"
        );
        assert_eq!(
            SagepayServerReply::error("https://example.com/failed", "Unknown transaction")
                .to_body(),
            "Status=ERROR\r\nStatusDetail=Unknown transaction\r\nRedirectURL=https://example.com/failed"
        );
    }

    #[test]
    fn test_get_data_returns_all_posted_fields() {
        let mut notification = scenario_fields();
        notification
            .additional_fields
            .insert("GiftAid".to_string(), "0".to_string());
        let request = scenario_request(notification.clone());

        let data = request.get_data().unwrap();
        assert_eq!(data, notification);
        assert_eq!(data.get("GiftAid"), Some("0"));
        assert_eq!(data.get("Status"), Some("OK"));
        assert_eq!(data.get("3DSecureStatus"), None);
    }

    #[test]
    fn test_request_transaction_id_comes_from_the_notification() {
        let mut notification = scenario_fields();
        notification.vendor_tx_code = Some("posted-code".to_string());
        let request = scenario_request(notification);

        assert_eq!(request.request_transaction_id(), Some("posted-code"));
        let response = request.send().unwrap();
        assert_eq!(response.transaction_id(), Some("posted-code"));
    }

    #[test]
    fn test_decodes_form_encoded_notification() {
        let body = format!(
            "VPSProtocol=3.00&TxType=TOKEN&VendorTxCode=VTC1&Status=OK&StatusDetail=0000+%3A+The+Authorisation+was+Successful.\
             &TxAuthNo=111&Token=tok-abc&CardType=VISA&Last4Digits=0006&ExpiryDate=1230&VPSSignature={}",
            SCENARIO_SIGNATURE.to_uppercase()
        );
        let details = RequestDetails {
            method: HttpMethod::Post,
            uri: Some("/sagepay/server/complete-create-card".to_string()),
            headers: HashMap::new(),
            body: body.into_bytes(),
            query_params: None,
        };

        let mut request = ServerCompleteCreateCardRequest::try_from_request(&details).unwrap();
        request
            .set_vendor("acme")
            .set_transaction_reference(scenario_reference());
        let response = request.send().unwrap();

        assert_eq!(response.card_network(), Some(SagepayCardType::Visa));
        assert_eq!(response.last4_digits(), Some("0006"));
        assert_eq!(
            response.data().get("StatusDetail"),
            Some("0000 : The Authorisation was Successful.")
        );
        assert_eq!(response.data().get("TxType"), Some("TOKEN"));
    }

    #[test]
    fn test_duplicate_keys_keep_the_last_value() {
        let notification = fields(&[("Status", "ERROR"), ("Status", "OK"), ("X", "1"), ("X", "2")]);
        assert_eq!(notification.status.as_deref(), Some("OK"));
        assert_eq!(notification.get("X"), Some("2"));
    }

    fn md5_hex(message: &str) -> String {
        use common_utils::crypto::GenerateDigest;

        hex::encode(
            common_utils::crypto::Md5
                .generate_digest(message.as_bytes())
                .unwrap(),
        )
    }
}
