//! Tests for Daraja models.

use super::{RequestB2B, ResponseAsync, ResponseCode, password_encode};

mod response_code {
    use super::*;

    #[test]
    fn known_codes_parse_from_wire_value() {
        let body = r#"{
            "ConversationID": "AG_20191219_00005797af5d7d75f652",
            "OriginatorConversationID": "16740-34861180-1",
            "ResponseCode": "0",
            "ResponseDescription": "Accept the service request successfully."
        }"#;

        let out: ResponseAsync = serde_json::from_str(body).unwrap();

        assert_eq!(out.response_code, ResponseCode::SuccessSubmission);
        assert!(out.response_code.is_success());
    }

    #[test]
    fn unknown_code_is_kept_verbatim() {
        let code = ResponseCode::from("1032");

        assert_eq!(code, ResponseCode::Other("1032".to_string()));
        assert_eq!(code.to_string(), "1032");
        assert!(!code.is_success());
    }

    #[test]
    fn serializes_to_wire_value() {
        let json = serde_json::to_string(&ResponseCode::InvalidAccessToken).unwrap();

        assert_eq!(json, r#""404.001.03""#);
    }

    #[test]
    fn display_matches_from() {
        for code in [
            ResponseCode::SuccessSubmission,
            ResponseCode::InvalidAccessToken,
            ResponseCode::InvalidAuthHeader,
            ResponseCode::InvalidAuthType,
            ResponseCode::InvalidGrantType,
            ResponseCode::InternalServerError,
        ] {
            assert_eq!(ResponseCode::from(code.to_string()), code);
        }
    }
}

mod requests {
    use super::*;

    #[test]
    fn b2b_omits_empty_requester() {
        let json = serde_json::to_value(RequestB2B::default()).unwrap();

        assert!(json.get("Requester").is_none());
        assert!(json.get("RecieverIdentifierType").is_some());
        assert!(json.get("QueueTimeOutURL").is_some());
    }

    #[test]
    fn password_is_base64_of_concatenation() {
        // base64("174379" + "passkey" + "20240101120000")
        assert_eq!(
            password_encode("174379", "passkey", "20240101120000"),
            "MTc0Mzc5cGFzc2tleTIwMjQwMTAxMTIwMDAw"
        );
    }
}
