//! Wire types for the booking backend.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: String,
}

/// Successful `POST /chat` response. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = ChatRequest {
            message: "What's available tomorrow?",
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "What's available tomorrow?");
        assert_eq!(json["session_id"], "abc");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"response":"Booked.","session_id":"abc"}"#).unwrap();
        assert_eq!(resp.response, "Booked.");
    }

    #[test]
    fn test_response_requires_response_field() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"reply":"x"}"#).is_err());
    }
}
