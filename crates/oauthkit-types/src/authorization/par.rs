//! Pushed authorization request responses (RFC 9126 §2.2)

use serde::{Deserialize, Deserializer, Serialize};

use crate::authorization::RequestUri;

fn absolute_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(i64::unsigned_abs)
}

/// The server's answer to a pushed authorization request
///
/// A negative `expires_in` is taken as its absolute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParResponse {
    /// Reference to the pushed request, used as `request_uri` at the authorization endpoint
    pub request_uri: RequestUri,

    /// Lifetime of `request_uri` in seconds
    #[serde(deserialize_with = "absolute_seconds")]
    pub expires_in: u64,
}

impl ParResponse {
    /// Build a response
    pub fn new(request_uri: RequestUri, expires_in: i64) -> Self {
        Self {
            request_uri,
            expires_in: expires_in.unsigned_abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_par_response_decoding() {
        let response: ParResponse = serde_json::from_value(json!({
            "request_uri": "urn:ietf:params:oauth:request_uri:6esc_11ACC5bwc014ltc14eY22c",
            "expires_in": 60
        }))
        .unwrap();
        assert_eq!(response.expires_in, 60);
    }

    #[test]
    fn test_negative_lifetime_is_absolute() {
        let response: ParResponse = serde_json::from_value(json!({
            "request_uri": "urn:ietf:params:oauth:request_uri:abc",
            "expires_in": -90
        }))
        .unwrap();
        assert_eq!(response.expires_in, 90);

        let built = ParResponse::new(RequestUri::new("urn:example:x").unwrap(), -5);
        assert_eq!(built.expires_in, 5);
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            json!({"request_uri": "urn:example:x", "expires_in": 5})
        );
    }

    #[test]
    fn test_request_uri_must_be_a_uri() {
        assert!(
            serde_json::from_value::<ParResponse>(json!({"request_uri": "abc", "expires_in": 60}))
                .is_err()
        );
    }
}
