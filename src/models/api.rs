//! JSON shapes exchanged between the server and the client controller.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{GeoPoint, Offer};

/// Response wrapper used by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            path: None,
            timestamp: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            path: None,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(iso_timestamp(at));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Payload of a successful `/api/offers` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OffersPayload {
    pub offers: Vec<Offer>,
    pub total: usize,
    pub location: GeoPoint,
    pub radius: f64,
}

/// Payload of `/api/info`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerInfo {
    pub name: String,
    pub port: u16,
    pub env: String,
    /// Seconds since startup
    pub uptime: f64,
    pub timestamp: String,
}

/// Payload of `/api/status`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    pub uptime: f64,
    pub timestamp: String,
}

/// ISO 8601 UTC timestamp with millisecond precision, e.g. `2025-01-02T03:04:05.678Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_uses_millis_and_z_suffix() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2025-01-02T03:04:05.000Z");
    }

    #[test]
    fn offers_envelope_decodes_with_and_without_data() {
        let ok: Envelope<OffersPayload> = serde_json::from_str(
            r#"{"success":true,"data":{"offers":[],"total":0,"location":{"lat":1.0,"lon":2.0},"radius":5.0},"timestamp":"2025-01-02T03:04:05.000Z"}"#,
        )
        .unwrap();
        assert_eq!(ok.data.unwrap().location, GeoPoint::new(1.0, 2.0));

        let failed: Envelope<OffersPayload> =
            serde_json::from_str(r#"{"success":false,"error":"x"}"#).unwrap();
        assert!(failed.data.is_none());
        assert_eq!(failed.error.as_deref(), Some("x"));
    }

    #[test]
    fn failure_envelope_skips_empty_fields() {
        let envelope: Envelope<()> = Envelope::failure("boom").with_path("/nope");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"success": false, "error": "boom", "path": "/nope"})
        );
    }
}
