use std::fmt;

use serde::{Deserialize, Deserializer};

use super::ApiError;

/// Identifier of a stored image. The service hands it out either as a
/// string or as a bare number; both are kept as their textual form so that
/// cards can be matched by exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        ImageId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ImageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let id = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };
        Ok(ImageId(id))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub id: ImageId,
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub created_at: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Body shared by every JSON endpoint of the service.
///
/// `detail` is what the service sends instead of `message` when a route
/// answers with a plain HTTP error (unknown id on show/download).
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn text(&mut self) -> String {
        self.message
            .take()
            .or_else(|| self.detail.take())
            .unwrap_or_default()
    }

    /// Message of a successful reply, or the service-authored failure.
    pub fn into_message(mut self) -> Result<String, ApiError> {
        let text = self.text();
        if self.success {
            Ok(text)
        } else {
            Err(ApiError::ResponseError(text))
        }
    }

    /// Payload of a successful reply. A successful reply without `data` is
    /// malformed, not a service failure.
    pub fn into_data(mut self) -> Result<T, ApiError> {
        let text = self.text();
        if !self.success {
            return Err(ApiError::ResponseError(text));
        }
        self.data
            .ok_or(ApiError::MalformedResponse("missing `data` field".to_owned()))
    }
}

#[derive(Deserialize, Debug)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_reply_keeps_server_order() {
        let body = r#"{"success":true,"message":"ok","data":[
            {"id":"b","filename":"b.png","url":"/static/images/b.png","size":10,"created_at":"2024-01-01T10:00:00"},
            {"id":"a","filename":"a.png","url":"/static/images/a.png","size":20,"created_at":"2024-01-01T09:00:00","mime_type":"image/png"}
        ]}"#;
        let envelope: Envelope<Vec<ImageRecord>> = serde_json::from_str(body).unwrap();
        let records = envelope.into_data().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(records[0].mime_type, None);
        assert_eq!(records[1].mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn numeric_id_matches_its_text() {
        let body = r#"{"id":7,"filename":"x.gif","url":"/x","size":0,"created_at":"2024-01-01T00:00:00Z"}"#;
        let record: ImageRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.id, ImageId::new("7"));
    }

    #[test]
    fn failure_message_passes_through() {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{"success":false,"message":"Image not found","data":null}"#).unwrap();
        match envelope.into_message() {
            Err(ApiError::ResponseError(text)) => assert_eq!(text, "Image not found"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn http_error_detail_is_a_service_failure() {
        let envelope: Envelope<ImageRecord> =
            serde_json::from_str(r#"{"detail":"Image does not exist"}"#).unwrap();
        match envelope.into_data() {
            Err(ApiError::ResponseError(text)) => assert_eq!(text, "Image does not exist"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn success_without_data_is_malformed() {
        let envelope: Envelope<Vec<ImageRecord>> =
            serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(err.is_transport());
    }
}
