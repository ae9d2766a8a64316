use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::gallery::file::SelectedFile;
use super::image::{Envelope, Health, ImageId, ImageRecord};
use super::{ApiError, ImageService};

const API_BASE: [&'static str; 2] = ["api", "images"];
const UPLOAD_FIELD: &'static str = "file";

/// Appends `segments` to the path of `base`, escaping each one.
fn api_path(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::UrlError(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn image_path(base: &Url, id: &ImageId, tail: Option<&str>) -> Result<Url, ApiError> {
    let mut segments: Vec<&str> = API_BASE.to_vec();
    segments.push(id.as_str());
    segments.extend(tail);
    api_path(base, &segments)
}

/// A body that is not the JSON envelope is a transport failure.
fn parse<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>, ApiError> {
    let envelope = serde_json::from_str::<Envelope<T>>(body)?;
    Ok(envelope)
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
    let body = response.text().await?;
    parse(&body)
}

pub struct Api {
    client: Client,
    base: Url,
}

impl Api {
    pub fn new(base: Url) -> Self {
        Api {
            client: Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub async fn get_image(&self, id: &ImageId) -> Result<ImageRecord, ApiError> {
        let url = image_path(&self.base, id, None)?;
        debug!("GET {}", url);
        let response = self.client
            .get(url)
            .send()
            .await?;
        read::<ImageRecord>(response).await?.into_data()
    }

    pub async fn download_image(&self, id: &ImageId) -> Result<Bytes, ApiError> {
        let url = image_path(&self.base, id, Some("download"))?;
        debug!("GET {}", url);
        let response = self.client
            .get(url)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return match read::<()>(response).await?.into_message() {
                Err(err) => Err(err),
                Ok(_) => Err(ApiError::MalformedResponse(format!("unexpected status {}", status))),
            };
        }
        let bytes = response.bytes().await?;
        Ok(bytes)
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        let url = api_path(&self.base, &["health"])?;
        debug!("GET {}", url);
        let response = self.client
            .get(url)
            .send()
            .await?;
        let body = response.text().await?;
        let health = serde_json::from_str::<Health>(&body)?;
        Ok(health)
    }
}

#[async_trait]
impl ImageService for Api {
    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError> {
        let url = api_path(&self.base, &API_BASE)?;
        debug!("GET {}", url);
        let response = self.client
            .get(url)
            .send()
            .await?;
        read::<Vec<ImageRecord>>(response).await?.into_data()
    }

    async fn upload_image(&self, file: &SelectedFile) -> Result<String, ApiError> {
        let url = api_path(&self.base, &API_BASE)?;
        debug!("POST {} ({}, {} bytes)", url, file.name(), file.len());
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_owned())
            .mime_str(file.content_type())?;
        let form = Form::new().part(UPLOAD_FIELD, part);
        let response = self.client
            .post(url)
            .multipart(form)
            .send()
            .await?;
        read::<serde_json::Value>(response).await?.into_message()
    }

    async fn delete_image(&self, id: &ImageId) -> Result<String, ApiError> {
        let url = image_path(&self.base, id, None)?;
        debug!("DELETE {}", url);
        let response = self.client
            .delete(url)
            .send()
            .await?;
        read::<serde_json::Value>(response).await?.into_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::error::FlowError;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn list_endpoint_from_bare_host() {
        let url = api_path(&base("http://localhost:8000"), &API_BASE).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/images");
    }

    #[test]
    fn endpoints_keep_base_prefix() {
        let url = image_path(&base("http://host/shelf/"), &ImageId::new("42"), Some("download")).unwrap();
        assert_eq!(url.as_str(), "http://host/shelf/api/images/42/download");
    }

    #[test]
    fn ids_are_escaped_as_one_segment() {
        let url = image_path(&base("http://host/"), &ImageId::new("a/b c"), None).unwrap();
        assert_eq!(url.as_str(), "http://host/api/images/a%2Fb%20c");
    }

    #[test]
    fn html_body_is_a_transport_failure() {
        let err = parse::<serde_json::Value>("<html><body>502 Bad Gateway</body></html>").unwrap_err();
        assert!(matches!(err, ApiError::JsonError(_)));
        assert!(err.is_transport());

        let flow = FlowError::from_api("Upload failed", err);
        assert_eq!(flow.to_string(), "Upload failed: expected value at line 1 column 1");
    }

    #[test]
    fn service_failure_body_parses() {
        let err = parse::<serde_json::Value>(r#"{"success":false,"message":"Unsupported file type"}"#)
            .unwrap()
            .into_message()
            .unwrap_err();
        assert!(!err.is_transport());
        assert_eq!(
            FlowError::from_api("Upload failed", err),
            FlowError::Service("Unsupported file type".to_owned())
        );
    }

    #[test]
    fn cannot_be_a_base_is_rejected() {
        let err = api_path(&base("mailto:someone@example.com"), &["health"]).unwrap_err();
        assert!(err.is_transport());
    }
}
