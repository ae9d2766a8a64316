pub mod api;
pub mod image;

use async_trait::async_trait;

use crate::gallery::file::SelectedFile;
use self::image::{ImageId, ImageRecord};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    ReqwestError( #[from] reqwest::Error ),
    #[error(transparent)]
    IoError( #[from] std::io::Error ),
    #[error(transparent)]
    JsonError( #[from] serde_json::Error ),
    #[error(transparent)]
    UrlError( #[from] url::ParseError ),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    ResponseError(String),
}

impl ApiError {
    /// Everything except a well-formed `success: false` reply counts as a
    /// transport failure.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::ResponseError(_))
    }
}

/// The four calls the gallery makes against the image service.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError>;

    async fn upload_image(&self, file: &SelectedFile) -> Result<String, ApiError>;

    async fn delete_image(&self, id: &ImageId) -> Result<String, ApiError>;
}
