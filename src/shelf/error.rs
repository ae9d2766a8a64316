use crate::gallery::error::FlowError;
use crate::service::ApiError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ApiError( #[from] ApiError ),
    #[error(transparent)]
    FlowError( #[from] FlowError ),
    #[error(transparent)]
    IoError( #[from] std::io::Error ),
    #[error(transparent)]
    YamlError( #[from] serde_yaml::Error ),
    #[error(transparent)]
    UrlError( #[from] url::ParseError ),
    #[error("Error: {0}")]
    ShelfError(String),
}
