pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] tonic::transport::Error),

    #[error("failed to connect: {0}")]
    Connect(#[source] tonic::transport::Error),

    #[error("invalid metadata key: {0}")]
    MetadataKey(String),

    #[error("invalid metadata value for '{key}': {value}")]
    MetadataValue { key: String, value: String },
}
