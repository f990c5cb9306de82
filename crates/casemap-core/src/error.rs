pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] casemap_layout::Error),

    #[error("Invalid config value at `{key}`: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}
