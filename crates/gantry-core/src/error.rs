pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid export options: {message}")]
    InvalidOptions { message: String },

    #[error("Invalid page options: {message}")]
    InvalidPage { message: String },

    #[error("Invalid date: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Invalid date range: {value:?} (expected <start>..<end>)")]
    InvalidDateRange { value: String },

    #[error("Invalid task {id:?}: {message}")]
    InvalidTask { id: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
