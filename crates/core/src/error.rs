#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid display config: {0}")]
    InvalidConfig(String),
    #[error("failed to read display config: {0}")]
    ConfigRead(std::io::Error),
}

pub type DisplayResult<T> = std::result::Result<T, DisplayError>;
