/// CLI error types
use snippets_carousel::CarouselError;
use snippets_core::SnippetsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(#[from] SnippetsError),

    #[error("Carousel error: {0}")]
    Carousel(#[from] CarouselError),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
