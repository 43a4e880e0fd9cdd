use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value '{1}' for environment variable {0}")]
    InvalidEnv(String, String),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
