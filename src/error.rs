use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("cannot serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
