use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;

#[cfg(feature = "python")]
mod py {
    use pyo3::exceptions::PyRuntimeError;
    use pyo3::PyErr;

    use super::PrepError;

    impl From<PrepError> for PyErr {
        fn from(err: PrepError) -> PyErr {
            PyRuntimeError::new_err(err.to_string())
        }
    }

    impl From<PyErr> for PrepError {
        fn from(err: PyErr) -> Self {
            PrepError::General(err.to_string())
        }
    }
}
