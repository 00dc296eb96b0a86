use thiserror::Error;

use crate::core::ElementId;

pub type SiteResult<T> = Result<T, SiteError>;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
