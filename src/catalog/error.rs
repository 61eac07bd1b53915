use thiserror::Error;

/// Document-level parse failures. Row-level problems never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no table found in document")]
    StructureNotFound,
}
