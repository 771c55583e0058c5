//! Host page adapter errors.

use thiserror::Error;

use crate::page::ElementHandle;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Element {0:?} is no longer attached to the page")]
    Detached(ElementHandle),

    #[error("Page query failed: {0}")]
    Query(String),

    #[error("Event dispatch failed: {0}")]
    Dispatch(String),
}
