//! Reply insertion errors.

use thiserror::Error;

use super::{ClipboardError, PageError};

#[derive(Debug, Error)]
pub enum InsertError {
    #[error("No editable element in the editor")]
    NoEditable,

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
