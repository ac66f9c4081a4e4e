//! Error type for mounting.

use thiserror::Error;

/// Errors produced when mounting a builder into a document.
///
/// Anchor resolution failures are fatal to that mount and leave nothing
/// mounted; no partial tree is ever produced by a failed [`crate::App::mount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The anchor selector resolved to no attached element.
    #[error("no element matches anchor selector `{0}`")]
    AnchorNotFound(String),
    /// The anchor selector is not something the document can resolve.
    #[error("unsupported anchor selector `{0}`")]
    InvalidSelector(String),
}
