// ABOUTME: Error types for model lookups backed by persisted numeric codes.
// ABOUTME: Unknown codes are surfaced as errors and never defaulted.

use thiserror::Error;

/// Errors raised when a stored code or name does not map to a model value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A download error code outside the persisted table.
    #[error("unknown code: {0}")]
    UnknownDownloadErrorCode(i32),

    /// A sort order code that no variant carries.
    #[error("unsupported sort order code: {0}")]
    UnsupportedSortOrderCode(i64),

    /// A sort order code string that is not an integer.
    #[error("invalid sort order code string: {0:?}")]
    InvalidSortOrderCode(String),

    /// A sort order name that is not a variant name.
    #[error("unknown sort order name: {0:?}")]
    UnknownSortOrderName(String),

    /// A volume adaption value outside the known settings.
    #[error("cannot map value to VolumeAdaptionSetting: {0}")]
    UnknownVolumeAdaption(i32),

    /// A feed file type code outside the known types.
    #[error("unknown feed file type: {0}")]
    UnknownFeedFileType(i32),
}
