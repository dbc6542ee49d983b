// ABOUTME: Download outcome value types: error codes, completed results and live status.
// ABOUTME: DownloadError codes are persisted and must never be renumbered.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Outcome class of a download. The numeric codes are a storage contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum DownloadError {
    Success,
    ParserException,
    UnsupportedType,
    ConnectionError,
    MalformedUrl,
    IoError,
    FileExists,
    DownloadCancelled,
    DeviceNotFound,
    HttpDataError,
    NotEnoughSpace,
    UnknownHost,
    RequestError,
    DbAccessError,
    Unauthorized,
    FileType,
    Forbidden,
    IoWrongSize,
    IoBlocked,
    UnsupportedTypeHtml,
    NotFound,
    Certificate,
    ParserExceptionDuplicate,
}

impl DownloadError {
    const ALL: [DownloadError; 23] = [
        DownloadError::Success,
        DownloadError::ParserException,
        DownloadError::UnsupportedType,
        DownloadError::ConnectionError,
        DownloadError::MalformedUrl,
        DownloadError::IoError,
        DownloadError::FileExists,
        DownloadError::DownloadCancelled,
        DownloadError::DeviceNotFound,
        DownloadError::HttpDataError,
        DownloadError::NotEnoughSpace,
        DownloadError::UnknownHost,
        DownloadError::RequestError,
        DownloadError::DbAccessError,
        DownloadError::Unauthorized,
        DownloadError::FileType,
        DownloadError::Forbidden,
        DownloadError::IoWrongSize,
        DownloadError::IoBlocked,
        DownloadError::UnsupportedTypeHtml,
        DownloadError::NotFound,
        DownloadError::Certificate,
        DownloadError::ParserExceptionDuplicate,
    ];

    /// Machine-readable code.
    pub fn code(self) -> i32 {
        match self {
            DownloadError::Success => 0,
            DownloadError::ParserException => 1,
            DownloadError::UnsupportedType => 2,
            DownloadError::ConnectionError => 3,
            DownloadError::MalformedUrl => 4,
            DownloadError::IoError => 5,
            DownloadError::FileExists => 6,
            DownloadError::DownloadCancelled => 7,
            DownloadError::DeviceNotFound => 8,
            DownloadError::HttpDataError => 9,
            DownloadError::NotEnoughSpace => 10,
            DownloadError::UnknownHost => 11,
            DownloadError::RequestError => 12,
            DownloadError::DbAccessError => 13,
            DownloadError::Unauthorized => 14,
            DownloadError::FileType => 15,
            DownloadError::Forbidden => 16,
            DownloadError::IoWrongSize => 17,
            DownloadError::IoBlocked => 18,
            DownloadError::UnsupportedTypeHtml => 19,
            DownloadError::NotFound => 20,
            DownloadError::Certificate => 21,
            DownloadError::ParserExceptionDuplicate => 22,
        }
    }

    /// Looks a code up. Codes outside 0..=22 are an error, never a default.
    pub fn from_code(code: i32) -> Result<Self, ModelError> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.code() == code)
            .ok_or(ModelError::UnknownDownloadErrorCode(code))
    }

    pub fn is_success(self) -> bool {
        self == DownloadError::Success
    }
}

impl From<DownloadError> for i32 {
    fn from(reason: DownloadError) -> Self {
        reason.code()
    }
}

impl TryFrom<i32> for DownloadError {
    type Error = ModelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        DownloadError::from_code(code)
    }
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DownloadError::Success => "success",
            DownloadError::ParserException => "parser exception",
            DownloadError::UnsupportedType => "unsupported type",
            DownloadError::ConnectionError => "connection error",
            DownloadError::MalformedUrl => "malformed URL",
            DownloadError::IoError => "I/O error",
            DownloadError::FileExists => "file exists",
            DownloadError::DownloadCancelled => "download cancelled",
            DownloadError::DeviceNotFound => "device not found",
            DownloadError::HttpDataError => "HTTP data error",
            DownloadError::NotEnoughSpace => "not enough space",
            DownloadError::UnknownHost => "unknown host",
            DownloadError::RequestError => "request error",
            DownloadError::DbAccessError => "database access error",
            DownloadError::Unauthorized => "unauthorized",
            DownloadError::FileType => "wrong file type",
            DownloadError::Forbidden => "forbidden",
            DownloadError::IoWrongSize => "wrong size",
            DownloadError::IoBlocked => "blocked",
            DownloadError::UnsupportedTypeHtml => "unsupported type (HTML)",
            DownloadError::NotFound => "not found",
            DownloadError::Certificate => "certificate error",
            DownloadError::ParserExceptionDuplicate => "duplicate feed",
        };
        write!(f, "{}", s)
    }
}

/// What kind of feed file a download result refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum FeedFileType {
    Feed,
    Image,
    Media,
}

impl FeedFileType {
    pub fn code(self) -> i32 {
        match self {
            FeedFileType::Feed => 0,
            FeedFileType::Image => 1,
            FeedFileType::Media => 2,
        }
    }
}

impl From<FeedFileType> for i32 {
    fn from(kind: FeedFileType) -> Self {
        kind.code()
    }
}

impl TryFrom<i32> for FeedFileType {
    type Error = ModelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FeedFileType::Feed),
            1 => Ok(FeedFileType::Image),
            2 => Ok(FeedFileType::Media),
            other => Err(ModelError::UnknownFeedFileType(other)),
        }
    }
}

/// Outcome of one completed download.
///
/// Only the persistence id and the three terminal setters mutate a result
/// after construction. The setters overwrite each other freely: calling
/// `set_failed` after `set_successful` simply replaces the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadResult {
    id: i64,
    title: String,
    feedfile_id: i64,
    feedfile_type: FeedFileType,
    reason: DownloadError,
    reason_detailed: Option<String>,
    successful: bool,
    completion_date: DateTime<Utc>,
}

impl DownloadResult {
    /// Size value downloaders use when the content length is unknown.
    pub const SIZE_UNKNOWN: i64 = -1;

    /// Creates a result for a download that just completed.
    pub fn new(
        feedfile_id: i64,
        feedfile_type: FeedFileType,
        title: impl Into<String>,
        reason: DownloadError,
        successful: bool,
        reason_detailed: Option<String>,
    ) -> Self {
        Self::restore(
            0,
            title,
            feedfile_id,
            feedfile_type,
            successful,
            reason,
            Utc::now(),
            reason_detailed,
        )
    }

    /// Rebuilds a stored result.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: i64,
        title: impl Into<String>,
        feedfile_id: i64,
        feedfile_type: FeedFileType,
        successful: bool,
        reason: DownloadError,
        completion_date: DateTime<Utc>,
        reason_detailed: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            feedfile_id,
            feedfile_type,
            reason,
            reason_detailed,
            successful,
            completion_date,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn feedfile_id(&self) -> i64 {
        self.feedfile_id
    }

    pub fn feedfile_type(&self) -> FeedFileType {
        self.feedfile_type
    }

    pub fn reason(&self) -> DownloadError {
        self.reason
    }

    /// Message for the user explaining a failure.
    pub fn reason_detailed(&self) -> Option<&str> {
        self.reason_detailed.as_deref()
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    pub fn completion_date(&self) -> DateTime<Utc> {
        self.completion_date
    }

    pub fn set_successful(&mut self) {
        self.successful = true;
        self.reason = DownloadError::Success;
    }

    pub fn set_failed(&mut self, reason: DownloadError, reason_detailed: impl Into<String>) {
        self.successful = false;
        self.reason = reason;
        self.reason_detailed = Some(reason_detailed.into());
    }

    pub fn set_cancelled(&mut self) {
        self.successful = false;
        self.reason = DownloadError::DownloadCancelled;
    }

    pub fn is_cancelled(&self) -> bool {
        !self.successful && self.reason == DownloadError::DownloadCancelled
    }
}

impl fmt::Display for DownloadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DownloadResult [id={}, title={}, reason={}, reason_detailed={}, successful={}, completion_date={}, feedfile_id={}, feedfile_type={}]",
            self.id,
            self.title,
            self.reason,
            self.reason_detailed.as_deref().unwrap_or("-"),
            self.successful,
            self.completion_date.to_rfc3339(),
            self.feedfile_id,
            self.feedfile_type.code(),
        )
    }
}

/// Orders results by completion date, most recent first.
pub fn compare_by_completion_date(lhs: &DownloadResult, rhs: &DownloadResult) -> Ordering {
    rhs.completion_date.cmp(&lhs.completion_date)
}

/// Stable sort by completion date, most recent first; ties keep input order.
pub fn sort_by_completion_date(results: &mut [DownloadResult]) {
    results.sort_by(compare_by_completion_date);
}

/// Lifecycle of a download as reported to live listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    Queued,
    Running,
    /// Both successful and unsuccessful completion.
    Completed,
}

impl DownloadState {
    pub fn code(self) -> i32 {
        match self {
            DownloadState::Queued => 0,
            DownloadState::Completed => 1,
            DownloadState::Running => 2,
        }
    }
}

/// Snapshot of one download for progress reporting. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStatus {
    pub state: DownloadState,
    pub progress: i32,
}

impl DownloadStatus {
    pub fn new(state: DownloadState, progress: i32) -> Self {
        Self { state, progress }
    }

    pub fn queued() -> Self {
        Self::new(DownloadState::Queued, 0)
    }

    pub fn running(progress: i32) -> Self {
        Self::new(DownloadState::Running, progress)
    }

    pub fn completed() -> Self {
        Self::new(DownloadState::Completed, 100)
    }
}
