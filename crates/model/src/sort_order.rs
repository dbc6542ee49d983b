// ABOUTME: Episode sort orders with stable stored codes and a validity scope.
// ABOUTME: Codes 1-10 sort inside one feed, 101-105 sort across feeds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Where a sort order may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    IntraFeed,
    InterFeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    DateOldNew,
    DateNewOld,
    EpisodeTitleAZ,
    EpisodeTitleZA,
    DurationShortLong,
    DurationLongShort,
    EpisodeFilenameAZ,
    EpisodeFilenameZA,
    SizeSmallLarge,
    SizeLargeSmall,
    FeedTitleAZ,
    FeedTitleZA,
    Random,
    SmartShuffleOldNew,
    SmartShuffleNewOld,
}

/// Every variant with its stored code, stored name and scope.
const TABLE: [(SortOrder, i64, &str, Scope); 15] = [
    (SortOrder::DateOldNew, 1, "DATE_OLD_NEW", Scope::IntraFeed),
    (SortOrder::DateNewOld, 2, "DATE_NEW_OLD", Scope::IntraFeed),
    (SortOrder::EpisodeTitleAZ, 3, "EPISODE_TITLE_A_Z", Scope::IntraFeed),
    (SortOrder::EpisodeTitleZA, 4, "EPISODE_TITLE_Z_A", Scope::IntraFeed),
    (SortOrder::DurationShortLong, 5, "DURATION_SHORT_LONG", Scope::IntraFeed),
    (SortOrder::DurationLongShort, 6, "DURATION_LONG_SHORT", Scope::IntraFeed),
    (SortOrder::EpisodeFilenameAZ, 7, "EPISODE_FILENAME_A_Z", Scope::IntraFeed),
    (SortOrder::EpisodeFilenameZA, 8, "EPISODE_FILENAME_Z_A", Scope::IntraFeed),
    (SortOrder::SizeSmallLarge, 9, "SIZE_SMALL_LARGE", Scope::IntraFeed),
    (SortOrder::SizeLargeSmall, 10, "SIZE_LARGE_SMALL", Scope::IntraFeed),
    (SortOrder::FeedTitleAZ, 101, "FEED_TITLE_A_Z", Scope::InterFeed),
    (SortOrder::FeedTitleZA, 102, "FEED_TITLE_Z_A", Scope::InterFeed),
    (SortOrder::Random, 103, "RANDOM", Scope::InterFeed),
    (SortOrder::SmartShuffleOldNew, 104, "SMART_SHUFFLE_OLD_NEW", Scope::InterFeed),
    (SortOrder::SmartShuffleNewOld, 105, "SMART_SHUFFLE_NEW_OLD", Scope::InterFeed),
];

impl SortOrder {
    fn entry(self) -> &'static (SortOrder, i64, &'static str, Scope) {
        // The table lists every variant in declaration order.
        &TABLE[self as usize]
    }

    pub fn values() -> impl Iterator<Item = SortOrder> {
        TABLE.iter().map(|(order, ..)| *order)
    }

    pub fn code(self) -> i64 {
        self.entry().1
    }

    /// The stored variant name, e.g. `DATE_NEW_OLD`.
    pub fn name(self) -> &'static str {
        self.entry().2
    }

    pub fn scope(self) -> Scope {
        self.entry().3
    }

    pub fn from_code(code: i64) -> Result<Self, ModelError> {
        TABLE
            .iter()
            .find(|(_, c, ..)| *c == code)
            .map(|(order, ..)| *order)
            .ok_or(ModelError::UnsupportedSortOrderCode(code))
    }

    /// Parses a stored code string. Absent or empty input is `Ok(None)`; a
    /// non-numeric or unknown code is an error.
    pub fn from_code_string(code: Option<&str>) -> Result<Option<Self>, ModelError> {
        let Some(code) = code.filter(|c| !c.is_empty()) else {
            return Ok(None);
        };
        let parsed: i64 = code
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidSortOrderCode(code.to_string()))?;
        Self::from_code(parsed).map(Some)
    }

    pub fn to_code_string(order: Option<SortOrder>) -> Option<String> {
        order.map(|o| o.code().to_string())
    }

    /// Parses a variant name, falling back to `default` when it is unknown.
    pub fn parse_with_default(value: &str, default: SortOrder) -> SortOrder {
        value.parse().unwrap_or(default)
    }

    pub fn values_of<S: AsRef<str>>(names: &[S]) -> Result<Vec<SortOrder>, ModelError> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl FromStr for SortOrder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TABLE
            .iter()
            .find(|(_, _, name, _)| *name == s)
            .map(|(order, ..)| *order)
            .ok_or_else(|| ModelError::UnknownSortOrderName(s.to_string()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
