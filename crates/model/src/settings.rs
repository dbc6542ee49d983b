// ABOUTME: Per-feed preference enums with stable stored integers.
// ABOUTME: VolumeAdaptionSetting carries a gain factor; FeedCounter picks the badge count.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Playback volume adjustment applied to every episode of a feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeAdaptionSetting {
    #[default]
    Off,
    LightReduction,
    HeavyReduction,
    LightBoost,
    MediumBoost,
    HeavyBoost,
}

impl VolumeAdaptionSetting {
    const ALL: [VolumeAdaptionSetting; 6] = [
        VolumeAdaptionSetting::Off,
        VolumeAdaptionSetting::LightReduction,
        VolumeAdaptionSetting::HeavyReduction,
        VolumeAdaptionSetting::LightBoost,
        VolumeAdaptionSetting::MediumBoost,
        VolumeAdaptionSetting::HeavyBoost,
    ];

    pub fn from_integer(value: i32) -> Result<Self, ModelError> {
        Self::ALL
            .into_iter()
            .find(|setting| setting.to_integer() == value)
            .ok_or(ModelError::UnknownVolumeAdaption(value))
    }

    pub fn to_integer(self) -> i32 {
        match self {
            VolumeAdaptionSetting::Off => 0,
            VolumeAdaptionSetting::LightReduction => 1,
            VolumeAdaptionSetting::HeavyReduction => 2,
            VolumeAdaptionSetting::LightBoost => 3,
            VolumeAdaptionSetting::MediumBoost => 4,
            VolumeAdaptionSetting::HeavyBoost => 5,
        }
    }

    /// Gain multiplier applied to the audio signal.
    pub fn adaption_factor(self) -> f32 {
        match self {
            VolumeAdaptionSetting::Off => 1.0,
            VolumeAdaptionSetting::LightReduction => 0.5,
            VolumeAdaptionSetting::HeavyReduction => 0.2,
            VolumeAdaptionSetting::LightBoost => 1.5,
            VolumeAdaptionSetting::MediumBoost => 2.0,
            VolumeAdaptionSetting::HeavyBoost => 2.5,
        }
    }
}

/// Which count is shown next to a feed in lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedCounter {
    ShowNew,
    ShowUnplayed,
    #[default]
    ShowNone,
    ShowDownloaded,
    ShowDownloadedUnplayed,
}

impl FeedCounter {
    pub fn id(self) -> i32 {
        match self {
            FeedCounter::ShowNew => 1,
            FeedCounter::ShowUnplayed => 2,
            FeedCounter::ShowNone => 3,
            FeedCounter::ShowDownloaded => 4,
            FeedCounter::ShowDownloadedUnplayed => 5,
        }
    }

    /// Unknown ids fall back to `ShowNone`; this is a display preference, not a contract.
    pub fn from_ordinal(id: i32) -> Self {
        [
            FeedCounter::ShowNew,
            FeedCounter::ShowUnplayed,
            FeedCounter::ShowNone,
            FeedCounter::ShowDownloaded,
            FeedCounter::ShowDownloadedUnplayed,
        ]
        .into_iter()
        .find(|counter| counter.id() == id)
        .unwrap_or(FeedCounter::ShowNone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_adaption_round_trips_and_rejects_unknown() {
        for value in 0..=5 {
            assert_eq!(VolumeAdaptionSetting::from_integer(value).unwrap().to_integer(), value);
        }
        assert_eq!(
            VolumeAdaptionSetting::from_integer(6),
            Err(ModelError::UnknownVolumeAdaption(6))
        );
        assert_eq!(VolumeAdaptionSetting::HeavyReduction.adaption_factor(), 0.2);
    }

    #[test]
    fn feed_counter_defaults_to_none() {
        assert_eq!(FeedCounter::from_ordinal(4), FeedCounter::ShowDownloaded);
        assert_eq!(FeedCounter::from_ordinal(42), FeedCounter::ShowNone);
    }
}
