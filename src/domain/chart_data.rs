use serde::{Deserialize, Serialize};

use super::export::{AvailableSeries, TimeSeriesRecord};

pub const HEALTH_TREND: &str = "healthTrend";
pub const SLEEP_TREND: &str = "sleepTrend";
pub const VITALS_TREND: &str = "vitalsTrend";
pub const CONSULTATIONS_BY_MONTH: &str = "consultationsByMonth";
pub const REMINDERS_ADHERENCE: &str = "remindersAdherence";

/// Every series key the `chart_data` payload can carry
pub const SERIES_KEYS: [&str; 5] = [
    HEALTH_TREND,
    SLEEP_TREND,
    VITALS_TREND,
    CONSULTATIONS_BY_MONTH,
    REMINDERS_ADHERENCE,
];

/// `chart_data` payload. `None` means the backend did not send the series,
/// which is different from sending an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_trend: Option<Vec<TimeSeriesRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_trend: Option<Vec<TimeSeriesRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals_trend: Option<Vec<TimeSeriesRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultations_by_month: Option<Vec<TimeSeriesRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders_adherence: Option<Vec<TimeSeriesRecord>>,
}

impl ChartData {
    pub fn is_known_series(key: &str) -> bool {
        SERIES_KEYS.contains(&key)
    }

    /// Whether the payload carries any trend series worth rendering
    pub fn has_trend_series(&self) -> bool {
        self.health_trend.is_some() || self.sleep_trend.is_some() || self.vitals_trend.is_some()
    }

    pub fn series(&self, key: &str) -> Option<&[TimeSeriesRecord]> {
        let series = match key {
            HEALTH_TREND => &self.health_trend,
            SLEEP_TREND => &self.sleep_trend,
            VITALS_TREND => &self.vitals_trend,
            CONSULTATIONS_BY_MONTH => &self.consultations_by_month,
            REMINDERS_ADHERENCE => &self.reminders_adherence,
            _ => return None,
        };
        series.as_deref()
    }

    /// Present series only, keyed by their payload name
    pub fn into_available_series(self) -> AvailableSeries {
        [
            (HEALTH_TREND, self.health_trend),
            (SLEEP_TREND, self.sleep_trend),
            (VITALS_TREND, self.vitals_trend),
            (CONSULTATIONS_BY_MONTH, self.consultations_by_month),
            (REMINDERS_ADHERENCE, self.reminders_adherence),
        ]
        .into_iter()
        .filter_map(|(key, records)| records.map(|r| (key.to_string(), r)))
        .collect()
    }
}
