use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;

use crate::domain::chart_data::ChartData;
use crate::domain::export::TimeSeriesRecord;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Weekly points in each trend series
pub const DEMO_WEEKS: u64 = 7;
/// Months in the consultations series
pub const DEMO_MONTHS: u32 = 6;

/// Synthesizes plausible chart data when the backend has none.
pub struct DemoChartGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> DemoChartGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Series anchored on `today`, oldest point first.
    pub fn generate(&mut self, today: NaiveDate) -> ChartData {
        let mut health = Vec::new();
        let mut vitals = Vec::new();
        let mut sleep = Vec::new();

        for weeks_back in (0..DEMO_WEEKS).rev() {
            let day = today
                .checked_sub_days(Days::new(weeks_back * 7))
                .unwrap_or(today);
            let date = format!("{}/{}", day.month(), day.day());

            health.push(
                TimeSeriesRecord::new()
                    .with("date", date.clone())
                    .with("score", self.rng.random_range(70..=90_i64)),
            );
            vitals.push(
                TimeSeriesRecord::new()
                    .with("date", date.clone())
                    .with("bp_sys", self.rng.random_range(110..=130_i64))
                    .with("hr", self.rng.random_range(65..=77_i64))
                    .with("sugar", self.rng.random_range(85..=105_i64)),
            );
            sleep.push(
                TimeSeriesRecord::new()
                    .with("date", date)
                    .with("hours", self.rng.random_range(6..=9_i64)),
            );
        }

        let current = today.month0();
        let consultations = (0..DEMO_MONTHS)
            .rev()
            .map(|back| {
                let month = MONTHS[((current + 12 - back) % 12) as usize];
                TimeSeriesRecord::new()
                    .with("month", month)
                    .with("count", self.rng.random_range(0..=3_i64))
            })
            .collect();

        let reminders = vec![
            TimeSeriesRecord::new()
                .with("name", "Paracetamol")
                .with("takenPercent", 85),
            TimeSeriesRecord::new()
                .with("name", "Vitamin D")
                .with("takenPercent", 60),
        ];

        ChartData {
            health_trend: Some(health),
            sleep_trend: Some(sleep),
            vitals_trend: Some(vitals),
            consultations_by_month: Some(consultations),
            reminders_adherence: Some(reminders),
        }
    }
}
