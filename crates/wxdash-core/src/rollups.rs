//! Daily rollups of 3-hour forecast samples

use crate::types::{DailySummary, RawSample, Timestamp};
use crate::units::{mps_to_kph, round_to_i64};
use chrono::{DateTime, NaiveDate};
use std::collections::HashMap;

/// Number of days kept by [`aggregate_forecast`]
pub const FORECAST_DAYS: usize = 5;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Aggregation type for rollups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateType {
    Min,
    Max,
    Sum,
    Avg,
}

/// Accumulator for calculating aggregates over multiple observations
#[derive(Debug, Clone)]
pub struct Accumulator {
    observations: Vec<f64>,
    aggregate_type: AggregateType,
}

impl Accumulator {
    pub fn new(aggregate_type: AggregateType) -> Self {
        Self {
            observations: Vec::new(),
            aggregate_type,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.observations.push(value);
    }

    pub fn result(&self) -> Option<f64> {
        if self.observations.is_empty() {
            return None;
        }

        Some(match self.aggregate_type {
            AggregateType::Min => self
                .observations
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min),
            AggregateType::Max => self
                .observations
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
            AggregateType::Sum => self.observations.iter().sum(),
            AggregateType::Avg => {
                let sum: f64 = self.observations.iter().sum();
                sum / self.observations.len() as f64
            }
        })
    }

    pub fn count(&self) -> usize {
        self.observations.len()
    }
}

/// Occurrence counts of condition labels, kept in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ConditionTally {
    counts: Vec<(String, usize)>,
}

impl ConditionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, condition: &str) {
        match self.counts.iter_mut().find(|(label, _)| label == condition) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((condition.to_string(), 1)),
        }
    }

    /// Most frequent label; on a tie the label seen first wins
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.counts {
            match best {
                Some((_, best_count)) if entry.1 <= *best_count => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(label, _)| label.as_str())
    }
}

/// UTC day index of a timestamp (days since 1970-01-01)
pub fn day_key(timestamp: Timestamp) -> i64 {
    timestamp.div_euclid(SECONDS_PER_DAY)
}

/// Calendar date for a day index, clamped to chrono's supported range
pub fn day_key_to_date(key: i64) -> NaiveDate {
    DateTime::from_timestamp(key.saturating_mul(SECONDS_PER_DAY), 0)
        .map(|dt| dt.date_naive())
        .unwrap_or(if key < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Samples sharing one UTC calendar day, in input order
#[derive(Debug)]
struct DayBucket<'a> {
    key: i64,
    samples: Vec<&'a RawSample>,
}

/// Group samples by UTC day in first-seen order, keeping at most `max_days` days
fn bucket_by_day(samples: &[RawSample], max_days: usize) -> Vec<DayBucket<'_>> {
    let mut buckets: Vec<DayBucket<'_>> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for sample in samples {
        let key = day_key(sample.timestamp_utc);
        match index.get(&key) {
            Some(&slot) => buckets[slot].samples.push(sample),
            None if buckets.len() < max_days => {
                index.insert(key, buckets.len());
                buckets.push(DayBucket {
                    key,
                    samples: vec![sample],
                });
            }
            // day beyond the cap
            None => {}
        }
    }

    buckets
}

fn summarize_day(bucket: &DayBucket<'_>) -> DailySummary {
    let mut high = Accumulator::new(AggregateType::Max);
    let mut low = Accumulator::new(AggregateType::Min);
    let mut humidity = Accumulator::new(AggregateType::Avg);
    let mut wind = Accumulator::new(AggregateType::Avg);
    let mut precipitation = Accumulator::new(AggregateType::Sum);
    let mut tally = ConditionTally::new();

    for sample in &bucket.samples {
        high.add(sample.temperature_c);
        low.add(sample.temperature_c);
        humidity.add(sample.humidity_pct as f64);
        wind.add(sample.wind_speed_mps);
        precipitation.add(sample.precipitation_mm);
        tally.add(&sample.condition);
    }

    let dominant = tally.dominant().unwrap_or_default().to_string();
    let representative = bucket
        .samples
        .iter()
        .find(|sample| sample.condition == dominant);

    DailySummary {
        date_utc: day_key_to_date(bucket.key),
        temperature_high_c: round_to_i64(high.result().unwrap_or_default()),
        temperature_low_c: round_to_i64(low.result().unwrap_or_default()),
        representative_description: representative
            .map(|s| s.description.clone())
            .unwrap_or_default(),
        representative_icon_code: representative
            .map(|s| s.icon_code.clone())
            .unwrap_or_default(),
        dominant_condition: dominant,
        humidity_pct_avg: round_to_i64(humidity.result().unwrap_or_default()),
        // average in m/s first, then convert, then round
        wind_speed_kph_avg: round_to_i64(mps_to_kph(wind.result().unwrap_or_default())),
        precipitation_mm_total: precipitation.result().unwrap_or_default(),
        sample_count: bucket.samples.len(),
    }
}

/// Roll samples up into at most `max_days` daily summaries
///
/// Days are emitted in the order their first sample appears in the input.
/// The input is not sorted, so for out-of-order input the result holds the
/// first `max_days` days seen rather than the earliest ones.
pub fn aggregate_days(samples: &[RawSample], max_days: usize) -> Vec<DailySummary> {
    bucket_by_day(samples, max_days)
        .iter()
        .map(summarize_day)
        .collect()
}

/// Five-day forecast from 3-hour samples
pub fn aggregate_forecast(samples: &[RawSample]) -> Vec<DailySummary> {
    aggregate_days(samples, FORECAST_DAYS)
}
