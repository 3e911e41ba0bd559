//! Timing statistics of a prefix cascade

use serde::{Serialize, Deserialize};
use crate::cascade::Cascade;

/// Temporal features of the first `k` retweets
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    /// Time of the k-th (last) retweet
    pub time_to_k: f64,
    /// Mean inter-retweet time
    pub mean_inter_time: f64,
    /// Population variance of inter-retweet times
    pub var_inter_time: f64,
    /// Time to half of the retweets over `time_to_k`
    pub half_life_ratio: f64,
    /// Mean gap of the first half over mean gap of the second half
    pub speed_change: f64,
}

impl TemporalFeatures {
    /// Named values, in feature order
    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("time_to_k", self.time_to_k),
            ("mean_inter_time", self.mean_inter_time),
            ("var_inter_time", self.var_inter_time),
            ("half_life_ratio", self.half_life_ratio),
            ("speed_change", self.speed_change),
        ]
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute timing features of a prefix whose events are sorted by time
pub fn temporal_features(prefix: &Cascade) -> TemporalFeatures {
    let times: Vec<f64> = prefix.events.iter().map(|e| e.time).collect();
    let k = times.len();
    let time_to_k = times.last().copied().unwrap_or(0.0);

    if k < 2 {
        return TemporalFeatures {
            time_to_k,
            ..TemporalFeatures::default()
        };
    }

    let diffs: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_inter_time = mean(&diffs);
    let var_inter_time = diffs.iter()
        .map(|d| (d - mean_inter_time).powi(2))
        .sum::<f64>() / diffs.len() as f64;

    let half_k = k / 2;
    let time_at_half = if half_k >= 1 { times[half_k - 1] } else { 0.0 };
    let half_life_ratio = if time_to_k > 0.0 { time_at_half / time_to_k } else { 0.0 };

    let split = half_k.min(diffs.len());
    let (first, second) = diffs.split_at(split);
    let speed_change = if second.is_empty() {
        0.0
    } else {
        let first_mean = if first.is_empty() { mean_inter_time } else { mean(first) };
        let second_mean = mean(second);
        if second_mean > 0.0 { first_mean / second_mean } else { 0.0 }
    };

    TemporalFeatures {
        time_to_k,
        mean_inter_time,
        var_inter_time,
        half_life_ratio,
        speed_change,
    }
}
