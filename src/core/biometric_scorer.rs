//! Biometric Scorer: one wearable reading → calm / activated / shutdown
//!
//! Each present field adds points to one bucket and one indicator string.
//! Missing fields are skipped entirely. A reading that scores nothing yields
//! the zero-confidence "no data" sentinel, which fusion ignores.
//!
//! Skin temperature only ever feeds the activated bucket.

use crate::{
    DEFAULT_TREND_DELTA, MAX_SCORE, TREND_MIN_READINGS, TREND_WINDOW,
    HR_ACTIVATED_ABOVE, HR_SHUTDOWN_BELOW, HR_ACTIVATED_POINTS, HR_SHUTDOWN_POINTS, HR_CALM_POINTS,
    HRV_LOW_BELOW, HRV_HIGH_ABOVE, HRV_LOW_POINTS, HRV_HIGH_POINTS, HRV_MID_POINTS,
    RESP_ACTIVATED_ABOVE, RESP_SHUTDOWN_BELOW, RESP_ACTIVATED_POINTS, RESP_SHUTDOWN_POINTS, RESP_CALM_POINTS,
    SKIN_TEMP_COLD_BELOW, SKIN_TEMP_COLD_POINTS,
};
use crate::types::{strongest_state, BiometricReading, BiometricState, NervousState, Trend};

/// Points per bucket, indexed by `NervousState::index`
type Buckets = [u32; 3];

#[derive(Debug, Clone, Copy)]
pub struct BiometricScorer {
    trend_delta: f64,
}

impl Default for BiometricScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl BiometricScorer {
    pub fn new() -> Self {
        Self {
            trend_delta: DEFAULT_TREND_DELTA,
        }
    }

    /// Scorer with a calibrated trend delta
    pub fn with_trend_delta(trend_delta: f64) -> Self {
        Self { trend_delta }
    }

    /// Score `reading`. `history` holds earlier readings, oldest first.
    pub fn score(&self, reading: &BiometricReading, history: &[BiometricReading]) -> BiometricState {
        let mut buckets: Buckets = [0; 3];
        let mut indicators = Vec::new();

        if let Some(hr) = reading.heart_rate {
            if hr > HR_ACTIVATED_ABOVE {
                add(&mut buckets, NervousState::Activated, HR_ACTIVATED_POINTS);
                indicators.push(format!("elevated heart rate ({:.0} bpm)", hr));
            } else if hr < HR_SHUTDOWN_BELOW {
                add(&mut buckets, NervousState::Shutdown, HR_SHUTDOWN_POINTS);
                indicators.push(format!("low heart rate ({:.0} bpm)", hr));
            } else {
                add(&mut buckets, NervousState::Calm, HR_CALM_POINTS);
                indicators.push(format!("resting heart rate ({:.0} bpm)", hr));
            }
        }

        if let Some(hrv) = reading.hrv {
            if hrv < HRV_LOW_BELOW {
                add(&mut buckets, NervousState::Activated, HRV_LOW_POINTS);
                indicators.push(format!("low HRV ({:.0} ms)", hrv));
            } else if hrv > HRV_HIGH_ABOVE {
                add(&mut buckets, NervousState::Calm, HRV_HIGH_POINTS);
                indicators.push(format!("high HRV ({:.0} ms)", hrv));
            } else {
                add(&mut buckets, NervousState::Activated, HRV_MID_POINTS);
                indicators.push(format!("moderate HRV ({:.0} ms)", hrv));
            }
        }

        if let Some(resp) = reading.respiration_rate {
            if resp > RESP_ACTIVATED_ABOVE {
                add(&mut buckets, NervousState::Activated, RESP_ACTIVATED_POINTS);
                indicators.push(format!("rapid breathing ({:.0}/min)", resp));
            } else if resp < RESP_SHUTDOWN_BELOW {
                add(&mut buckets, NervousState::Shutdown, RESP_SHUTDOWN_POINTS);
                indicators.push(format!("slow breathing ({:.0}/min)", resp));
            } else {
                add(&mut buckets, NervousState::Calm, RESP_CALM_POINTS);
                indicators.push(format!("steady breathing ({:.0}/min)", resp));
            }
        }

        if let Some(temp) = reading.skin_temperature {
            if temp < SKIN_TEMP_COLD_BELOW {
                add(&mut buckets, NervousState::Activated, SKIN_TEMP_COLD_POINTS);
                indicators.push(format!("cool skin ({:.1}°C)", temp));
            }
        }

        if buckets.iter().all(|&points| points == 0) {
            return BiometricState::no_data();
        }

        let (state, max_points) = strongest_state(&buckets);
        BiometricState {
            state,
            confidence: max_points.min(MAX_SCORE as u32) as u8,
            indicators,
            trend: self.trend(reading, history),
        }
    }

    /// HRV against the mean of the three most recent prior readings
    fn trend(&self, reading: &BiometricReading, history: &[BiometricReading]) -> Trend {
        if history.len() + 1 < TREND_MIN_READINGS {
            return Trend::Stable;
        }
        let Some(current) = reading.hrv else {
            return Trend::Stable;
        };

        let prior: Vec<f64> = history
            .iter()
            .rev()
            .take(TREND_WINDOW)
            .filter_map(|r| r.hrv)
            .collect();
        if prior.is_empty() {
            return Trend::Stable;
        }

        let baseline = prior.iter().sum::<f64>() / prior.len() as f64;
        let delta = current - baseline;
        if delta >= self.trend_delta {
            Trend::Improving
        } else if delta <= -self.trend_delta {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

fn add(buckets: &mut Buckets, state: NervousState, points: u32) {
    buckets[state.index()] += points;
}

// =============================================================================
// TESTS
// =============================================================================
