//! ROI calculator and headline impact figures shown in the sidebar.
//!
//! Purely illustrative: fixed assumptions, no measurement behind them.

use serde::{Deserialize, Deserializer, Serialize};

pub const MINUTES_SAVED_PER_SUMMARY: u64 = 27;
pub const WORK_DAYS_PER_YEAR: u64 = 250;
pub const PHYSICIAN_HOURLY_RATE_USD: f64 = 200.0;

pub const SUMMARIES_PER_DAY_RANGE: (u32, u32) = (1, 20);
pub const PHYSICIANS_RANGE: (u32, u32) = (1, 50);
pub const DEFAULT_SUMMARIES_PER_DAY: u32 = 5;
pub const DEFAULT_PHYSICIANS: u32 = 10;

/// A labelled figure with a small caption, rendered as a metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
    pub delta: &'static str,
}

pub const IMPACT_METRICS: [Metric; 2] = [
    Metric { label: "Time Saved", value: "27 min", delta: "per summary" },
    Metric { label: "Annual Value", value: "$150K", delta: "per physician" },
];

/// Static cards under a generated summary. Processing time and model are
/// shown separately from the real metadata.
pub const PERFORMANCE_METRICS: [Metric; 2] = [
    Metric { label: "Completeness", value: "95%", delta: "+15% vs manual" },
    Metric { label: "Cost per Summary", value: "$0.002", delta: "-99.98%" },
];

/// Calculator inputs. Missing fields fall back to the defaults; negative or
/// oversized values saturate and are clamped later by [`estimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoiInputs {
    #[serde(deserialize_with = "saturating")]
    pub summaries_per_day: u32,
    #[serde(deserialize_with = "saturating")]
    pub physicians: u32,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            summaries_per_day: DEFAULT_SUMMARIES_PER_DAY,
            physicians: DEFAULT_PHYSICIANS,
        }
    }
}

impl RoiInputs {
    /// Build inputs from raw (possibly missing or out-of-range) values.
    pub fn from_raw(summaries_per_day: Option<i64>, physicians: Option<i64>) -> Self {
        let defaults = Self::default();
        Self {
            summaries_per_day: summaries_per_day.map_or(defaults.summaries_per_day, saturating_u32),
            physicians: physicians.map_or(defaults.physicians, saturating_u32),
        }
    }

    /// Clamp both values into the slider ranges.
    pub fn clamped(self) -> Self {
        Self {
            summaries_per_day: self
                .summaries_per_day
                .clamp(SUMMARIES_PER_DAY_RANGE.0, SUMMARIES_PER_DAY_RANGE.1),
            physicians: self.physicians.clamp(PHYSICIANS_RANGE.0, PHYSICIANS_RANGE.1),
        }
    }
}

/// Negative → 0, above `u32::MAX` → `u32::MAX`.
pub fn saturating_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn saturating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    i64::deserialize(deserializer).map(saturating_u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiEstimate {
    pub summaries_per_day: u32,
    pub physicians: u32,
    pub daily_minutes_saved: u64,
    pub annual_minutes_saved: u64,
    pub annual_hours_saved: f64,
    pub annual_cost_savings_usd: f64,
}

impl RoiEstimate {
    pub fn daily_display(&self) -> String {
        format!("{} min", group_thousands(self.daily_minutes_saved))
    }

    pub fn annual_hours_display(&self) -> String {
        format!("{} hours", group_thousands(self.annual_hours_saved.round() as u64))
    }

    pub fn cost_display(&self) -> String {
        format!("${}", group_thousands(self.annual_cost_savings_usd.round() as u64))
    }
}

pub fn estimate(inputs: RoiInputs) -> RoiEstimate {
    let RoiInputs { summaries_per_day, physicians } = inputs.clamped();
    let daily = u64::from(summaries_per_day) * MINUTES_SAVED_PER_SUMMARY * u64::from(physicians);
    let annual = daily * WORK_DAYS_PER_YEAR;
    let hours = annual as f64 / 60.0;

    RoiEstimate {
        summaries_per_day,
        physicians,
        daily_minutes_saved: daily,
        annual_minutes_saved: annual,
        annual_hours_saved: hours,
        annual_cost_savings_usd: hours * PHYSICIAN_HOURLY_RATE_USD,
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs() {
        let e = estimate(RoiInputs::default());
        assert_eq!(e.daily_minutes_saved, 5 * 27 * 10);
        assert_eq!(e.annual_minutes_saved, 1_350 * 250);
        assert_eq!(e.annual_hours_saved, 5_625.0);
        assert_eq!(e.annual_cost_savings_usd, 1_125_000.0);
    }

    #[test]
    fn displays_group_thousands() {
        let e = estimate(RoiInputs::default());
        assert_eq!(e.daily_display(), "1,350 min");
        assert_eq!(e.annual_hours_display(), "5,625 hours");
        assert_eq!(e.cost_display(), "$1,125,000");
    }

    #[test]
    fn inputs_are_clamped() {
        let e = estimate(RoiInputs { summaries_per_day: 0, physicians: 500 });
        assert_eq!(e.summaries_per_day, 1);
        assert_eq!(e.physicians, 50);
        assert_eq!(e.daily_minutes_saved, 27 * 50);
    }

    #[test]
    fn fractional_hours() {
        let e = estimate(RoiInputs { summaries_per_day: 1, physicians: 1 });
        assert_eq!(e.annual_minutes_saved, 6_750);
        assert_eq!(e.annual_hours_saved, 112.5);
        assert_eq!(e.cost_display(), "$22,500");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn partial_query_uses_defaults() {
        let inputs: RoiInputs = serde_json::from_str(r#"{"physicians": 3}"#).unwrap();
        assert_eq!(inputs, RoiInputs { summaries_per_day: 5, physicians: 3 });
    }

    #[test]
    fn out_of_range_values_saturate_then_clamp() {
        let inputs: RoiInputs =
            serde_json::from_str(r#"{"summaries_per_day": -3, "physicians": 99999999999}"#).unwrap();
        assert_eq!(inputs, RoiInputs { summaries_per_day: 0, physicians: u32::MAX });
        let e = estimate(inputs);
        assert_eq!((e.summaries_per_day, e.physicians), (1, 50));
    }

    #[test]
    fn from_raw_fills_and_saturates() {
        assert_eq!(RoiInputs::from_raw(None, None), RoiInputs::default());
        assert_eq!(
            RoiInputs::from_raw(Some(-1), Some(7)),
            RoiInputs { summaries_per_day: 0, physicians: 7 }
        );
        assert_eq!(saturating_u32(i64::MAX), u32::MAX);
    }
}
