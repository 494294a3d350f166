//! Run scheduling: mapping an instant onto a day index and a slot.
//!
//! The bot runs a fixed number of times per UTC day. Each run derives a
//! `SelectionContext` from the clock alone, so two processes started at the
//! same instant converge on the same selection without any shared state.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use thiserror::Error;

use crate::catalog::MonthDay;

/// Configuration validation errors. These are operator mistakes in the
/// compiled-in configuration, so they abort the run with a message naming
/// the violated invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("slot hour list must be non-empty")]
    NoSlotHours,

    #[error("slot hours must be strictly increasing, found {0} after {1}")]
    SlotHoursNotIncreasing(u32, u32),

    #[error("slot hour {0} is out of range (must be 0-23)")]
    SlotHourOutOfRange(u32),

    #[error("binary slot threshold {0} is out of range (must be 0-23)")]
    ThresholdOutOfRange(u32),

    #[error("at least one rotation order is required")]
    NoRotationOrders,

    #[error("rotation order for slot {slot} must be non-empty")]
    EmptyRotationOrder { slot: usize },
}

/// How the current hour maps onto a run-of-day slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Two slots per day: slot 0 before `threshold_hour` (UTC), slot 1 after.
    Binary { threshold_hour: u32 },

    /// One slot per configured trigger hour (UTC), in ascending order.
    /// An out-of-schedule hour falls back to the nearest earlier slot;
    /// hours past the last trigger map to the last slot, hours before the
    /// first map to slot 0.
    Explicit { hours: Vec<u32> },
}

impl SlotPolicy {
    /// Number of scheduled runs per day under this policy.
    pub fn slot_count(&self) -> u32 {
        match self {
            SlotPolicy::Binary { .. } => 2,
            SlotPolicy::Explicit { hours } => hours.len() as u32,
        }
    }

    /// Map an hour-of-day to its slot.
    pub fn slot_for_hour(&self, hour: u32) -> u32 {
        match self {
            SlotPolicy::Binary { threshold_hour } => {
                if hour < *threshold_hour {
                    0
                } else {
                    1
                }
            }
            SlotPolicy::Explicit { hours } => hours
                .iter()
                .rposition(|&h| h <= hour)
                .unwrap_or(0) as u32,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SlotPolicy::Binary { threshold_hour } => {
                if *threshold_hour > 23 {
                    return Err(ConfigError::ThresholdOutOfRange(*threshold_hour));
                }
            }
            SlotPolicy::Explicit { hours } => {
                if hours.is_empty() {
                    return Err(ConfigError::NoSlotHours);
                }
                for &h in hours {
                    if h > 23 {
                        return Err(ConfigError::SlotHourOutOfRange(h));
                    }
                }
                for pair in hours.windows(2) {
                    if pair[1] <= pair[0] {
                        return Err(ConfigError::SlotHoursNotIncreasing(pair[1], pair[0]));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Process-wide scheduling configuration. Immutable; passed by reference
/// into the selection engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Anchor date for day-index computation. Day index 0 is this date.
    pub epoch: NaiveDate,

    /// How hours map onto slots.
    pub slot_policy: SlotPolicy,

    /// Category rotation order per slot. A slot past the end of this list
    /// uses the last order, so a single order can serve every slot.
    pub orders: Vec<Vec<String>>,
}

impl ScheduleConfig {
    /// Check every configuration invariant, failing fast with a message
    /// that names the violated one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.slot_policy.validate()?;
        if self.orders.is_empty() {
            return Err(ConfigError::NoRotationOrders);
        }
        for (slot, order) in self.orders.iter().enumerate() {
            if order.is_empty() {
                return Err(ConfigError::EmptyRotationOrder { slot });
            }
        }
        Ok(())
    }

    /// Rotation order for a slot, clamping to the last configured order.
    pub fn order_for_slot(&self, slot: u32) -> &[String] {
        let idx = (slot as usize).min(self.orders.len() - 1);
        &self.orders[idx]
    }
}

/// Per-run selection context derived from the clock. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionContext {
    /// The UTC calendar date of the run.
    pub date: NaiveDate,

    /// Whole days since the configured epoch (negative before it).
    pub day_index: i64,

    /// Which scheduled run of the day this is.
    pub slot: u32,
}

impl SelectionContext {
    /// Derive the context for `now` under `config`.
    pub fn derive(now: DateTime<Utc>, config: &ScheduleConfig) -> SelectionContext {
        let date = now.date_naive();
        SelectionContext {
            date,
            day_index: (date - config.epoch).num_days(),
            slot: config.slot_policy.slot_for_hour(now.hour()),
        }
    }

    /// The month-day of the run date, for anniversary matching.
    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.date.month(),
            day: self.date.day(),
        }
    }

    /// The combined rotation counter: every slot of every day advances it
    /// by one, which is what drives all round-robin indexing.
    pub fn tick(&self, slot_count: u32) -> i64 {
        self.day_index * slot_count as i64 + self.slot as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config(policy: SlotPolicy) -> ScheduleConfig {
        ScheduleConfig {
            epoch: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            slot_policy: policy,
            orders: vec![vec!["Mundial".to_string()]],
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn test_binary_slot() {
        let policy = SlotPolicy::Binary { threshold_hour: 17 };
        assert_eq!(policy.slot_for_hour(0), 0);
        assert_eq!(policy.slot_for_hour(16), 0);
        assert_eq!(policy.slot_for_hour(17), 1);
        assert_eq!(policy.slot_for_hour(23), 1);
        assert_eq!(policy.slot_count(), 2);
    }

    #[test]
    fn test_explicit_slot_exact_match() {
        let policy = SlotPolicy::Explicit { hours: vec![9, 17] };
        assert_eq!(policy.slot_for_hour(9), 0);
        assert_eq!(policy.slot_for_hour(17), 1);
        assert_eq!(policy.slot_count(), 2);
    }

    #[test]
    fn test_explicit_slot_falls_back_to_nearest_earlier() {
        let policy = SlotPolicy::Explicit { hours: vec![9, 17] };
        // Between slots: nearest earlier
        assert_eq!(policy.slot_for_hour(12), 0);
        // Past the last: last slot
        assert_eq!(policy.slot_for_hour(23), 1);
        // Before the first: slot 0
        assert_eq!(policy.slot_for_hour(3), 0);
    }

    #[test]
    fn test_day_index_from_epoch() {
        let cfg = config(SlotPolicy::Binary { threshold_hour: 17 });
        let ctx = SelectionContext::derive(at(2025, 1, 1, 10), &cfg);
        assert_eq!(ctx.day_index, 0);

        let ctx = SelectionContext::derive(at(2025, 1, 11, 10), &cfg);
        assert_eq!(ctx.day_index, 10);

        // Before the epoch the index goes negative rather than panicking
        let ctx = SelectionContext::derive(at(2024, 12, 31, 10), &cfg);
        assert_eq!(ctx.day_index, -1);
    }

    #[test]
    fn test_tick_advances_every_slot() {
        let cfg = config(SlotPolicy::Binary { threshold_hour: 17 });
        let morning = SelectionContext::derive(at(2025, 1, 2, 9), &cfg);
        let evening = SelectionContext::derive(at(2025, 1, 2, 20), &cfg);
        let next_morning = SelectionContext::derive(at(2025, 1, 3, 9), &cfg);
        assert_eq!(morning.tick(2), 2);
        assert_eq!(evening.tick(2), 3);
        assert_eq!(next_morning.tick(2), 4);
    }

    #[test]
    fn test_month_day() {
        let cfg = config(SlotPolicy::Binary { threshold_hour: 17 });
        let ctx = SelectionContext::derive(at(2025, 7, 16, 10), &cfg);
        assert_eq!(ctx.month_day(), MonthDay { month: 7, day: 16 });
    }

    #[test]
    fn test_validate_rejects_empty_hours() {
        let cfg = config(SlotPolicy::Explicit { hours: vec![] });
        assert_eq!(cfg.validate(), Err(ConfigError::NoSlotHours));
    }

    #[test]
    fn test_validate_rejects_unsorted_hours() {
        let cfg = config(SlotPolicy::Explicit {
            hours: vec![17, 9],
        });
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::SlotHoursNotIncreasing(9, 17))
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_hours() {
        let cfg = config(SlotPolicy::Explicit { hours: vec![24] });
        assert_eq!(cfg.validate(), Err(ConfigError::SlotHourOutOfRange(24)));

        let cfg = config(SlotPolicy::Binary { threshold_hour: 25 });
        assert_eq!(cfg.validate(), Err(ConfigError::ThresholdOutOfRange(25)));
    }

    #[test]
    fn test_validate_rejects_missing_or_empty_orders() {
        let mut cfg = config(SlotPolicy::Binary { threshold_hour: 17 });
        cfg.orders = vec![];
        assert_eq!(cfg.validate(), Err(ConfigError::NoRotationOrders));

        cfg.orders = vec![vec!["Mundial".to_string()], vec![]];
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyRotationOrder { slot: 1 })
        );
    }

    #[test]
    fn test_order_for_slot_clamps() {
        let mut cfg = config(SlotPolicy::Binary { threshold_hour: 17 });
        cfg.orders = vec![
            vec!["Mundial".to_string()],
            vec!["Libertadores".to_string()],
        ];
        assert_eq!(cfg.order_for_slot(0)[0], "Mundial");
        assert_eq!(cfg.order_for_slot(1)[0], "Libertadores");
        // A slot past the configured orders reuses the last one
        assert_eq!(cfg.order_for_slot(5)[0], "Libertadores");
    }
}
