//! The selection cascade: anniversary match, then themed rotation, then
//! global round-robin.
//!
//! Selection is a pure function of the catalog, the instant, and the
//! schedule configuration. Two runs in the same date and slot always pick
//! the same fact, which is what makes a stateless (and possibly retried)
//! scheduled job safe.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::catalog::Fact;
use crate::schedule::{ConfigError, ScheduleConfig, SelectionContext};

/// Selection precondition violations. Configuration errors, not runtime
/// conditions to recover from.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("catalog must be non-empty")]
    EmptyCatalog,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The chosen fact plus whether it was an anniversary hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedFact<'a> {
    pub fact: &'a Fact,

    /// True iff the fact's anniversary date equals today's month-day.
    pub anniversary_hit: bool,
}

/// Pick today's fact.
///
/// The cascade prefers the most specific content:
/// 1. facts whose anniversary date matches today's month-day,
/// 2. facts in this slot's rotation theme,
/// 3. the whole catalog, round-robin.
///
/// Step 3 cannot fail given a non-empty catalog, so a result always exists.
pub fn select<'a>(
    catalog: &'a [Fact],
    now: DateTime<Utc>,
    config: &ScheduleConfig,
) -> Result<SelectedFact<'a>, SelectError> {
    config.validate()?;
    if catalog.is_empty() {
        return Err(SelectError::EmptyCatalog);
    }

    let ctx = SelectionContext::derive(now, config);
    let tick = ctx.tick(config.slot_policy.slot_count());
    let today = ctx.month_day();

    // 1) Anniversaries first. The tick-based index advances the rotation
    // every slot of every day, so a short anniversary list still cycles
    // through all its entries across repeated years and slots.
    let anniversaries: Vec<&Fact> = catalog
        .iter()
        .filter(|f| f.anniversary == Some(today))
        .collect();
    if !anniversaries.is_empty() {
        let idx = tick.rem_euclid(anniversaries.len() as i64) as usize;
        return Ok(SelectedFact {
            fact: anniversaries[idx],
            anniversary_hit: true,
        });
    }

    // 2) Themed rotation. The theme advances every tick; the entry within
    // a theme only advances once the full category order has cycled, so a
    // single pass over all categories reuses the same entry per theme.
    let order = config.order_for_slot(ctx.slot);
    let theme = &order[tick.rem_euclid(order.len() as i64) as usize];
    let themed: Vec<&Fact> = catalog
        .iter()
        .filter(|f| eq_ignore_case(&f.category, theme))
        .collect();
    if !themed.is_empty() {
        let idx = tick
            .div_euclid(order.len() as i64)
            .rem_euclid(themed.len() as i64) as usize;
        return Ok(SelectedFact {
            fact: themed[idx],
            anniversary_hit: false,
        });
    }

    // 3) Global fallback over the full catalog.
    let idx = tick.rem_euclid(catalog.len() as i64) as usize;
    Ok(SelectedFact {
        fact: &catalog[idx],
        anniversary_hit: false,
    })
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
