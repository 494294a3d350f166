//! Deterministic, stateless content scheduling for a once-per-run fact bot.
//!
//! This crate provides:
//! - CSV catalog loading with header and date validation
//! - A pure selection cascade: anniversary match → themed rotation →
//!   global round-robin, driven only by the clock and a fixed epoch
//! - A budget-constrained formatter that never exceeds 280 characters
//!
//! # Quick Start
//!
//! ```ignore
//! use chrono::Utc;
//! use factbot_core::{compose, load_catalog, select};
//!
//! let catalog = load_catalog("facts.csv")?;
//! let selected = select(&catalog, Utc::now(), &schedule)?;
//! let post = compose(&selected, &style);
//! assert!(post.chars().count() <= 280);
//! ```

pub mod catalog;
pub mod compose;
pub mod schedule;
pub mod select;

// Primary public API
pub use catalog::{load_catalog, parse_catalog, CatalogError, Fact, MonthDay, ParseMonthDayError};
pub use compose::{compose, CategoryStyle, StyleConfig};
pub use schedule::{ConfigError, ScheduleConfig, SelectionContext, SlotPolicy};
pub use select::{select, SelectError, SelectedFact};
