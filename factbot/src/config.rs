//! Production configuration: schedule and style values compiled into the
//! binary. The core takes these as plain parameters, so rehearsing with a
//! different config is just a matter of constructing another one.

use chrono::NaiveDate;
use factbot_core::{CategoryStyle, ScheduleConfig, SlotPolicy, StyleConfig};

/// The production schedule: two runs per UTC day (before/after 17:00),
/// with a distinct category rotation per slot.
pub fn schedule() -> ScheduleConfig {
    ScheduleConfig {
        epoch: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid epoch date"),
        slot_policy: SlotPolicy::Binary { threshold_hour: 17 },
        orders: vec![
            // Morning
            vec![
                "Mundial".to_string(),
                "Champions".to_string(),
                "Libertadores".to_string(),
                "Eliminatorias".to_string(),
                "Historia".to_string(),
            ],
            // Afternoon
            vec![
                "Libertadores".to_string(),
                "Mundial".to_string(),
                "Champions".to_string(),
                "Eliminatorias".to_string(),
                "Historia".to_string(),
            ],
        ],
    }
}

/// The production style table. Category names here are selection tags; the
/// prefixes are what readers actually see.
pub fn style() -> StyleConfig {
    StyleConfig {
        budget: 280,
        separator: " — ".to_string(),
        signature: " — ⚽️ FútbolCompany".to_string(),
        anniversary_marker: " · 📅 Un día como hoy".to_string(),
        styles: vec![
            (
                "Mundial".to_string(),
                CategoryStyle::new("🏆 Copa del Mundo").with_hashtag(" #Mundial"),
            ),
            (
                "Champions".to_string(),
                CategoryStyle::new("⭐ Noche europea").with_hashtag(" #Champions"),
            ),
            (
                "Libertadores".to_string(),
                CategoryStyle::new("🏆 Gloria eterna").with_hashtag(" #Libertadores"),
            ),
            (
                "Eliminatorias".to_string(),
                CategoryStyle::new("🌎 Rumbo al Mundial"),
            ),
            (
                "Historia".to_string(),
                CategoryStyle::new("📜 Historia del fútbol"),
            ),
        ],
        default_style: CategoryStyle::new("⚽ Dato futbolero"),
    }
}
