//! Rolling backup-window resolution.
//!
//! Historical data lives in one tab per business week, named after its
//! Monday..Friday span (`06.10 a 10.10`). Which of those tabs counts as the
//! "current backup" depends only on today's date and the chosen policy.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::format::{WINDOW_DATE_FORMAT, WINDOW_JOINER};
use crate::errors::TrackerError;
use crate::types::WindowLabel;

/// Rule used to pick the backup week.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// On Mondays take the week that just ended; on any other day take the
    /// week before the most recently completed one.
    ///
    /// Anchored on `F`, the most recent Friday strictly before today: Monday
    /// resolves to `F`, every other day to `F - 7`.
    #[default]
    Retrasada,
    /// Always take the Monday..Friday of the calendar week preceding the
    /// current one, whatever the weekday.
    SemanaAnterior,
}

/// A Monday..Friday span of five days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupWindow {
    /// First business day (Monday).
    pub start: NaiveDate,
    /// Last business day (Friday).
    pub end: NaiveDate,
}

impl BackupWindow {
    /// Build the window ending on `friday`.
    pub fn ending_on(friday: NaiveDate) -> Self {
        Self {
            start: friday - Duration::days(4),
            end: friday,
        }
    }

    /// Tab label, `DD.MM a DD.MM`.
    pub fn label(&self) -> WindowLabel {
        format!(
            "{}{}{}",
            self.start.format(WINDOW_DATE_FORMAT),
            WINDOW_JOINER,
            self.end.format(WINDOW_DATE_FORMAT)
        )
    }

    /// True when `date` falls inside the window (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolve the backup window for `today` under `policy`.
pub fn resolve_window(today: NaiveDate, policy: WindowPolicy) -> BackupWindow {
    match policy {
        WindowPolicy::Retrasada => {
            let last_friday = previous_friday(today);
            if today.weekday() == Weekday::Mon {
                BackupWindow::ending_on(last_friday)
            } else {
                BackupWindow::ending_on(last_friday - Duration::days(7))
            }
        }
        WindowPolicy::SemanaAnterior => {
            let back = i64::from(today.weekday().num_days_from_monday()) + 7;
            let monday = today - Duration::days(back);
            BackupWindow::ending_on(monday + Duration::days(4))
        }
    }
}

/// Label of the backup tab to load for `today`.
pub fn backup_sheet_name(today: NaiveDate, policy: WindowPolicy) -> WindowLabel {
    resolve_window(today, policy).label()
}

/// Calendar date at `now` in a fixed UTC offset given in minutes.
pub fn date_at(now: DateTime<Utc>, utc_offset_minutes: i32) -> Result<NaiveDate, TrackerError> {
    let offset = utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            TrackerError::Configuration(format!(
                "utc offset of {utc_offset_minutes} minutes is out of range"
            ))
        })?;
    Ok(now.with_timezone(&offset).date_naive())
}

/// Today's date in a fixed UTC offset given in minutes.
pub fn today_in(utc_offset_minutes: i32) -> Result<NaiveDate, TrackerError> {
    date_at(Utc::now(), utc_offset_minutes)
}

/// Most recent Friday strictly before `today` (a Friday maps to the previous one).
fn previous_friday(today: NaiveDate) -> NaiveDate {
    let weekday = i64::from(today.weekday().num_days_from_monday());
    let friday = i64::from(Weekday::Fri.num_days_from_monday());
    let mut back = (weekday - friday).rem_euclid(7);
    if back == 0 {
        back = 7;
    }
    today - Duration::days(back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn previous_friday_is_strictly_before_today() {
        assert_eq!(previous_friday(day(10, 13)), day(10, 10));
        assert_eq!(previous_friday(day(10, 17)), day(10, 10));
        assert_eq!(previous_friday(day(10, 18)), day(10, 17));
        assert_eq!(previous_friday(day(10, 19)), day(10, 17));
    }

    #[test]
    fn window_spans_monday_to_friday() {
        let window = BackupWindow::ending_on(day(10, 10));
        assert_eq!(window.start, day(10, 6));
        assert_eq!(window.start.weekday(), Weekday::Mon);
        assert_eq!(window.label(), "06.10 a 10.10");
        assert!(window.contains(day(10, 6)));
        assert!(window.contains(day(10, 10)));
        assert!(!window.contains(day(10, 11)));
    }

    #[test]
    fn label_crosses_month_boundaries() {
        let window = BackupWindow::ending_on(day(10, 3));
        assert_eq!(window.label(), "29.09 a 03.10");
    }

    #[test]
    fn date_at_applies_offset() {
        let now = Utc.with_ymd_and_hms(2025, 10, 14, 2, 30, 0).unwrap();
        assert_eq!(date_at(now, -180).unwrap(), day(10, 13));
        assert_eq!(date_at(now, 0).unwrap(), day(10, 14));
        assert!(date_at(now, 24 * 60).is_err());
    }
}
