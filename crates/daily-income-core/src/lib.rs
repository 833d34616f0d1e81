//! # daily-income-core
//!
//! Calendar model for the daily income workbook.
//!
//! This crate provides:
//! - Date range builder: every date of a month, in order
//! - Weekday labeler: fixed English three-letter abbreviations
//! - Week grouping: Sunday-terminated row blocks with alternating tint
//! - `MonthSheet`: the rows, title and file name of one month's workbook
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use daily_income_core::MonthSheet;
//!
//! let sheet = MonthSheet::new(3, 2025).unwrap();
//! assert_eq!(sheet.rows.len(), 31);
//! assert_eq!(sheet.file_name(), "Daily Income Mar.2025.xlsx");
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Weekday abbreviations indexed by days from Monday
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Month abbreviations indexed by month number minus one
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Minimum length of the first week group for the week after it to be tinted
pub const TINTED_FIRST_WEEK_DAYS: usize = 5;

const MAX_DAYS_PER_MONTH: u32 = 31;

const DAYS_PER_WEEK: usize = 7;

// ============================================================================
// Date Range & Labels
// ============================================================================

/// Every date of `month` in `year`, from day 1 to the last day inclusive
pub fn date_range(month: u32, year: i32) -> Result<Vec<NaiveDate>, CoreError> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::InvalidMonth(month));
    }

    let dates: Vec<_> = (1..=MAX_DAYS_PER_MONTH)
        .map_while(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect();

    if dates.is_empty() {
        return Err(CoreError::InvalidDate { month, year });
    }
    Ok(dates)
}

/// Three-letter English weekday abbreviation for `date`
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize]
}

/// Three-letter English month abbreviation, `None` outside 1-12
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_ABBREVIATIONS.get(index).copied()
}

// ============================================================================
// Rows & Week Groups
// ============================================================================

/// One pre-filled row of the workbook
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayRow {
    pub date: NaiveDate,
    pub weekday: &'static str,
}

impl DayRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: weekday_label(date),
        }
    }
}

/// A contiguous block of day rows closed by a Sunday
///
/// Indices are 0-based positions in the month's day rows. Only the last
/// group of a month may end on a day other than Sunday.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekGroup {
    pub first: usize,
    pub last: usize,
    pub tinted: bool,
}

#[allow(clippy::len_without_is_empty)]
impl WeekGroup {
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Split consecutive dates into Sunday-terminated week groups
///
/// The first group runs up to and including the first Sunday and is never
/// tinted. The second group is tinted when the first holds at least
/// [`TINTED_FIRST_WEEK_DAYS`] days, and tint alternates from there.
pub fn week_groups(dates: &[NaiveDate]) -> Vec<WeekGroup> {
    let mut groups = Vec::new();
    let Some(end) = dates.len().checked_sub(1) else {
        return groups;
    };

    let mut first = 0;
    let mut last = dates
        .iter()
        .position(|date| date.weekday() == Weekday::Sun)
        .unwrap_or(end);
    let second_tinted = last + 1 >= TINTED_FIRST_WEEK_DAYS;
    let mut tinted = false;

    loop {
        groups.push(WeekGroup {
            first,
            last,
            tinted,
        });
        if last == end {
            break;
        }
        tinted = if first == 0 { second_tinted } else { !tinted };
        first = last + 1;
        last = (first + DAYS_PER_WEEK - 1).min(end);
    }

    groups
}

// ============================================================================
// Month Sheet
// ============================================================================

/// The content of one month's income workbook
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthSheet {
    pub month: u32,
    pub year: i32,
    pub rows: Vec<DayRow>,
}

impl MonthSheet {
    pub fn new(month: u32, year: i32) -> Result<Self, CoreError> {
        let rows = date_range(month, year)?
            .into_iter()
            .map(DayRow::new)
            .collect();
        Ok(Self { month, year, rows })
    }

    pub fn month_abbrev(&self) -> &'static str {
        // month was validated by date_range
        month_abbrev(self.month).unwrap_or_default()
    }

    /// Sheet title, e.g. `Daily Income Mar.2025`
    pub fn title(&self) -> String {
        format!("Daily Income {}.{}", self.month_abbrev(), self.year)
    }

    /// Output file name, e.g. `Daily Income Mar.2025.xlsx`
    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.title())
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    pub fn week_groups(&self) -> Vec<WeekGroup> {
        week_groups(&self.dates())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output renderer for a month sheet
pub trait Renderer {
    type Output;

    fn render(&self, sheet: &MonthSheet) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Invalid month/year input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid month {0}: expected a value from 1 to 12")]
    InvalidMonth(u32),

    #[error("Cannot build a calendar date for {month}/{year}")]
    InvalidDate { month: u32, year: i32 },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
