//! Excel income workbook renderer
//!
//! Generates a single-sheet XLSX template for one month:
//!
//! ```text
//! |            Daily Income Mar.2025              |
//! |   Date    | Cash | Credit | Total | Tip | Note |
//! |  3/1 | Sat |      |        |       |     |      |
//! |  3/2 | Sun |      |        |       |     |      |
//! |  3/3 | Mon |░░░░░░|░░░░░░░░|░░░░░░░|░░░░░|░░░░░░|
//! ```
//!
//! ## Week Shading
//!
//! Day rows are grouped into Sunday-terminated weeks. Each week shares one
//! merged Note cell. Alternate weeks are tinted: the Note cell statically,
//! and the Cash..Tip cells through a **formula conditional format** that
//! drops the tint once something is written in that week's Note cell.

use chrono::Datelike;
use daily_income_core::{DayRow, MonthSheet, RenderError, Renderer, WeekGroup};
use rust_xlsxwriter::{
    ConditionalFormatFormula, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook,
    Worksheet, XlsxError,
};
use std::path::{Path, PathBuf};

/// Light grey used for tinted weeks
pub const DEFAULT_TINT: u32 = 0xF2F2F2;

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_DAY_ROW: u32 = 2;

const DATE_COL: u16 = 0;
const WEEKDAY_COL: u16 = 1;
const FIRST_ENTRY_COL: u16 = 2;
const LAST_ENTRY_COL: u16 = 5;
const NOTE_COL: u16 = 6;

const ENTRY_HEADERS: [&str; 5] = ["Cash", "Credit", "Total", "Tip", "Note"];

/// Blank rows kept below the last day inside the print area
const PRINT_MARGIN_ROWS: u32 = 2;

/// Excel income workbook renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Background colour of tinted weeks (RGB)
    pub tint: u32,
    /// Worksheet name
    pub sheet_name: String,
    /// Whether to set a print area covering the table
    pub print_area: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            tint: DEFAULT_TINT,
            sheet_name: "Sheet1".into(),
            print_area: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tint colour for alternating weeks
    pub fn tint(mut self, color: u32) -> Self {
        self.tint = color;
        self
    }

    /// Set the worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Leave the print area unset
    pub fn no_print_area(mut self) -> Self {
        self.print_area = false;
        self
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, sheet: &MonthSheet) -> Result<Vec<u8>, RenderError> {
        if sheet.rows.is_empty() {
            return Err(RenderError::InvalidData(format!(
                "{} has no days to render",
                sheet.title()
            )));
        }

        let mut workbook = Workbook::new();
        let formats = self.create_formats();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name).map_err(xlsx)?;

        self.write_layout(worksheet, sheet, &formats)?;
        self.write_days(worksheet, &sheet.rows, &formats)?;
        self.write_weeks(worksheet, &sheet.week_groups(), &formats)?;

        if self.print_area {
            let last_row = FIRST_DAY_ROW + sheet.rows.len() as u32 - 1 + PRINT_MARGIN_ROWS;
            worksheet
                .set_print_area(TITLE_ROW, DATE_COL, last_row, NOTE_COL)
                .map_err(xlsx)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Render `sheet` and write it into `dir` under its standard file name
    ///
    /// Nothing is written unless rendering succeeds.
    pub fn save(&self, sheet: &MonthSheet, dir: &Path) -> Result<PathBuf, RenderError> {
        let bytes = self.render_to_bytes(sheet)?;
        let path = dir.join(sheet.file_name());
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Create reusable formats
    fn create_formats(&self) -> IncomeFormats {
        let title = Format::new()
            .set_font_name("Calibri")
            .set_font_size(24)
            .set_align(FormatAlign::Center);

        let header = Format::new()
            .set_font_name("Calibri")
            .set_font_size(14)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let day = Format::new()
            .set_font_name("Arial")
            .set_font_size(14)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let date = day.clone().set_num_format("m/d");

        let entry = Format::new().set_border(FormatBorder::Thin);

        let note = Format::new().set_border(FormatBorder::Thin);

        let note_tinted = note.clone().set_background_color(self.tint);

        let tint = Format::new().set_background_color(self.tint);

        IncomeFormats {
            title,
            header,
            day,
            date,
            entry,
            note,
            note_tinted,
            tint,
        }
    }

    /// Title, header row, column widths and row heights
    fn write_layout(
        &self,
        worksheet: &mut Worksheet,
        sheet: &MonthSheet,
        formats: &IncomeFormats,
    ) -> Result<(), RenderError> {
        worksheet.set_default_row_height(19.5);
        worksheet.set_row_height(TITLE_ROW, 29).map_err(xlsx)?;
        worksheet.set_row_height(HEADER_ROW, 23).map_err(xlsx)?;

        for col in [DATE_COL, WEEKDAY_COL] {
            worksheet.set_column_width(col, 5).map_err(xlsx)?;
            worksheet
                .set_column_format(col, &formats.day)
                .map_err(xlsx)?;
        }
        for col in FIRST_ENTRY_COL..=LAST_ENTRY_COL {
            worksheet.set_column_width(col, 10.33).map_err(xlsx)?;
            worksheet
                .set_column_format(col, &formats.entry)
                .map_err(xlsx)?;
        }
        worksheet.set_column_width(NOTE_COL, 21.67).map_err(xlsx)?;
        worksheet
            .set_column_format(NOTE_COL, &formats.note)
            .map_err(xlsx)?;

        worksheet
            .merge_range(TITLE_ROW, DATE_COL, TITLE_ROW, NOTE_COL, &sheet.title(), &formats.title)
            .map_err(xlsx)?;

        worksheet
            .merge_range(HEADER_ROW, DATE_COL, HEADER_ROW, WEEKDAY_COL, "Date", &formats.header)
            .map_err(xlsx)?;
        for (col, header) in (FIRST_ENTRY_COL..).zip(ENTRY_HEADERS) {
            worksheet
                .write_string_with_format(HEADER_ROW, col, header, &formats.header)
                .map_err(xlsx)?;
        }

        Ok(())
    }

    /// One row per day: date and weekday label
    fn write_days(
        &self,
        worksheet: &mut Worksheet,
        rows: &[DayRow],
        formats: &IncomeFormats,
    ) -> Result<(), RenderError> {
        for (row, day) in (FIRST_DAY_ROW..).zip(rows) {
            let date = excel_date(day)?;
            worksheet
                .write_datetime_with_format(row, DATE_COL, &date, &formats.date)
                .map_err(xlsx)?;
            worksheet
                .write_string_with_format(row, WEEKDAY_COL, day.weekday, &formats.day)
                .map_err(xlsx)?;
        }

        Ok(())
    }

    /// Merged Note cell per week, plus tint on alternating weeks
    fn write_weeks(
        &self,
        worksheet: &mut Worksheet,
        groups: &[WeekGroup],
        formats: &IncomeFormats,
    ) -> Result<(), RenderError> {
        for group in groups {
            let first_row = FIRST_DAY_ROW + group.first as u32;
            let last_row = FIRST_DAY_ROW + group.last as u32;
            tracing::debug!(
                first_row,
                last_row,
                tinted = group.tinted,
                "writing week group"
            );

            let note_format = if group.tinted {
                &formats.note_tinted
            } else {
                &formats.note
            };

            // A merge range must span more than one cell
            if first_row == last_row {
                worksheet
                    .write_blank(first_row, NOTE_COL, note_format)
                    .map_err(xlsx)?;
            } else {
                worksheet
                    .merge_range(first_row, NOTE_COL, last_row, NOTE_COL, "", note_format)
                    .map_err(xlsx)?;
            }

            if group.tinted {
                let rule = format!("={}=\"\"", Self::cell_ref(first_row, NOTE_COL));
                let conditional_format = ConditionalFormatFormula::new()
                    .set_rule(rule.as_str())
                    .set_format(formats.tint.clone());

                worksheet
                    .add_conditional_format(
                        first_row,
                        DATE_COL,
                        last_row,
                        LAST_ENTRY_COL,
                        &conditional_format,
                    )
                    .map_err(xlsx)?;
            }
        }

        Ok(())
    }

    /// Convert 0-based column index to Excel column letter(s)
    fn col_to_letter(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32;
        loop {
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        result
    }

    /// Absolute A1-style reference for a 0-based cell, e.g. `$G$3`
    fn cell_ref(row: u32, col: u16) -> String {
        format!("${}${}", Self::col_to_letter(col), row + 1)
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, sheet: &MonthSheet) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(sheet)
    }
}

/// Collection of reusable formats
struct IncomeFormats {
    title: Format,
    header: Format,
    day: Format,
    date: Format,
    entry: Format,
    note: Format,
    note_tinted: Format,
    tint: Format,
}

fn excel_date(day: &DayRow) -> Result<ExcelDateTime, RenderError> {
    let date = day.date;
    let year = u16::try_from(date.year())
        .ok()
        .filter(|year| (1900..=9999).contains(year))
        .ok_or_else(|| {
            RenderError::InvalidData(format!("{date} is outside the Excel date range"))
        })?;

    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).map_err(xlsx)
}

fn xlsx(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}
