//! # daily-income-render
//!
//! Rendering backends for daily income workbooks.
//!
//! ## Example
//!
//! ```rust,ignore
//! use daily_income_core::{MonthSheet, Renderer};
//! use daily_income_render::ExcelRenderer;
//!
//! let sheet = MonthSheet::new(3, 2025)?;
//! let xlsx_bytes = ExcelRenderer::new().render(&sheet)?;
//! std::fs::write(sheet.file_name(), xlsx_bytes)?;
//! ```

pub mod excel;

pub use excel::ExcelRenderer;
