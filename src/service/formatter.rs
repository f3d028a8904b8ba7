//! 结果工作簿输出
//!
//! 两个工作表（下单 / 复核），列为订单原有列（删除、重命名后）加状态列。
//! 按状态整行着色：adjusted 黄色、below_minimum 浅红、missing_multiple 橙色。

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::config::OutputConfig;
use crate::error::Result;
use crate::models::{CellValue, LineStatus, ReconciledLine, ResultSet};

const FILL_ADJUSTED: u32 = 0xFFF59D;
const FILL_BELOW_MINIMUM: u32 = 0xFFBABA;
const FILL_MISSING_MULTIPLE: u32 = 0xFFD8A8;

/// 输出列布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// (源列位置, 输出列名)
    pub columns: Vec<(usize, String)>,
    pub status_column: String,
}

impl SheetLayout {
    pub fn new(headers: &[String], cfg: &OutputConfig) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !cfg.dropped_columns.contains(*h))
            // 同名原有列被替换，状态列总是追加在最后（不保留原位置，待业务确认）
            .filter(|(_, h)| **h != cfg.status_column)
            .map(|(idx, h)| {
                let name = cfg
                    .renamed_columns
                    .iter()
                    .find(|r| r.from == *h)
                    .map(|r| r.to.clone())
                    .unwrap_or_else(|| h.clone());
                (idx, name)
            })
            .collect();

        Self {
            columns,
            status_column: cfg.status_column.clone(),
        }
    }

    pub fn header_names(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(|(_, name)| name.as_str())
            .chain(std::iter::once(self.status_column.as_str()))
    }
}

fn status_format(status: LineStatus) -> Option<Format> {
    let fill = match status {
        LineStatus::Ok => return None,
        LineStatus::Adjusted => FILL_ADJUSTED,
        LineStatus::BelowMinimum => FILL_BELOW_MINIMUM,
        LineStatus::MissingMultiple => FILL_MISSING_MULTIPLE,
    };
    Some(Format::new().set_background_color(Color::RGB(fill)))
}

/// 渲染结果工作簿到内存
pub fn render_workbook(result: &ResultSet, headers: &[String], cfg: &OutputConfig) -> Result<Vec<u8>> {
    let layout = SheetLayout::new(headers, cfg);
    let mut workbook = Workbook::new();

    let sheets = [
        (&cfg.accepted_sheet, &result.accepted),
        (&cfg.review_sheet, &result.review),
    ];
    for (name, lines) in sheets {
        let worksheet = workbook.add_worksheet().set_name(name.as_str())?;
        write_sheet(worksheet, &layout, lines, cfg)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    layout: &SheetLayout,
    lines: &[ReconciledLine],
    cfg: &OutputConfig,
) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, name) in layout.header_names().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, name, &header_format)?;
    }

    for (idx, line) in lines.iter().enumerate() {
        let row = row_num(idx + 1)?;
        let format = status_format(line.status);

        for (col, (source, _)) in layout.columns.iter().enumerate() {
            let value = line.line.cells.get(*source).unwrap_or(&CellValue::Empty);
            write_cell(worksheet, row, col_num(col)?, value, format.as_ref())?;
        }

        let label = cfg.status_labels.label(line.status);
        let status_col = col_num(layout.columns.len())?;
        match &format {
            Some(f) => worksheet.write_string_with_format(row, status_col, label, f)?,
            None => worksheet.write_string(row, status_col, label)?,
        };
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    match (value, format) {
        (CellValue::Empty, Some(f)) => worksheet.write_blank(row, col, f)?,
        (CellValue::Empty, None) => return Ok(()),
        (CellValue::Text(s), format) => match (plain_number(s), format) {
            (Some(n), Some(f)) => worksheet.write_number_with_format(row, col, n, f)?,
            (Some(n), None) => worksheet.write_number(row, col, n)?,
            (None, Some(f)) => worksheet.write_string_with_format(row, col, s, f)?,
            (None, None) => worksheet.write_string(row, col, s)?,
        },
        (CellValue::Number(n), Some(f)) => worksheet.write_number_with_format(row, col, *n, f)?,
        (CellValue::Number(n), None) => worksheet.write_number(row, col, *n)?,
        (CellValue::Bool(b), Some(f)) => worksheet.write_boolean_with_format(row, col, *b, f)?,
        (CellValue::Bool(b), None) => worksheet.write_boolean(row, col, *b)?,
    };
    Ok(())
}

/// CSV 文本中的普通十进制数按数字写出：可选负号、整数部分、可选小数部分。
/// 前导零（如 "00123"）、指数、空白和超过 15 位有效数字的值保持文本。
fn plain_number(text: &str) -> Option<f64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return None;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    if int_part.len() + frac_part.map_or(0, str::len) > 15 {
        return None;
    }

    text.parse().ok()
}

fn row_num(row: usize) -> std::result::Result<u32, XlsxError> {
    u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(col: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}
