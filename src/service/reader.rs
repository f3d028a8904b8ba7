//! 订单文件读取：CSV 或 Excel 工作簿

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{ReconcileError, Result};
use crate::models::table::format_number;
use crate::models::{CellValue, OrderTable};
use crate::service::loader::decode_text;

/// 允许上传的扩展名
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFormat {
    Csv,
    Workbook,
}

impl OrderFormat {
    /// 按扩展名判断文件格式（不区分大小写）
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(OrderFormat::Csv),
            "xlsx" | "xls" => Some(OrderFormat::Workbook),
            _ => None,
        }
    }
}

pub fn allowed_file(filename: &str) -> bool {
    OrderFormat::from_filename(filename).is_some()
}

/// 读取上传的订单文件
pub fn read_order_table(filename: &str, bytes: &[u8]) -> Result<OrderTable> {
    match OrderFormat::from_filename(filename) {
        Some(OrderFormat::Csv) => read_csv(bytes),
        Some(OrderFormat::Workbook) => read_workbook(bytes),
        None => Err(ReconcileError::UnsupportedFile(filename.to_string())),
    }
}

/// 逗号分隔，首行为表头
pub fn read_csv(bytes: &[u8]) -> Result<OrderTable> {
    let content = decode_text(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ReconcileError::OrderRead(e.to_string()))?
        .iter()
        .enumerate()
        .map(|(idx, h)| header_name(idx, h))
        .collect();

    let mut table = OrderTable::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| ReconcileError::OrderRead(e.to_string()))?;
        table.push_row(record.iter().map(CellValue::from_text).collect());
    }

    if table.headers.is_empty() {
        return Err(ReconcileError::OrderRead("file has no header row".to_string()));
    }
    Ok(table)
}

/// 读取第一个工作表，首行为表头
pub fn read_workbook(bytes: &[u8]) -> Result<OrderTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ReconcileError::OrderRead(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReconcileError::OrderRead("workbook contains no sheets".to_string()))?
        .map_err(|e| ReconcileError::OrderRead(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ReconcileError::OrderRead("first sheet is empty".to_string()))?;

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(idx, &cell_from_data(cell).as_text()))
        .collect();

    let mut table = OrderTable::new(headers);
    for row in rows {
        // 整行为空的行跳过
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        table.push_row(row.iter().map(cell_from_data).collect());
    }

    Ok(table)
}

/// 空表头命名为 "Unnamed: <列号>"
fn header_name(idx: usize, raw: &str) -> String {
    if raw.is_empty() {
        format!("Unnamed: {}", idx)
    } else {
        raw.to_string()
    }
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from_text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Text(ndt.to_string()),
            None => CellValue::Text(format_number(dt.as_f64())),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn csv_order() {
        let csv = "SKU,Descrição,QTY\nA1,Caneca,10\nB9,,5\n";
        let table = read_order_table("pedido.CSV", csv.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["SKU", "Descrição", "QTY"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][2], CellValue::Text("10".into()));
        assert_eq!(table.rows[1][1], CellValue::Empty);
    }

    #[test]
    fn ragged_csv_rows_are_padded() {
        let csv = "SKU,QTY,Obs\nA1,10\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], CellValue::Empty);
    }

    #[test]
    fn blank_csv_header_gets_placeholder_name() {
        let csv = "SKU,,QTY\nA1,x,10\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.headers[1], "Unnamed: 1");
    }

    #[test]
    fn empty_csv_is_read_error() {
        let err = read_csv(b"").unwrap_err();
        assert!(matches!(err, ReconcileError::OrderRead(_)));
    }

    #[test]
    fn unsupported_extension() {
        let err = read_order_table("pedido.pdf", b"%PDF").unwrap_err();
        assert!(matches!(err, ReconcileError::UnsupportedFile(_)));
        assert!(!allowed_file("noextension"));
        assert!(allowed_file("Pedido.XLSX"));
    }

    #[test]
    fn garbage_workbook_is_read_error() {
        let err = read_order_table("pedido.xlsx", b"not a zip").unwrap_err();
        assert!(matches!(err, ReconcileError::OrderRead(_)));
    }

    #[test]
    fn xlsx_order() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Número do modelo").unwrap();
        sheet.write_string(0, 2, "Quantidade").unwrap();
        sheet.write_string(1, 0, "A1").unwrap();
        sheet.write_string(1, 1, "extra").unwrap();
        sheet.write_number(1, 2, 10).unwrap();
        sheet.write_number(3, 0, 7891234).unwrap();
        sheet.write_number(3, 2, 5.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = read_order_table("pedido.xlsx", &bytes).unwrap();

        assert_eq!(table.headers, vec!["Número do modelo", "Unnamed: 1", "Quantidade"]);
        // 空行被跳过
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][2], CellValue::Number(10.0));
        assert_eq!(table.rows[1][0].as_identifier(), "7891234");
        assert_eq!(table.rows[1][2].as_quantity(), 5);
    }
}
