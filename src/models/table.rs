use serde::Serialize;

/// 单元格值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 从文本构造：空串视为空单元格
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 文本形式（整数值的浮点数不带小数部分）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
        }
    }

    /// 商品编码：去掉首尾空白的文本形式
    pub fn as_identifier(&self) -> String {
        self.as_text().trim().to_string()
    }

    /// 请求数量：无法解析时为 0，小数向零截断
    pub fn as_quantity(&self) -> i64 {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => n,
                Err(_) => return 0,
            },
            CellValue::Empty | CellValue::Bool(_) => return 0,
        };

        if !value.is_finite() {
            return 0;
        }
        // `as` 对超出范围的值做饱和转换
        value.trunc() as i64
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 订单表：表头 + 行（每行与表头等宽）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl OrderTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 追加一行，短行补空、长行截断到表头宽度
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.headers.len(), CellValue::Empty);
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_coercion() {
        assert_eq!(CellValue::Text("10".into()).as_quantity(), 10);
        assert_eq!(CellValue::Text(" 12 ".into()).as_quantity(), 12);
        assert_eq!(CellValue::Text("10.7".into()).as_quantity(), 10);
        assert_eq!(CellValue::Text("-3.9".into()).as_quantity(), -3);
        assert_eq!(CellValue::Text("abc".into()).as_quantity(), 0);
        assert_eq!(CellValue::Text("inf".into()).as_quantity(), 0);
        assert_eq!(CellValue::Number(24.0).as_quantity(), 24);
        assert_eq!(CellValue::Number(f64::NAN).as_quantity(), 0);
        assert_eq!(CellValue::Empty.as_quantity(), 0);
        assert_eq!(CellValue::Bool(true).as_quantity(), 0);
    }

    #[test]
    fn identifier_text() {
        assert_eq!(CellValue::Text("  A1 ".into()).as_identifier(), "A1");
        assert_eq!(CellValue::Number(7891234.0).as_identifier(), "7891234");
        assert_eq!(CellValue::Number(1.5).as_identifier(), "1.5");
        assert_eq!(CellValue::Empty.as_identifier(), "");
    }

    #[test]
    fn push_row_normalizes_width() {
        let mut table = OrderTable::new(vec!["a".into(), "b".into()]);
        table.push_row(vec![CellValue::from_text("1")]);
        table.push_row(vec![
            CellValue::from_text("1"),
            CellValue::from_text("2"),
            CellValue::from_text("3"),
        ]);

        assert_eq!(table.rows[0], vec![CellValue::Text("1".into()), CellValue::Empty]);
        assert_eq!(table.rows[1].len(), 2);
    }
}
