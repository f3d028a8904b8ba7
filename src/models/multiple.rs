use indexmap::IndexMap;

/// 倍数表：商品编码 -> 最小订货倍数
///
/// 编码区分大小写、已去除首尾空白；倍数恒为正。重复编码以最后一次出现为准。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipleTable {
    multiples: IndexMap<String, i64>,
}

impl MultipleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条倍数；倍数 <= 0 时拒绝并返回 false
    pub fn insert(&mut self, item: impl Into<String>, multiple: i64) -> bool {
        if multiple <= 0 {
            return false;
        }
        self.multiples.insert(item.into().trim().to_string(), multiple);
        true
    }

    pub fn get(&self, item: &str) -> Option<i64> {
        self.multiples.get(item.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.multiples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multiples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.multiples.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for MultipleTable {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut table = MultipleTable::new();
        for (item, multiple) in iter {
            table.insert(item, multiple);
        }
        table
    }
}
