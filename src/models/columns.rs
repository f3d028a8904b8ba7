use serde::Serialize;

/// 订单表中的列角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Identifier,
    Quantity,
}

/// 已解析的列：原始列名 + 位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    pub name: String,
    pub index: usize,
}

/// 列角色 -> 实际列，由列识别一次性构建后传给对账引擎
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub identifier: ResolvedColumn,
    pub quantity: ResolvedColumn,
}

impl ColumnMapping {
    pub fn get(&self, role: ColumnRole) -> &ResolvedColumn {
        match role {
            ColumnRole::Identifier => &self.identifier,
            ColumnRole::Quantity => &self.quantity,
        }
    }
}
