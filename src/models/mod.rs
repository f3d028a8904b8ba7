pub mod columns;
pub mod line;
pub mod multiple;
pub mod result;
pub mod table;

pub use columns::{ColumnMapping, ColumnRole, ResolvedColumn};
pub use line::{LineStatus, OrderLine, ReconciledLine};
pub use multiple::MultipleTable;
pub use result::{ReconcileSummary, ResultSet};
pub use table::{CellValue, OrderTable};
