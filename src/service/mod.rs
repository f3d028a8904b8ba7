pub mod detector;
pub mod engine;
pub mod formatter;
pub mod loader;
pub mod partition;
pub mod reader;
pub mod reconciler;

pub use detector::detect_columns;
pub use engine::{decide, reconcile, Decision};
pub use formatter::render_workbook;
pub use loader::{load_multiple_table, load_multiple_table_from_path, LoadReport};
pub use partition::partition;
pub use reader::{allowed_file, read_order_table};
pub use reconciler::{ReconcileOutcome, ReconcileService};
