pub mod deployment_row;

pub use deployment_row::{render_rows, DeploymentRow, RowAction};
