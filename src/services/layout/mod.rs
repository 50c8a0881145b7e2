// Layout service
// Sidebar rows and background row lines, with change detection

pub mod rows;
pub mod sidebar;

pub use rows::{GroupRowsInputs, GroupRowsLayout, GroupRowsWatch, RowClickTracker, RowEvent, RowLine};
pub use sidebar::{RowParity, SidebarInputs, SidebarLayout, SidebarRow, SidebarRowInputs, SidebarWatch};
