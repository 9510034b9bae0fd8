pub mod chart;
pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use chart::render_chart;
pub use icons::Icons;
pub use output::{dim, error, header, hint, info, muted, success, summary_row, warn};
pub use table::{SortKey, TableBuilder, entries_table, sort_entries};
pub use theme::{Theme, theme};
