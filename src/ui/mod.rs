pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, is_quiet, section, status, success, vector_summary, warn};
pub use progress::SeedProgress;
pub use table::{stats_table, vector_table};
pub use theme::{theme, Theme};
