pub mod icons;
pub mod output;
pub mod sink;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{created, dim, file_loaded, file_started, header, info, leader, leader_line, section, success, warn};
pub use sink::ConsoleSink;
pub use table::{standings_table, stats_table, StandingsRow};
pub use theme::{theme, Theme};
