pub mod history;
pub mod prizes;
pub mod standings;
pub mod views;

pub use history::{PlayerHistory, RoundHistory, RoundSnapshot};
pub use prizes::{PrizeAssignment, PrizeDistribution, PrizeSplitGroup};
pub use standings::{Standings, StandingsRow};
pub use views::{CrossTable, CrossTableCell, CrossTableRow, LastGame, ScoreboardRow};
