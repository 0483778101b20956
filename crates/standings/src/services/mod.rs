pub mod aggregation;
pub mod carry_over;
pub mod head_to_head;
pub mod history;
pub mod prizes;
pub mod ranking;
pub mod screening;
pub mod strength;
pub mod views;

pub use aggregation::{Aggregation, aggregate_results, fold_result, fold_results, initial_records};
pub use carry_over::{compute_carry_over, seed_division};
pub use head_to_head::{HeadToHead, PairRecord};
pub use history::build_round_history;
pub use prizes::split_prizes;
pub use ranking::{TieBreakData, rank_field, rank_players};
pub use screening::{ScreenedResults, screen_results};
pub use strength::opponent_win_percentages;
pub use views::{build_cross_table, build_scoreboard};
