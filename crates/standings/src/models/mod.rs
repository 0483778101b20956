mod aggregate_record;
mod carry_over;
mod diagnostic;
mod match_result;
mod player;
mod prize;

pub use aggregate_record::AggregateRecord;
pub use carry_over::{CarryOverPolicy, CarryOverResult, CarryOvers};
pub use diagnostic::{Diagnostic, log_diagnostics};
pub use match_result::{GameOutcome, MatchResult, SideView};
pub use player::{Player, PlayerStatus, players_in_division};
pub use prize::Prize;
