use utoipa::OpenApi;

use crate::Result;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tournament standings",
        description = "Value types consumed and produced by the standings engine"
    ),
    components(
        schemas(
            standings::StandingsConfig,
            standings::TieDepth,
            standings::models::Player,
            standings::models::PlayerStatus,
            standings::models::MatchResult,
            standings::models::GameOutcome,
            standings::models::AggregateRecord,
            standings::models::CarryOverPolicy,
            standings::models::CarryOverResult,
            standings::models::Prize,
            standings::models::Diagnostic,
            standings::dto::Standings,
            standings::dto::StandingsRow,
            standings::dto::PrizeAssignment,
            standings::dto::PrizeSplitGroup,
            standings::dto::PrizeDistribution,
            standings::dto::RoundSnapshot,
            standings::dto::PlayerHistory,
            standings::dto::RoundHistory,
            standings::dto::CrossTable,
            standings::dto::CrossTableRow,
            standings::dto::CrossTableCell,
            standings::dto::ScoreboardRow,
            standings::dto::LastGame,
            crate::snapshot::TournamentSnapshot,
            crate::snapshot::TournamentInfo,
        )
    )
)]
pub struct EngineSchema;

pub fn schema_json() -> Result<String> {
    Ok(EngineSchema::openapi().to_pretty_json()?)
}
