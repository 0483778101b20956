use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
    Tie,
    Bye,
}

impl GameOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Tie => "tie",
            Self::Bye => "bye",
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Self::Win => 'W',
            Self::Loss => 'L',
            Self::Tie => 'T',
            Self::Bye => 'B',
        }
    }
}

/// One submitted game (or bye) as persisted by the result-entry collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchResult {
    pub tournament_id: Uuid,
    pub round: u32,
    pub player_a: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_b: Option<Uuid>,
    #[serde(default)]
    pub score_a: Option<u32>,
    #[serde(default)]
    pub score_b: Option<u32>,
    #[serde(default)]
    pub is_bye: bool,
    #[serde(default)]
    pub is_forfeit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<NaiveDateTime>,
}

/// A result seen from one participant's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideView {
    pub player_id: Uuid,
    pub opponent_id: Option<Uuid>,
    pub own_score: u32,
    pub opponent_score: u32,
}

impl SideView {
    pub fn is_bye(&self) -> bool {
        self.opponent_id.is_none()
    }

    pub fn outcome(&self) -> GameOutcome {
        if self.is_bye() {
            return GameOutcome::Bye;
        }
        match self.own_score.cmp(&self.opponent_score) {
            std::cmp::Ordering::Greater => GameOutcome::Win,
            std::cmp::Ordering::Less => GameOutcome::Loss,
            std::cmp::Ordering::Equal => GameOutcome::Tie,
        }
    }

    /// Score differential for this game. A bye counts its full score.
    pub fn game_spread(&self) -> i64 {
        if self.is_bye() {
            i64::from(self.own_score)
        } else {
            i64::from(self.own_score) - i64::from(self.opponent_score)
        }
    }
}

impl MatchResult {
    pub fn game(
        tournament_id: Uuid,
        round: u32,
        player_a: Uuid,
        player_b: Uuid,
        score_a: u32,
        score_b: u32,
    ) -> Self {
        Self {
            tournament_id,
            round,
            player_a,
            player_b: Some(player_b),
            score_a: Some(score_a),
            score_b: Some(score_b),
            is_bye: false,
            is_forfeit: false,
            recorded_at: None,
        }
    }

    pub fn bye(tournament_id: Uuid, round: u32, player: Uuid, score: u32) -> Self {
        Self {
            tournament_id,
            round,
            player_a: player,
            player_b: None,
            score_a: Some(score),
            score_b: None,
            is_bye: true,
            is_forfeit: false,
            recorded_at: None,
        }
    }

    pub fn forfeit(mut self) -> Self {
        self.is_forfeit = true;
        self
    }

    pub fn with_recorded_at(mut self, recorded_at: NaiveDateTime) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// A row is a bye when flagged as one or when it has no second player;
    /// any player B on a flagged bye is ignored.
    pub fn is_bye(&self) -> bool {
        self.is_bye || self.player_b.is_none()
    }

    pub fn opponent_of(&self, player_id: Uuid) -> Option<Uuid> {
        if self.is_bye() {
            return None;
        }
        if self.player_a == player_id {
            self.player_b
        } else if self.player_b == Some(player_id) {
            Some(self.player_a)
        } else {
            None
        }
    }

    /// Participants of the row: the bye recipient alone, or both sides.
    pub fn participants(&self) -> Vec<Uuid> {
        match (self.is_bye(), self.player_b) {
            (false, Some(player_b)) => vec![self.player_a, player_b],
            _ => vec![self.player_a],
        }
    }

    pub fn sides(&self) -> Vec<SideView> {
        let score_a = self.score_a.unwrap_or(0);
        let score_b = self.score_b.unwrap_or(0);

        match (self.is_bye(), self.player_b) {
            (false, Some(player_b)) => vec![
                SideView {
                    player_id: self.player_a,
                    opponent_id: Some(player_b),
                    own_score: score_a,
                    opponent_score: score_b,
                },
                SideView {
                    player_id: player_b,
                    opponent_id: Some(self.player_a),
                    own_score: score_b,
                    opponent_score: score_a,
                },
            ],
            _ => vec![SideView {
                player_id: self.player_a,
                opponent_id: None,
                own_score: score_a,
                opponent_score: 0,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_sides_are_mirrored() {
        let result = MatchResult::game(id(100), 1, id(1), id(2), 450, 300);
        let sides = result.sides();
        assert_eq!(sides.len(), 2);
        assert_eq!(sides[0].outcome(), GameOutcome::Win);
        assert_eq!(sides[1].outcome(), GameOutcome::Loss);
        assert_eq!(sides[0].game_spread() + sides[1].game_spread(), 0);
    }

    #[test]
    fn test_missing_scores_count_as_zero() {
        let mut result = MatchResult::game(id(100), 1, id(1), id(2), 0, 0);
        result.score_a = None;
        result.score_b = Some(12);
        let sides = result.sides();
        assert_eq!(sides[0].own_score, 0);
        assert_eq!(sides[0].outcome(), GameOutcome::Loss);
    }

    #[test]
    fn test_flagged_bye_ignores_player_b() {
        let mut result = MatchResult::bye(id(100), 2, id(1), 50);
        result.player_b = Some(id(2));
        assert!(result.is_bye());
        assert_eq!(result.participants(), vec![id(1)]);
        assert_eq!(result.opponent_of(id(1)), None);

        let side = result.sides()[0];
        assert_eq!(side.outcome(), GameOutcome::Bye);
        assert_eq!(side.game_spread(), 50);
    }

    #[test]
    fn test_opponent_lookup() {
        let result = MatchResult::game(id(100), 1, id(1), id(2), 300, 300);
        assert_eq!(result.opponent_of(id(1)), Some(id(2)));
        assert_eq!(result.opponent_of(id(2)), Some(id(1)));
        assert_eq!(result.opponent_of(id(3)), None);
        assert_eq!(result.sides()[0].outcome(), GameOutcome::Tie);
    }
}
