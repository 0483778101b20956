use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_prize_reward"))]
pub struct Prize {
    #[validate(range(min = 1))]
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub description: Option<String>,
}

impl Prize {
    pub fn money(rank: u32, amount: Decimal) -> Self {
        Self {
            rank,
            amount: Some(amount),
            description: None,
        }
    }

    pub fn item(rank: u32, description: impl Into<String>) -> Self {
        Self {
            rank,
            amount: None,
            description: Some(description.into()),
        }
    }
}

fn validate_prize_reward(prize: &Prize) -> Result<(), ValidationError> {
    if prize.amount.is_none() && prize.description.is_none() {
        let mut error = ValidationError::new("prize_reward_required");
        error.message = Some(Cow::from(format!(
            "prize for rank {} needs an amount or a description",
            prize.rank
        )));
        return Err(error);
    }

    if let Some(amount) = prize.amount
        && amount.is_sign_negative()
    {
        let mut error = ValidationError::new("negative_prize_amount");
        error.message = Some(Cow::from(format!(
            "prize for rank {} has a negative amount",
            prize.rank
        )));
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_and_item_prizes_are_valid() {
        assert!(Prize::money(1, Decimal::from(500)).validate().is_ok());
        assert!(Prize::item(2, "Trophy").validate().is_ok());
    }

    #[test]
    fn test_empty_prize_is_invalid() {
        let prize = Prize {
            rank: 1,
            amount: None,
            description: None,
        };
        assert!(prize.validate().is_err());
    }

    #[test]
    fn test_rank_zero_is_invalid() {
        assert!(Prize::money(0, Decimal::from(10)).validate().is_err());
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        assert!(Prize::money(1, Decimal::from(-5)).validate().is_err());
    }
}
