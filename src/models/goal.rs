//! Savings goal model
//!
//! A goal tracks money set aside toward a target. The saved amount only moves
//! through explicit edits or "add funds"; transactions never touch it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::color::ColorTag;
use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub name: String,

    pub target_amount: Money,

    /// Amount saved so far
    pub current_amount: Money,

    pub deadline: Option<NaiveDate>,

    #[serde(default = "default_goal_icon")]
    pub icon: String,

    #[serde(default = "default_goal_color")]
    pub color: ColorTag,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_goal_icon() -> String {
    "🎯".to_string()
}

fn default_goal_color() -> ColorTag {
    ColorTag::Indigo
}

impl Goal {
    /// Create a new goal with nothing saved yet
    pub fn new(id: GoalId, name: impl Into<String>, target_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            deadline: None,
            icon: default_goal_icon(),
            color: default_goal_color(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add money to the saved amount
    pub fn add_funds(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveDeposit(amount));
        }
        self.current_amount += amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Amount still missing (never negative)
    pub fn remaining(&self) -> Money {
        if self.current_amount >= self.target_amount {
            Money::zero()
        } else {
            self.target_amount - self.current_amount
        }
    }

    /// Whole days from `today` until the deadline; negative once it has passed
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|deadline| (deadline - today).num_days())
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }

        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }

        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeSaved(self.current_amount));
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} / {})",
            self.icon, self.name, self.current_amount, self.target_amount
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
    NegativeSaved(Money),
    NonPositiveDeposit(Money),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(amount) => {
                write!(f, "Goal target must be positive (got {})", amount)
            }
            Self::NegativeSaved(amount) => {
                write!(f, "Saved amount cannot be negative (got {})", amount)
            }
            Self::NonPositiveDeposit(amount) => {
                write!(f, "Amount to add must be positive (got {})", amount)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}
