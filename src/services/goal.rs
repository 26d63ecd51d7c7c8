//! Goal service

use chrono::NaiveDate;

use crate::error::{FinlensError, FinlensResult};
use crate::models::{ColorTag, Goal, GoalId, Money};
use crate::storage::Storage;

/// Service for savings goals
pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub deadline: Option<NaiveDate>,
    pub icon: Option<String>,
    pub color: Option<ColorTag>,
}

/// Fields that can be changed on an existing goal
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub current_amount: Option<Money>,
    /// `Some(None)` clears the deadline
    pub deadline: Option<Option<NaiveDate>>,
    pub icon: Option<String>,
    pub color: Option<ColorTag>,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a goal
    pub fn create(&self, input: NewGoal) -> FinlensResult<Goal> {
        let goal = self.storage.goals.insert_with(|id| {
            let mut goal = Goal::new(id, input.name.trim(), input.target_amount);
            goal.current_amount = input.current_amount;
            goal.deadline = input.deadline;
            if let Some(icon) = input.icon.filter(|i| !i.trim().is_empty()) {
                goal.icon = icon;
            }
            if let Some(color) = input.color {
                goal.color = color;
            }
            goal.validate()
                .map_err(|e| FinlensError::Validation(e.to_string()))?;
            Ok(goal)
        })?;
        self.storage.goals.save()?;

        tracing::info!(goal = %goal.id, name = %goal.name, "created goal");
        Ok(goal)
    }

    pub fn get(&self, id: GoalId) -> FinlensResult<Option<Goal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> FinlensResult<Option<Goal>> {
        let wanted = identifier.trim().to_lowercase();
        let goals = self.storage.goals.list()?;

        if let Some(goal) = goals.iter().find(|g| g.name.to_lowercase() == wanted) {
            return Ok(Some(goal.clone()));
        }

        if let Ok(id) = identifier.parse::<GoalId>() {
            return self.storage.goals.get(id);
        }

        Ok(None)
    }

    pub fn resolve(&self, identifier: &str) -> FinlensResult<Goal> {
        self.find(identifier)?
            .ok_or_else(|| FinlensError::goal_not_found(identifier))
    }

    /// Goals ordered by deadline, goals without one last
    pub fn list(&self) -> FinlensResult<Vec<Goal>> {
        let mut goals = self.storage.goals.list()?;
        goals.sort_by(|a, b| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(goals)
    }

    /// Add money to a goal's saved amount
    pub fn add_funds(&self, id: GoalId, amount: Money) -> FinlensResult<Goal> {
        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| FinlensError::goal_not_found(id.to_string()))?;

        goal.add_funds(amount)
            .map_err(|e| FinlensError::Validation(e.to_string()))?;
        self.storage.goals.update(goal.clone())?;
        self.storage.goals.save()?;

        tracing::info!(goal = %id, %amount, saved = %goal.current_amount, "added funds");
        Ok(goal)
    }

    /// Apply an update to a goal
    pub fn update(&self, id: GoalId, changes: GoalUpdate) -> FinlensResult<Goal> {
        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| FinlensError::goal_not_found(id.to_string()))?;

        if let Some(name) = changes.name {
            goal.name = name.trim().to_string();
        }
        if let Some(target) = changes.target_amount {
            goal.target_amount = target;
        }
        if let Some(saved) = changes.current_amount {
            goal.current_amount = saved;
        }
        if let Some(deadline) = changes.deadline {
            goal.deadline = deadline;
        }
        if let Some(icon) = changes.icon {
            goal.icon = icon;
        }
        if let Some(color) = changes.color {
            goal.color = color;
        }
        goal.updated_at = chrono::Utc::now();

        goal.validate()
            .map_err(|e| FinlensError::Validation(e.to_string()))?;
        self.storage.goals.update(goal.clone())?;
        self.storage.goals.save()?;

        tracing::info!(goal = %id, "updated goal");
        Ok(goal)
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> FinlensResult<Goal> {
        let goal = self
            .storage
            .goals
            .delete(id)?
            .ok_or_else(|| FinlensError::goal_not_found(id.to_string()))?;
        self.storage.goals.save()?;

        tracing::info!(goal = %id, "deleted goal");
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinlensPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn new_goal(name: &str, target: i64, deadline: Option<NaiveDate>) -> NewGoal {
        NewGoal {
            name: name.into(),
            target_amount: Money::from_units(target),
            current_amount: Money::zero(),
            deadline,
            icon: None,
            color: None,
        }
    }

    #[test]
    fn test_create_with_defaults() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);

        let goal = service.create(new_goal("Reserva", 10000, None)).unwrap();
        assert_eq!(goal.icon, "🎯");
        assert_eq!(goal.color, ColorTag::Indigo);
        assert!(service
            .create(new_goal("Nada", 0, None))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_add_funds_persists() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service.create(new_goal("Viagem Europa", 15000, None)).unwrap();

        service.add_funds(goal.id, Money::from_units(500)).unwrap();
        service.add_funds(goal.id, Money::from_units(250)).unwrap();
        assert!(service
            .add_funds(goal.id, Money::from_units(-5))
            .unwrap_err()
            .is_validation());

        storage.goals.load().unwrap();
        let stored = service.get(goal.id).unwrap().unwrap();
        assert_eq!(stored.current_amount, Money::from_units(750));
    }

    #[test]
    fn test_list_orders_by_deadline() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        service.create(new_goal("Sem prazo", 100, None)).unwrap();
        service
            .create(new_goal("Tarde", 100, NaiveDate::from_ymd_opt(2027, 1, 1)))
            .unwrap();
        service
            .create(new_goal("Cedo", 100, NaiveDate::from_ymd_opt(2026, 6, 1)))
            .unwrap();

        let names: Vec<_> = service.list().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Cedo", "Tarde", "Sem prazo"]);
    }

    #[test]
    fn test_update_clears_deadline() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoalService::new(&storage);
        let goal = service
            .create(new_goal("Carro", 40000, NaiveDate::from_ymd_opt(2026, 12, 1)))
            .unwrap();

        let updated = service
            .update(
                goal.id,
                GoalUpdate {
                    deadline: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.deadline.is_none());
        assert_eq!(service.resolve("carro").unwrap().id, goal.id);
    }
}
