use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{ForcedList, WeekPlan};

/// Everything the planner remembers between runs.
///
/// Frozen and pinned meals are stored by name and resolved against the
/// catalog when a plan is generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    #[serde(default)]
    pub week_plan: Option<WeekPlan>,

    #[serde(default)]
    pub frozen: Vec<String>,

    #[serde(default)]
    pub pinned: Vec<String>,

    /// Normalized grocery item names already ticked off.
    #[serde(default)]
    pub checked_groceries: BTreeSet<String>,
}

impl PlannerState {
    pub fn list(&self, which: ForcedList) -> &[String] {
        match which {
            ForcedList::Frozen => &self.frozen,
            ForcedList::Pinned => &self.pinned,
        }
    }

    fn list_mut(&mut self, which: ForcedList) -> &mut Vec<String> {
        match which {
            ForcedList::Frozen => &mut self.frozen,
            ForcedList::Pinned => &mut self.pinned,
        }
    }

    /// Append a name unless already present. Returns whether it was added.
    pub fn add_forced(&mut self, which: ForcedList, name: &str) -> bool {
        let list = self.list_mut(which);
        if list.iter().any(|n| n == name) {
            return false;
        }
        list.push(name.to_string());
        true
    }

    /// Remove a name. Returns whether it was present.
    pub fn remove_forced(&mut self, which: ForcedList, name: &str) -> bool {
        let list = self.list_mut(which);
        let before = list.len();
        list.retain(|n| n != name);
        list.len() != before
    }

    pub fn clear_forced(&mut self, which: ForcedList) {
        self.list_mut(which).clear();
    }

    /// Replace the plan. Checked groceries belong to the old plan and are dropped.
    pub fn replace_plan(&mut self, plan: WeekPlan) {
        self.week_plan = Some(plan);
        self.checked_groceries.clear();
    }
}
