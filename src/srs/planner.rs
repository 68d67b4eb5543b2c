//! Session planning: mixing outstanding reviews with new material.

use serde::{Deserialize, Serialize};

use crate::domain::WordSchedulingState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
  Due,
  New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedItem {
  pub word_id: i64,
  pub kind: ItemKind,
}

/// An ordered study session, due items first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionPlan {
  pub items: Vec<PlannedItem>,
}

impl SessionPlan {
  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn due_count(&self) -> usize {
    self.items.iter().filter(|i| i.kind == ItemKind::Due).count()
  }

  pub fn new_count(&self) -> usize {
    self.items.iter().filter(|i| i.kind == ItemKind::New).count()
  }
}

/// Fill up to `daily_goal` items: due items first (in the order the
/// review queue produced them), then unseen words until the goal is met
/// or the source runs dry. Outstanding review debt beats new material,
/// so an over-goal backlog yields a plan with zero new items.
pub fn build_session(
  due: &[WordSchedulingState],
  new_words: impl IntoIterator<Item = i64>,
  daily_goal: i64,
) -> SessionPlan {
  if daily_goal <= 0 {
    return SessionPlan::default();
  }
  let goal = daily_goal as usize;

  let mut items: Vec<PlannedItem> = due
    .iter()
    .take(goal)
    .map(|s| PlannedItem {
      word_id: s.word_id,
      kind: ItemKind::Due,
    })
    .collect();

  for word_id in new_words {
    if items.len() >= goal {
      break;
    }
    items.push(PlannedItem {
      word_id,
      kind: ItemKind::New,
    });
  }

  SessionPlan { items }
}
