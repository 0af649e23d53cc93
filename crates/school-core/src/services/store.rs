//! Item and roster store
//!
//! Keeps the item collection and the roster in memory and writes every
//! mutation straight through to a [`KeyValueStore`].

use crate::db::KeyValueStore;
use crate::error::{Error, Result};
use crate::models::{CreateItem, Item, ItemScope, ItemStatus, Roster};
use chrono::Utc;
use uuid::Uuid;

/// Storage key of the item collection (JSON array of items)
pub const ITEMS_KEY: &str = "school.items.v1";
/// Storage key of the roster (JSON object)
pub const ROSTER_KEY: &str = "school.roster.v1";

pub struct ItemStore<S: KeyValueStore> {
    backend: S,
    roster: Roster,
    items: Vec<Item>,
}

impl<S: KeyValueStore> ItemStore<S> {
    /// Open the store, loading (and seeding, if needed) the roster and items
    pub async fn open(backend: S) -> Result<Self> {
        let mut store = Self {
            backend,
            roster: Roster::seed(),
            items: Vec::new(),
        };
        store.load_roster().await?;
        store.load_items().await?;
        Ok(store)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Items, newest first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reload the roster from storage. An absent or unreadable roster is
    /// replaced by the seed, which is written back.
    pub async fn load_roster(&mut self) -> Result<&Roster> {
        let stored = self.backend.get(ROSTER_KEY).await?;

        let parsed = match stored {
            Some(raw) => match serde_json::from_str::<Roster>(&raw) {
                Ok(roster) => Some(roster),
                Err(e) => {
                    log::warn!("[store:roster] Stored roster is unreadable, restoring seed: {}", e);
                    None
                }
            },
            None => None,
        };

        self.roster = match parsed {
            Some(roster) => roster,
            None => {
                let seed = Roster::seed();
                self.backend
                    .set(ROSTER_KEY, &serde_json::to_string(&seed)?)
                    .await?;
                log::info!("[store:roster] Seed roster written");
                seed
            }
        };

        Ok(&self.roster)
    }

    /// Reload items from storage. Unreadable data yields an empty list and is
    /// left in place until the next write.
    pub async fn load_items(&mut self) -> Result<&[Item]> {
        self.items = match self.backend.get(ITEMS_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<Item>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    log::warn!("[store:items] Stored items are unreadable, starting empty: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        log::debug!("[store:items] Loaded {} items", self.items.len());
        Ok(&self.items)
    }

    /// Validate a candidate and, if it passes, store it at the front of the
    /// collection
    pub async fn add_item(&mut self, candidate: &CreateItem) -> Result<Item> {
        self.validate(candidate)?;

        let item = Item {
            id: Uuid::new_v4().to_string(),
            kind: candidate.kind,
            scope: candidate.scope,
            class_ids: candidate.class_ids.clone(),
            student_ids: candidate.student_ids.clone(),
            subject: candidate.subject.clone(),
            title: candidate.title.trim().to_string(),
            description: candidate.description.trim().to_string(),
            points: candidate.points,
            due_at: candidate.due_at,
            accommodations: {
                let mut acc = candidate.accommodations.clone();
                acc.alternative_material = acc
                    .alternative_material
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty());
                acc
            },
            created_at: Utc::now(),
            status: ItemStatus::Open,
        };

        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(item.clone());
        next.extend(self.items.iter().cloned());
        self.persist(&next).await?;
        self.items = next;

        log::info!("[store:items] Created {} '{}' ({})", item.kind, item.title, item.id);
        Ok(item)
    }

    /// Remove an item; unknown ids are ignored
    pub async fn delete_item(&mut self, id: &str) -> Result<bool> {
        let next: Vec<Item> = self.items.iter().filter(|i| i.id != id).cloned().collect();
        let removed = next.len() != self.items.len();
        self.persist(&next).await?;
        self.items = next;

        log::debug!("[store:items] Delete {} (removed: {})", id, removed);
        Ok(removed)
    }

    /// Remove every item
    pub async fn clear_all(&mut self) -> Result<()> {
        self.persist(&[]).await?;
        self.items.clear();
        log::info!("[store:items] Cleared all items");
        Ok(())
    }

    /// Drop the stored roster and restore the seed. Selections in `draft`
    /// may point at entities that no longer exist, so they are cleared.
    pub async fn reset_roster_to_seed(&mut self, draft: &mut CreateItem) -> Result<&Roster> {
        self.backend.remove(ROSTER_KEY).await?;
        draft.clear_selections();
        log::info!("[store:roster] Roster reset to seed");
        self.load_roster().await
    }

    fn validate(&self, candidate: &CreateItem) -> Result<()> {
        if candidate.title.trim().is_empty() {
            return Err(Error::validation("Enter a title."));
        }
        if candidate.subject.trim().is_empty() {
            return Err(Error::validation("Select the subject."));
        }
        match candidate.scope {
            ItemScope::General if candidate.class_ids.is_empty() => {
                return Err(Error::validation("Select at least one class."));
            }
            ItemScope::Individual if candidate.student_ids.is_empty() => {
                return Err(Error::validation("Select at least one student."));
            }
            _ => {}
        }

        if let Some(unknown) = candidate
            .class_ids
            .iter()
            .find(|id| self.roster.class(id).is_none())
        {
            return Err(Error::validation(format!("Unknown class: {}", unknown)));
        }
        if let Some(unknown) = candidate
            .student_ids
            .iter()
            .find(|id| self.roster.student(id).is_none())
        {
            return Err(Error::validation(format!("Unknown student: {}", unknown)));
        }

        Ok(())
    }

    async fn persist(&self, items: &[Item]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.backend.set(ITEMS_KEY, &json).await
    }
}
