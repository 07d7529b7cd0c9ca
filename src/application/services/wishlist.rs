//! Wishlist session service
//!
//! Holds the hierarchy store and theme for one session. Every successful
//! mutation is persisted and then announced to the registered observers,
//! which is how the presentation layer knows to re-render.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::services::PersistenceService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{EntityId, Hierarchy, HierarchyStore, IdGenerator, Item, Phase, Section, Theme};

/// What a mutation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    PhaseAdded { phase_id: EntityId },
    PhaseRenamed { phase_id: EntityId },
    PhaseDeleted { phase_id: EntityId },
    PhaseCollapseToggled { phase_id: EntityId, collapsed: bool },
    PhasesReordered { from: usize, to: usize },
    SectionAdded { phase_id: EntityId, section_id: EntityId },
    SectionRenamed { section_id: EntityId },
    SectionDeleted { phase_id: EntityId, section_id: EntityId },
    SectionCollapseToggled { section_id: EntityId, collapsed: bool },
    SectionsReordered { phase_id: EntityId, from: usize, to: usize },
    ItemAdded { section_id: EntityId, item_id: EntityId },
    ItemEdited { item_id: EntityId },
    ItemOrderedToggled { item_id: EntityId, ordered: bool },
    ItemDeleted { section_id: EntityId, item_id: EntityId },
    ItemsReordered { section_id: EntityId, from: usize, to: usize },
    ThemeToggled { theme: Theme },
}

/// Receives the full state after each successful mutation.
pub trait ChangeObserver {
    fn on_change(&self, change: &Change, hierarchy: &Hierarchy, theme: Theme);
}

/// One wishlist session: state, persistence and change notification.
pub struct WishlistService {
    store: HierarchyStore,
    theme: Theme,
    persistence: PersistenceService,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl WishlistService {
    /// Load the persisted state and start a session on it.
    #[instrument(level = "debug", skip_all)]
    pub fn open(persistence: PersistenceService, ids: Arc<dyn IdGenerator>) -> ApplicationResult<Self> {
        let (phases, theme) = persistence.load()?;
        debug!("open: {} phase(s), theme={}", phases.len(), theme);
        Ok(Self {
            store: HierarchyStore::with_phases(phases, ids),
            theme,
            persistence,
            observers: Vec::new(),
        })
    }

    /// Register an observer; it is called after every successful mutation.
    pub fn subscribe(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    pub fn store(&self) -> &HierarchyStore {
        &self.store
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        self.store.hierarchy()
    }

    pub fn phases(&self) -> &[Phase] {
        self.store.phases()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Persist the current state without a mutation.
    pub fn save(&self) -> ApplicationResult<()> {
        self.persistence.save(self.store.phases(), self.theme)
    }

    /// Persist, then notify observers.
    ///
    /// Observers run even when saving fails: memory already holds the new
    /// state and stays usable, only durability is lost.
    fn commit(&self, change: Change) -> ApplicationResult<()> {
        let saved = self.save();
        if let Err(e) = &saved {
            warn!("commit: {:?} not persisted: {}", change, e);
        }
        for observer in &self.observers {
            observer.on_change(&change, self.store.hierarchy(), self.theme);
        }
        saved
    }

    // ============================================================
    // Phase operations
    // ============================================================

    #[instrument(level = "debug", skip(self))]
    pub fn add_phase(&mut self, title: &str) -> ApplicationResult<Phase> {
        required("title", title)?;
        let phase = self.store.add_phase(title).clone();
        self.commit(Change::PhaseAdded {
            phase_id: phase.id.clone(),
        })?;
        Ok(phase)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename_phase(&mut self, phase_id: &EntityId, title: &str) -> ApplicationResult<()> {
        required("title", title)?;
        self.store.rename_phase(phase_id, title)?;
        self.commit(Change::PhaseRenamed {
            phase_id: phase_id.clone(),
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_phase(&mut self, phase_id: &EntityId) -> ApplicationResult<Phase> {
        let removed = self.store.delete_phase(phase_id)?;
        self.commit(Change::PhaseDeleted {
            phase_id: phase_id.clone(),
        })?;
        Ok(removed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn toggle_collapse_phase(&mut self, phase_id: &EntityId) -> ApplicationResult<bool> {
        let collapsed = self.store.toggle_collapse_phase(phase_id)?;
        self.commit(Change::PhaseCollapseToggled {
            phase_id: phase_id.clone(),
            collapsed,
        })?;
        Ok(collapsed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn reorder_phases(&mut self, from: usize, to: usize) -> ApplicationResult<()> {
        self.store.reorder_phases(from, to)?;
        self.commit(Change::PhasesReordered { from, to })
    }

    // ============================================================
    // Section operations
    // ============================================================

    #[instrument(level = "debug", skip(self))]
    pub fn add_section(&mut self, phase_id: &EntityId, title: &str) -> ApplicationResult<Section> {
        required("title", title)?;
        let section = self.store.add_section(phase_id, title)?.clone();
        self.commit(Change::SectionAdded {
            phase_id: phase_id.clone(),
            section_id: section.id.clone(),
        })?;
        Ok(section)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename_section(&mut self, section_id: &EntityId, title: &str) -> ApplicationResult<()> {
        required("title", title)?;
        self.store.rename_section(section_id, title)?;
        self.commit(Change::SectionRenamed {
            section_id: section_id.clone(),
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_section(
        &mut self,
        phase_id: &EntityId,
        section_id: &EntityId,
    ) -> ApplicationResult<Section> {
        let removed = self.store.delete_section(phase_id, section_id)?;
        self.commit(Change::SectionDeleted {
            phase_id: phase_id.clone(),
            section_id: section_id.clone(),
        })?;
        Ok(removed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn toggle_collapse_section(&mut self, section_id: &EntityId) -> ApplicationResult<bool> {
        let collapsed = self.store.toggle_collapse_section(section_id)?;
        self.commit(Change::SectionCollapseToggled {
            section_id: section_id.clone(),
            collapsed,
        })?;
        Ok(collapsed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn reorder_sections(
        &mut self,
        phase_id: &EntityId,
        from: usize,
        to: usize,
    ) -> ApplicationResult<()> {
        self.store.reorder_sections(phase_id, from, to)?;
        self.commit(Change::SectionsReordered {
            phase_id: phase_id.clone(),
            from,
            to,
        })
    }

    // ============================================================
    // Item operations
    // ============================================================

    #[instrument(level = "debug", skip(self))]
    pub fn add_item(
        &mut self,
        section_id: &EntityId,
        name: &str,
        link: &str,
        note: &str,
    ) -> ApplicationResult<Item> {
        required("name", name)?;
        let item = self.store.add_item(section_id, name, link, note)?.clone();
        self.commit(Change::ItemAdded {
            section_id: section_id.clone(),
            item_id: item.id.clone(),
        })?;
        Ok(item)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn edit_item(
        &mut self,
        item_id: &EntityId,
        name: &str,
        link: &str,
        note: &str,
    ) -> ApplicationResult<()> {
        required("name", name)?;
        self.store.edit_item(item_id, name, link, note)?;
        self.commit(Change::ItemEdited {
            item_id: item_id.clone(),
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn toggle_ordered(&mut self, item_id: &EntityId) -> ApplicationResult<bool> {
        let ordered = self.store.toggle_ordered(item_id)?;
        self.commit(Change::ItemOrderedToggled {
            item_id: item_id.clone(),
            ordered,
        })?;
        Ok(ordered)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_item(
        &mut self,
        section_id: &EntityId,
        item_id: &EntityId,
    ) -> ApplicationResult<Item> {
        let removed = self.store.delete_item(section_id, item_id)?;
        self.commit(Change::ItemDeleted {
            section_id: section_id.clone(),
            item_id: item_id.clone(),
        })?;
        Ok(removed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn reorder_items(
        &mut self,
        section_id: &EntityId,
        from: usize,
        to: usize,
    ) -> ApplicationResult<()> {
        self.store.reorder_items(section_id, from, to)?;
        self.commit(Change::ItemsReordered {
            section_id: section_id.clone(),
            from,
            to,
        })
    }

    // ============================================================
    // Theme
    // ============================================================

    #[instrument(level = "debug", skip(self))]
    pub fn toggle_theme(&mut self) -> ApplicationResult<Theme> {
        self.theme = self.theme.toggled();
        self.commit(Change::ThemeToggled { theme: self.theme })?;
        Ok(self.theme)
    }
}

/// Reject values that are empty after trimming.
fn required(field: &'static str, value: &str) -> ApplicationResult<()> {
    if value.trim().is_empty() {
        return Err(ApplicationError::RequiredField { field });
    }
    Ok(())
}
