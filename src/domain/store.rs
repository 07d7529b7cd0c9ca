//! Hierarchy store: in-memory tree of phases, sections and items
//!
//! Every operation is synchronous and in-memory. The store never persists
//! itself; callers decide when to save.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    move_element, DomainError, DomainResult, EntityId, EntityKind, Hierarchy, IdGenerator, Item,
    Phase, Section,
};

/// Owner of the [`Hierarchy`] aggregate and all mutations on it.
///
/// Operations either succeed completely or leave the tree untouched.
/// Text fields are trimmed; rejecting empty required fields is up to the caller.
pub struct HierarchyStore {
    hierarchy: Hierarchy,
    ids: Arc<dyn IdGenerator>,
}

impl HierarchyStore {
    /// Create an empty store.
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_phases(Vec::new(), ids)
    }

    /// Create a store from previously loaded phases.
    pub fn with_phases(phases: Vec<Phase>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            hierarchy: Hierarchy::new(phases),
            ids,
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Read-only snapshot of the phases, for rendering and export.
    pub fn phases(&self) -> &[Phase] {
        &self.hierarchy.phases
    }

    pub fn into_hierarchy(self) -> Hierarchy {
        self.hierarchy
    }

    // ============================================================
    // Lookups
    // ============================================================

    pub fn phase(&self, phase_id: &EntityId) -> DomainResult<&Phase> {
        self.hierarchy
            .phases
            .iter()
            .find(|p| &p.id == phase_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Phase, phase_id))
    }

    pub fn section(&self, section_id: &EntityId) -> DomainResult<&Section> {
        self.hierarchy
            .phases
            .iter()
            .flat_map(|p| &p.sections)
            .find(|s| &s.id == section_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Section, section_id))
    }

    pub fn item(&self, item_id: &EntityId) -> DomainResult<&Item> {
        self.hierarchy
            .phases
            .iter()
            .flat_map(|p| &p.sections)
            .flat_map(|s| &s.items)
            .find(|i| &i.id == item_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Item, item_id))
    }

    /// Phase owning the given section.
    pub fn phase_of_section(&self, section_id: &EntityId) -> DomainResult<&Phase> {
        self.hierarchy
            .phases
            .iter()
            .find(|p| p.sections.iter().any(|s| &s.id == section_id))
            .ok_or_else(|| DomainError::not_found(EntityKind::Section, section_id))
    }

    /// Section owning the given item.
    pub fn section_of_item(&self, item_id: &EntityId) -> DomainResult<&Section> {
        self.hierarchy
            .phases
            .iter()
            .flat_map(|p| &p.sections)
            .find(|s| s.items.iter().any(|i| &i.id == item_id))
            .ok_or_else(|| DomainError::not_found(EntityKind::Item, item_id))
    }

    /// Whether any phase, section or item carries this id.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.phase(id).is_ok() || self.section(id).is_ok() || self.item(id).is_ok()
    }

    fn phase_mut(&mut self, phase_id: &EntityId) -> DomainResult<&mut Phase> {
        self.hierarchy
            .phases
            .iter_mut()
            .find(|p| &p.id == phase_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Phase, phase_id))
    }

    fn section_mut(&mut self, section_id: &EntityId) -> DomainResult<&mut Section> {
        self.hierarchy
            .phases
            .iter_mut()
            .flat_map(|p| p.sections.iter_mut())
            .find(|s| &s.id == section_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Section, section_id))
    }

    fn item_mut(&mut self, item_id: &EntityId) -> DomainResult<&mut Item> {
        self.hierarchy
            .phases
            .iter_mut()
            .flat_map(|p| p.sections.iter_mut())
            .flat_map(|s| s.items.iter_mut())
            .find(|i| &i.id == item_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Item, item_id))
    }

    // ============================================================
    // Phase operations
    // ============================================================

    /// Append a new phase with no sections.
    pub fn add_phase(&mut self, title: &str) -> &Phase {
        let phase = Phase {
            id: self.ids.next_id(),
            title: title.trim().to_string(),
            collapsed: false,
            sections: Vec::new(),
        };
        debug!("add_phase: id={} title={:?}", phase.id, phase.title);
        let idx = self.hierarchy.phases.len();
        self.hierarchy.phases.push(phase);
        &self.hierarchy.phases[idx]
    }

    pub fn rename_phase(&mut self, phase_id: &EntityId, title: &str) -> DomainResult<()> {
        let phase = self.phase_mut(phase_id)?;
        phase.title = title.trim().to_string();
        debug!("rename_phase: id={} title={:?}", phase_id, phase.title);
        Ok(())
    }

    /// Remove the phase together with all of its sections and items.
    pub fn delete_phase(&mut self, phase_id: &EntityId) -> DomainResult<Phase> {
        let pos = self
            .hierarchy
            .phases
            .iter()
            .position(|p| &p.id == phase_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Phase, phase_id))?;
        let removed = self.hierarchy.phases.remove(pos);
        debug!(
            "delete_phase: id={} sections={}",
            phase_id,
            removed.sections.len()
        );
        Ok(removed)
    }

    /// Flip `collapsed`; returns the new value.
    pub fn toggle_collapse_phase(&mut self, phase_id: &EntityId) -> DomainResult<bool> {
        let phase = self.phase_mut(phase_id)?;
        phase.collapsed = !phase.collapsed;
        debug!("toggle_collapse_phase: id={} collapsed={}", phase_id, phase.collapsed);
        Ok(phase.collapsed)
    }

    pub fn reorder_phases(&mut self, from: usize, to: usize) -> DomainResult<()> {
        debug!("reorder_phases: from={} to={}", from, to);
        move_element(&mut self.hierarchy.phases, from, to)
    }

    // ============================================================
    // Section operations
    // ============================================================

    /// Append a new, empty section to the phase.
    pub fn add_section(&mut self, phase_id: &EntityId, title: &str) -> DomainResult<&Section> {
        let id = self.ids.next_id();
        let phase = self.phase_mut(phase_id)?;
        debug!("add_section: phase={} id={}", phase_id, id);
        phase.sections.push(Section {
            id,
            title: title.trim().to_string(),
            collapsed: false,
            items: Vec::new(),
        });
        let idx = phase.sections.len() - 1;
        Ok(&phase.sections[idx])
    }

    pub fn rename_section(&mut self, section_id: &EntityId, title: &str) -> DomainResult<()> {
        let section = self.section_mut(section_id)?;
        section.title = title.trim().to_string();
        debug!("rename_section: id={} title={:?}", section_id, section.title);
        Ok(())
    }

    /// Remove a section (and its items) from the given phase.
    pub fn delete_section(
        &mut self,
        phase_id: &EntityId,
        section_id: &EntityId,
    ) -> DomainResult<Section> {
        let phase = self.phase_mut(phase_id)?;
        let pos = phase
            .sections
            .iter()
            .position(|s| &s.id == section_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Section, section_id))?;
        let removed = phase.sections.remove(pos);
        debug!(
            "delete_section: phase={} id={} items={}",
            phase_id,
            section_id,
            removed.items.len()
        );
        Ok(removed)
    }

    pub fn toggle_collapse_section(&mut self, section_id: &EntityId) -> DomainResult<bool> {
        let section = self.section_mut(section_id)?;
        section.collapsed = !section.collapsed;
        debug!(
            "toggle_collapse_section: id={} collapsed={}",
            section_id, section.collapsed
        );
        Ok(section.collapsed)
    }

    pub fn reorder_sections(
        &mut self,
        phase_id: &EntityId,
        from: usize,
        to: usize,
    ) -> DomainResult<()> {
        let phase = self.phase_mut(phase_id)?;
        debug!("reorder_sections: phase={} from={} to={}", phase_id, from, to);
        move_element(&mut phase.sections, from, to)
    }

    // ============================================================
    // Item operations
    // ============================================================

    /// Append a new, not yet ordered item to the section.
    pub fn add_item(
        &mut self,
        section_id: &EntityId,
        name: &str,
        link: &str,
        note: &str,
    ) -> DomainResult<&Item> {
        let id = self.ids.next_id();
        let section = self.section_mut(section_id)?;
        debug!("add_item: section={} id={}", section_id, id);
        section.items.push(Item {
            id,
            name: name.trim().to_string(),
            link: link.trim().to_string(),
            note: note.trim().to_string(),
            ordered: false,
        });
        let idx = section.items.len() - 1;
        Ok(&section.items[idx])
    }

    /// Overwrite name, link and note.
    pub fn edit_item(
        &mut self,
        item_id: &EntityId,
        name: &str,
        link: &str,
        note: &str,
    ) -> DomainResult<()> {
        let item = self.item_mut(item_id)?;
        item.name = name.trim().to_string();
        item.link = link.trim().to_string();
        item.note = note.trim().to_string();
        debug!("edit_item: id={}", item_id);
        Ok(())
    }

    /// Flip `ordered`; returns the new value.
    pub fn toggle_ordered(&mut self, item_id: &EntityId) -> DomainResult<bool> {
        let item = self.item_mut(item_id)?;
        item.ordered = !item.ordered;
        debug!("toggle_ordered: id={} ordered={}", item_id, item.ordered);
        Ok(item.ordered)
    }

    pub fn delete_item(&mut self, section_id: &EntityId, item_id: &EntityId) -> DomainResult<Item> {
        let section = self.section_mut(section_id)?;
        let pos = section
            .items
            .iter()
            .position(|i| &i.id == item_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Item, item_id))?;
        debug!("delete_item: section={} id={}", section_id, item_id);
        Ok(section.items.remove(pos))
    }

    pub fn reorder_items(
        &mut self,
        section_id: &EntityId,
        from: usize,
        to: usize,
    ) -> DomainResult<()> {
        let section = self.section_mut(section_id)?;
        debug!("reorder_items: section={} from={} to={}", section_id, from, to);
        move_element(&mut section.items, from, to)
    }
}
