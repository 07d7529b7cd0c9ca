//! Terminal rendering of the wishlist tree
//!
//! Full re-render on every change, no diffing.

use colored::{Color, Colorize};
use termtree::Tree;

use crate::application::services::{Change, ChangeObserver};
use crate::cli::output;
use crate::domain::{Hierarchy, Item, Phase, Section, Theme};

const EXPANDED: &str = "▼";
const COLLAPSED: &str = "▶";

fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    }
}

fn marker(collapsed: bool) -> &'static str {
    if collapsed {
        COLLAPSED
    } else {
        EXPANDED
    }
}

fn item_label(index: usize, item: &Item) -> String {
    let check = if item.ordered { "[x]" } else { "[ ]" };
    let name = if item.ordered {
        item.name.strikethrough().dimmed().to_string()
    } else {
        item.name.bold().to_string()
    };
    let mut label = format!("{check} [{index}] {name}");
    if !item.link.is_empty() {
        label.push_str(&format!(" <{}>", item.link.underline()));
    }
    if !item.note.is_empty() {
        label.push_str(&format!(" - {}", item.note.italic()));
    }
    label.push_str(&format!(" {}", item.id.as_str().dimmed()));
    label
}

fn section_tree(index: usize, section: &Section, theme: Theme) -> Tree<String> {
    let label = format!(
        "{} [{}] {} {}",
        marker(section.collapsed),
        index,
        section.title.color(accent(theme)),
        section.id.as_str().dimmed()
    );
    let tree = Tree::new(label);
    if section.collapsed {
        return tree;
    }
    tree.with_leaves(
        section
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| item_label(i, item)),
    )
}

fn phase_tree(index: usize, phase: &Phase, theme: Theme) -> Tree<String> {
    let label = format!(
        "{} [{}] {} {}",
        marker(phase.collapsed),
        index,
        phase.title.color(accent(theme)).bold(),
        phase.id.as_str().dimmed()
    );
    let tree = Tree::new(label);
    if phase.collapsed {
        return tree;
    }
    tree.with_leaves(
        phase
            .sections
            .iter()
            .enumerate()
            .map(|(i, s)| section_tree(i, s, theme)),
    )
}

/// Build the display tree; collapsed nodes hide their children.
pub fn render_tree(hierarchy: &Hierarchy, theme: Theme) -> Tree<String> {
    let root = format!(
        "Wishlist ({} ordered / {} items, theme: {})",
        hierarchy.ordered_count(),
        hierarchy.item_count(),
        theme
    );
    Tree::new(root.bold().to_string()).with_leaves(
        hierarchy
            .phases
            .iter()
            .enumerate()
            .map(|(i, p)| phase_tree(i, p, theme)),
    )
}

pub fn render(hierarchy: &Hierarchy, theme: Theme) -> String {
    render_tree(hierarchy, theme).to_string()
}

/// One-line summary of a change.
pub fn describe(change: &Change) -> String {
    match change {
        Change::PhaseAdded { phase_id } => format!("Added phase {phase_id}"),
        Change::PhaseRenamed { phase_id } => format!("Renamed phase {phase_id}"),
        Change::PhaseDeleted { phase_id } => format!("Deleted phase {phase_id}"),
        Change::PhaseCollapseToggled {
            phase_id,
            collapsed,
        } => format!("{} phase {phase_id}", collapse_verb(*collapsed)),
        Change::PhasesReordered { from, to } => format!("Moved phase {from} -> {to}"),
        Change::SectionAdded { section_id, .. } => format!("Added section {section_id}"),
        Change::SectionRenamed { section_id } => format!("Renamed section {section_id}"),
        Change::SectionDeleted { section_id, .. } => format!("Deleted section {section_id}"),
        Change::SectionCollapseToggled {
            section_id,
            collapsed,
        } => format!("{} section {section_id}", collapse_verb(*collapsed)),
        Change::SectionsReordered { from, to, .. } => format!("Moved section {from} -> {to}"),
        Change::ItemAdded { item_id, .. } => format!("Added item {item_id}"),
        Change::ItemEdited { item_id } => format!("Edited item {item_id}"),
        Change::ItemOrderedToggled { item_id, ordered } => {
            let state = if *ordered { "ordered" } else { "not ordered" };
            format!("Marked item {item_id} {state}")
        }
        Change::ItemDeleted { item_id, .. } => format!("Deleted item {item_id}"),
        Change::ItemsReordered { from, to, .. } => format!("Moved item {from} -> {to}"),
        Change::ThemeToggled { theme } => format!("Theme set to {theme}"),
    }
}

fn collapse_verb(collapsed: bool) -> &'static str {
    if collapsed {
        "Collapsed"
    } else {
        "Expanded"
    }
}

/// Re-renders the whole tree to stdout after each change.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl ChangeObserver for TerminalRenderer {
    fn on_change(&self, change: &Change, hierarchy: &Hierarchy, theme: Theme) {
        output::success(&describe(change));
        output::info(&render(hierarchy, theme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;

    fn sample(collapsed: bool) -> Hierarchy {
        Hierarchy::new(vec![Phase {
            id: EntityId::from("p1"),
            title: "Shopping".into(),
            collapsed,
            sections: vec![Section {
                id: EntityId::from("s1"),
                title: "Tech".into(),
                collapsed: false,
                items: vec![Item {
                    id: EntityId::from("i1"),
                    name: "Headphones".into(),
                    link: String::new(),
                    note: "wireless".into(),
                    ordered: true,
                }],
            }],
        }])
    }

    #[test]
    fn given_expanded_phase_when_rendering_then_shows_all_levels() {
        colored::control::set_override(false);

        let out = render(&sample(false), Theme::Light);

        assert!(out.contains("▼ [0] Shopping p1"));
        assert!(out.contains("▼ [0] Tech s1"));
        assert!(out.contains("[x] [0] Headphones - wireless i1"));
        assert!(out.contains("1 ordered / 1 items, theme: light"));
    }

    #[test]
    fn given_collapsed_phase_when_rendering_then_children_hidden() {
        colored::control::set_override(false);

        let out = render(&sample(true), Theme::Dark);

        assert!(out.contains("▶ [0] Shopping"));
        assert!(!out.contains("Tech"));
        assert!(!out.contains("Headphones"));
    }

    #[test]
    fn given_reorder_change_when_describing_then_mentions_indices() {
        let text = describe(&Change::ItemsReordered {
            section_id: "s1".into(),
            from: 2,
            to: 0,
        });
        assert_eq!(text, "Moved item 2 -> 0");
    }
}
