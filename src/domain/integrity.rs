//! Referential checks over a configuration's components and groups
//!
//! None of these block persistence. They exist so callers can warn about
//! snapshots the diagram renderer is likely to choke on.

use crate::domain::diagram::{DiagramConfiguration, ElementId};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A single referential problem found in a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    DuplicateComponentId(ElementId),
    DuplicateGroupId(ElementId),
    /// Component references a group that does not exist
    DanglingComponentGroup {
        component: ElementId,
        group: ElementId,
    },
    /// Group lists a member component that does not exist
    DanglingMember {
        group: ElementId,
        component: ElementId,
    },
    /// Group lists a child group that does not exist
    DanglingChildGroup { group: ElementId, child: ElementId },
    /// Group names a parent that does not exist
    DanglingParent { group: ElementId, parent: ElementId },
    /// Group is reachable from itself through child links
    NestingCycle(ElementId),
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DuplicateComponentId(id) => write!(f, "duplicate component id {}", id),
            IntegrityIssue::DuplicateGroupId(id) => write!(f, "duplicate group id {}", id),
            IntegrityIssue::DanglingComponentGroup { component, group } => write!(
                f,
                "component {} references missing group {}",
                component, group
            ),
            IntegrityIssue::DanglingMember { group, component } => {
                write!(f, "group {} lists missing component {}", group, component)
            }
            IntegrityIssue::DanglingChildGroup { group, child } => {
                write!(f, "group {} lists missing child group {}", group, child)
            }
            IntegrityIssue::DanglingParent { group, parent } => {
                write!(f, "group {} names missing parent group {}", group, parent)
            }
            IntegrityIssue::NestingCycle(id) => write!(f, "group {} is nested inside itself", id),
        }
    }
}

/// Collect every referential issue in `config`, in a stable order.
pub fn check_integrity(config: &DiagramConfiguration) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    let mut component_ids = HashSet::new();
    for component in &config.components {
        if !component_ids.insert(&component.id) {
            issues.push(IntegrityIssue::DuplicateComponentId(component.id.clone()));
        }
    }

    let mut group_ids = HashSet::new();
    for group in &config.groups {
        if !group_ids.insert(&group.id) {
            issues.push(IntegrityIssue::DuplicateGroupId(group.id.clone()));
        }
    }

    for component in &config.components {
        if let Some(group) = &component.group_id {
            if !group_ids.contains(group) {
                issues.push(IntegrityIssue::DanglingComponentGroup {
                    component: component.id.clone(),
                    group: group.clone(),
                });
            }
        }
    }

    for group in &config.groups {
        for member in &group.components {
            if !component_ids.contains(member) {
                issues.push(IntegrityIssue::DanglingMember {
                    group: group.id.clone(),
                    component: member.clone(),
                });
            }
        }
        for child in group.child_groups() {
            if !group_ids.contains(child) {
                issues.push(IntegrityIssue::DanglingChildGroup {
                    group: group.id.clone(),
                    child: child.clone(),
                });
            }
        }
        if let Some(parent) = &group.parent_group_id {
            if !group_ids.contains(parent) {
                issues.push(IntegrityIssue::DanglingParent {
                    group: group.id.clone(),
                    parent: parent.clone(),
                });
            }
        }
    }

    issues.extend(find_cycles(config).into_iter().map(IntegrityIssue::NestingCycle));
    issues
}

/// Groups that sit on a nesting cycle, following both child lists and parent links.
fn find_cycles(config: &DiagramConfiguration) -> Vec<ElementId> {
    let mut edges: HashMap<&ElementId, Vec<&ElementId>> = HashMap::new();
    for group in &config.groups {
        edges
            .entry(&group.id)
            .or_default()
            .extend(group.child_groups());
        if let Some(parent) = &group.parent_group_id {
            edges.entry(parent).or_default().push(&group.id);
        }
    }

    let mut on_cycle: Vec<ElementId> = Vec::new();
    for group in &config.groups {
        if on_cycle.contains(&group.id) {
            continue;
        }
        let mut stack: Vec<&ElementId> = edges.get(&group.id).cloned().unwrap_or_default();
        let mut seen = HashSet::new();
        while let Some(next) = stack.pop() {
            if next == &group.id {
                on_cycle.push(group.id.clone());
                break;
            }
            if seen.insert(next) {
                if let Some(children) = edges.get(next) {
                    stack.extend(children.iter().copied());
                }
            }
        }
    }
    on_cycle
}
