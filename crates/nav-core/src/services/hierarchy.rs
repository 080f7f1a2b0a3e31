// ============================================================================
// Nav Core - Hierarchy Builder
// File: crates/nav-core/src/services/hierarchy.rs
// ============================================================================
//! Flat manifest -> ordered forest, built over an index arena

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{MenuId, MenuItem};

struct ArenaNode {
    item: MenuItem,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Nodes live in fetch order; relationships are index lists, so the flat
/// input is never aliased by the tree.
pub struct MenuArena {
    nodes: Vec<ArenaNode>,
    index: HashMap<MenuId, usize>,
    roots: Vec<usize>,
}

impl MenuArena {
    pub fn from_items(items: &[MenuItem]) -> Self {
        let mut nodes: Vec<ArenaNode> = Vec::with_capacity(items.len());
        let mut index = HashMap::with_capacity(items.len());

        for item in items {
            if index.contains_key(&item.id) {
                warn!("Duplicate menu id {} ignored while building hierarchy", item.id);
                continue;
            }
            index.insert(item.id.clone(), nodes.len());
            nodes.push(ArenaNode {
                item: item.detached(),
                parent: None,
                children: Vec::new(),
            });
        }

        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            let parent = nodes[i]
                .item
                .parent_id
                .as_ref()
                .and_then(|p| index.get(p))
                .copied()
                .filter(|&p| p != i);

            match parent {
                Some(p) => {
                    nodes[p].children.push(i);
                    nodes[i].parent = Some(p);
                }
                None => roots.push(i),
            }
        }

        let mut arena = Self { nodes, index, roots };
        arena.break_cycles();
        arena.sort_siblings();
        arena
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_ids(&self) -> Vec<&MenuId> {
        self.roots.iter().map(|&i| &self.nodes[i].item.id).collect()
    }

    pub fn children_of(&self, id: &MenuId) -> Option<Vec<&MenuId>> {
        let &i = self.index.get(id)?;
        Some(self.nodes[i].children.iter().map(|&c| &self.nodes[c].item.id).collect())
    }

    /// Parent links that loop never reach a root. The first such node in
    /// fetch order is cut loose and promoted, repeatedly, until every node
    /// hangs off a root.
    fn break_cycles(&mut self) {
        let mut reached = vec![false; self.nodes.len()];
        for &root in &self.roots {
            self.mark_reachable(root, &mut reached);
        }

        for i in 0..self.nodes.len() {
            if reached[i] {
                continue;
            }
            warn!(
                "Menu id {} is part of a parent cycle, promoting it to root",
                self.nodes[i].item.id
            );
            if let Some(p) = self.nodes[i].parent.take() {
                self.nodes[p].children.retain(|&c| c != i);
            }
            self.roots.push(i);
            self.mark_reachable(i, &mut reached);
        }
    }

    fn mark_reachable(&self, start: usize, reached: &mut [bool]) {
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            if reached[i] {
                continue;
            }
            reached[i] = true;
            stack.extend(self.nodes[i].children.iter().copied());
        }
    }

    /// Ascending `order`, ties by fetch position.
    fn sort_siblings(&mut self) {
        let nodes = &self.nodes;
        self.roots.sort_by_key(|&i| (nodes[i].item.order, i));

        for p in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[p].children);
            children.sort_by_key(|&c| (self.nodes[c].item.order, c));
            self.nodes[p].children = children;
        }
    }

    pub fn into_forest(self) -> Vec<MenuItem> {
        self.roots.iter().map(|&i| self.materialize(i)).collect()
    }

    fn materialize(&self, i: usize) -> MenuItem {
        let node = &self.nodes[i];
        let mut item = node.item.clone();
        item.children = node.children.iter().map(|&c| self.materialize(c)).collect();
        item
    }
}

/// Pure and deterministic. Unknown parents make an item a root.
pub fn build_hierarchy(items: &[MenuItem]) -> Vec<MenuItem> {
    MenuArena::from_items(items).into_forest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::count_nodes;

    fn ids(items: &[MenuItem]) -> Vec<MenuId> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_roots_and_children_ordered() {
        let items = vec![
            MenuItem::new(1, "A").with_order(2),
            MenuItem::new(2, "B").with_parent(1).with_order(1),
            MenuItem::new(3, "C").with_order(1),
        ];

        let tree = build_hierarchy(&items);
        assert_eq!(ids(&tree), vec![MenuId::Number(3), MenuId::Number(1)]);
        assert_eq!(ids(&tree[1].children), vec![MenuId::Number(2)]);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_orphan_becomes_root() {
        let items = vec![
            MenuItem::new(1, "Home"),
            MenuItem::new(2, "Orphan").with_parent(99),
        ];
        let tree = build_hierarchy(&items);
        assert_eq!(ids(&tree), vec![MenuId::Number(1), MenuId::Number(2)]);
    }

    #[test]
    fn test_equal_order_keeps_input_order() {
        let items = vec![
            MenuItem::new("b", "B").with_order(5),
            MenuItem::new("a", "A").with_order(5),
            MenuItem::new("c", "C").with_order(1),
            MenuItem::new("b1", "B1").with_parent("b").with_order(0),
            MenuItem::new("b2", "B2").with_parent("b").with_order(0),
        ];
        let tree = build_hierarchy(&items);
        assert_eq!(ids(&tree), vec![MenuId::from("c"), MenuId::from("b"), MenuId::from("a")]);
        assert_eq!(ids(&tree[1].children), vec![MenuId::from("b1"), MenuId::from("b2")]);
    }

    #[test]
    fn test_every_item_placed_once() {
        let items = vec![
            MenuItem::new(1, "Root"),
            MenuItem::new(2, "Child").with_parent(1),
            MenuItem::new(3, "Grandchild").with_parent(2),
            MenuItem::new(4, "Sibling").with_parent(1),
        ];
        let tree = build_hierarchy(&items);
        assert_eq!(tree.len(), 1);
        assert_eq!(count_nodes(&tree), 4);
        assert_eq!(ids(&tree[0].children[0].children), vec![MenuId::Number(3)]);
    }

    #[test]
    fn test_input_children_are_ignored() {
        let nested = MenuItem::new(1, "Root").with_children(vec![MenuItem::new(9, "Stale")]);
        let tree = build_hierarchy(&[nested]);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_cycles_terminate_without_losing_items() {
        let items = vec![
            MenuItem::new(1, "A").with_parent(2),
            MenuItem::new(2, "B").with_parent(1),
            MenuItem::new(3, "C").with_parent(3),
            MenuItem::new(4, "D").with_parent(1),
        ];
        let arena = MenuArena::from_items(&items);
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.root_ids(), vec![&MenuId::Number(1), &MenuId::Number(3)]);
        assert_eq!(
            arena.children_of(&MenuId::Number(1)),
            Some(vec![&MenuId::Number(2), &MenuId::Number(4)])
        );

        let tree = arena.into_forest();
        assert_eq!(count_nodes(&tree), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_hierarchy(&[]).is_empty());
        assert!(MenuArena::from_items(&[]).is_empty());
    }
}
