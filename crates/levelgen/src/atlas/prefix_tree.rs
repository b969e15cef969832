//! Deduplicates recorded footprint sequences by sharing common prefixes.

use std::collections::BTreeMap;

use super::bounding_box::BoundingBox;
use super::{Movement, MovementId};

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<BoundingBox, usize>,
}

/// Node 0 is the root and stands for the origin footprint; it carries no box.
#[derive(Debug)]
pub(super) struct PrefixTree {
    nodes: Vec<Node>,
}

impl Default for PrefixTree {
    fn default() -> Self {
        Self { nodes: vec![Node::default()] }
    }
}

impl PrefixTree {
    pub(super) fn insert(&mut self, path: &[BoundingBox]) {
        let mut cursor = 0;
        for &bbox in path {
            cursor = match self.nodes[cursor].children.get(&bbox) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[cursor].children.insert(bbox, child);
                    child
                }
            };
        }
    }

    /// Inserts `path` together with its left/right reflection.
    pub(super) fn insert_mirrored(&mut self, path: &[BoundingBox]) {
        self.insert(path);
        let mirrored: Vec<BoundingBox> = path.iter().map(|bbox| bbox.mirrored()).collect();
        self.insert(&mirrored);
    }

    /// Number of distinct movements, i.e. every node except the root.
    pub(super) fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Lists every node as its own movement, depth first, parents before children.
    pub(super) fn flatten(&self) -> Vec<Movement> {
        let mut movements = Vec::with_capacity(self.len());
        self.flatten_into(0, None, &[], &mut movements);
        movements
    }

    fn flatten_into(
        &self,
        node: usize,
        parent: Option<MovementId>,
        prefix: &[BoundingBox],
        movements: &mut Vec<Movement>,
    ) {
        for (&bbox, &child) in &self.nodes[node].children {
            let mut boxes = prefix.to_vec();
            boxes.push(bbox);
            let id = MovementId(movements.len());
            movements.push(Movement { boxes: boxes.clone(), parent });
            self.flatten_into(child, Some(id), &boxes, movements);
        }
    }
}
