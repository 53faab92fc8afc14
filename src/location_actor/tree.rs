//! # Location Tree
//!
//! An id-indexed store of [`Location`] nodes whose `parent_id` links always
//! form a forest.
//!
//! The only ways to change a parent link are [`LocationTree::reparent`], which
//! walks the parent chain of the prospective parent and refuses the move if it
//! meets the node being moved, and [`LocationTree::detach`], which can never
//! close a loop. Generic updates cannot touch `parent_id` at all.
//!
//! Deleting a node does not cascade. Its children keep pointing at the removed
//! id and show up in [`LocationTree::orphans`]; cleaning them up is left to the
//! caller.

use super::error::LocationError;
use crate::model::{Location, LocationCreate, LocationId, LocationKind, LocationUpdate};
use crate::validation::{validate_location, validate_location_update};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone)]
pub struct LocationTree {
    nodes: HashMap<LocationId, Location>,
    next_id: u64,
}

impl Default for LocationTree {
    fn default() -> Self {
        Self::new()
    }
}

fn by_id(mut locations: Vec<Location>) -> Vec<Location> {
    locations.sort_by_key(|location| location.id);
    locations
}

impl LocationTree {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.nodes.get(&id)
    }

    /// All nodes, in no particular order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> + '_ {
        self.nodes.values()
    }

    fn require(&self, id: LocationId) -> Result<&Location, LocationError> {
        self.nodes.get(&id).ok_or(LocationError::NotFound(id))
    }

    /// Adds a node. A new node has no children, so no cycle check is needed;
    /// only the parent's existence is.
    pub fn create(&mut self, params: LocationCreate) -> Result<Location, LocationError> {
        validate_location(&params)?;
        if let Some(parent_id) = params.parent_id {
            self.require(parent_id)?;
        }

        let id = LocationId(self.next_id);
        self.next_id += 1;
        let location = Location {
            id,
            name: params.name,
            description: params.description,
            kind: params.kind,
            parent_id: params.parent_id,
            latitude: params.latitude,
            longitude: params.longitude,
        };
        self.nodes.insert(id, location.clone());
        Ok(location)
    }

    /// Partial update of everything except the parent link.
    pub fn update(
        &mut self,
        id: LocationId,
        update: LocationUpdate,
    ) -> Result<Location, LocationError> {
        validate_location_update(&update)?;
        let node = self.nodes.get_mut(&id).ok_or(LocationError::NotFound(id))?;

        if let Some(name) = update.name {
            node.name = name;
        }
        if let Some(description) = update.description {
            node.description = Some(description);
        }
        if let Some(kind) = update.kind {
            node.kind = kind;
        }
        if let Some(latitude) = update.latitude {
            node.latitude = Some(latitude);
        }
        if let Some(longitude) = update.longitude {
            node.longitude = Some(longitude);
        }
        Ok(node.clone())
    }

    /// Moves `id` under `new_parent_id`.
    ///
    /// Fails with `NotFound` if either node is missing and with
    /// `InvalidOperation` if the node would become its own ancestor.
    pub fn reparent(
        &mut self,
        id: LocationId,
        new_parent_id: LocationId,
    ) -> Result<Location, LocationError> {
        self.require(id)?;
        self.require(new_parent_id)?;

        if id == new_parent_id {
            return Err(LocationError::InvalidOperation(format!(
                "{id} cannot be its own parent"
            )));
        }
        if self.is_ancestor(id, new_parent_id) {
            return Err(LocationError::InvalidOperation(format!(
                "moving {id} under {new_parent_id} would create a cycle"
            )));
        }

        let node = self.nodes.get_mut(&id).ok_or(LocationError::NotFound(id))?;
        node.parent_id = Some(new_parent_id);
        Ok(node.clone())
    }

    /// Turns a node into a root.
    pub fn detach(&mut self, id: LocationId) -> Result<Location, LocationError> {
        let node = self.nodes.get_mut(&id).ok_or(LocationError::NotFound(id))?;
        node.parent_id = None;
        Ok(node.clone())
    }

    /// Removes a single node and returns it. Children are left untouched.
    pub fn delete(&mut self, id: LocationId) -> Result<Location, LocationError> {
        self.nodes.remove(&id).ok_or(LocationError::NotFound(id))
    }

    /// Walks the parents of `start`, nearest first.
    ///
    /// Stops at a root or at a parent id that no longer exists. The step limit
    /// keeps the walk finite even if the store were ever handed a loop.
    fn parent_chain(&self, start: LocationId) -> impl Iterator<Item = &Location> + '_ {
        let mut current = self.nodes.get(&start).and_then(|node| node.parent_id);
        let mut remaining = self.nodes.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let node = self.nodes.get(&current?)?;
            current = node.parent_id;
            Some(node)
        })
    }

    /// True when `ancestor` appears on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: LocationId, node: LocationId) -> bool {
        self.parent_chain(node).any(|location| location.id == ancestor)
    }

    /// Parent, grandparent, … up to the root.
    pub fn ancestors(&self, id: LocationId) -> Result<Vec<Location>, LocationError> {
        self.require(id)?;
        Ok(self.parent_chain(id).cloned().collect())
    }

    pub fn children(&self, id: LocationId) -> Result<Vec<Location>, LocationError> {
        self.require(id)?;
        Ok(by_id(
            self.nodes
                .values()
                .filter(|node| node.parent_id == Some(id))
                .cloned()
                .collect(),
        ))
    }

    /// Every node below `id`, breadth first.
    pub fn descendants(&self, id: LocationId) -> Result<Vec<Location>, LocationError> {
        self.require(id)?;

        let mut child_index: HashMap<LocationId, Vec<LocationId>> = HashMap::new();
        for node in self.nodes.values() {
            if let Some(parent_id) = node.parent_id {
                child_index.entry(parent_id).or_default().push(node.id);
            }
        }
        for children in child_index.values_mut() {
            children.sort();
        }

        let mut seen = HashSet::from([id]);
        let mut queue = VecDeque::from([id]);
        let mut found = Vec::new();
        while let Some(current) = queue.pop_front() {
            for child in child_index.get(&current).into_iter().flatten() {
                if seen.insert(*child) {
                    queue.push_back(*child);
                    if let Some(node) = self.nodes.get(child) {
                        found.push(node.clone());
                    }
                }
            }
        }
        Ok(found)
    }

    /// Nodes without a parent link.
    pub fn roots(&self) -> Vec<Location> {
        by_id(self.nodes.values().filter(|node| node.is_root()).cloned().collect())
    }

    /// Nodes whose parent was deleted out from under them.
    pub fn orphans(&self) -> Vec<Location> {
        by_id(
            self.nodes
                .values()
                .filter(|node| matches!(node.parent_id, Some(parent) if !self.contains(parent)))
                .cloned()
                .collect(),
        )
    }

    pub fn all(&self) -> Vec<Location> {
        by_id(self.nodes.values().cloned().collect())
    }

    pub fn by_kind(&self, kind: &LocationKind) -> Vec<Location> {
        by_id(
            self.nodes
                .values()
                .filter(|node| &node.kind == kind)
                .cloned()
                .collect(),
        )
    }

    /// Case-insensitive substring match on the name.
    pub fn search_by_name(&self, fragment: &str) -> Vec<Location> {
        let needle = fragment.to_lowercase();
        by_id(
            self.nodes
                .values()
                .filter(|node| node.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        )
    }

    /// Neighborhood children of any node named exactly `city_name`.
    pub fn neighborhoods_of(&self, city_name: &str) -> Vec<Location> {
        let cities: HashSet<LocationId> = self
            .nodes
            .values()
            .filter(|node| node.name == city_name)
            .map(|node| node.id)
            .collect();
        by_id(
            self.nodes
                .values()
                .filter(|node| node.kind == LocationKind::Neighborhood)
                .filter(|node| node.parent_id.is_some_and(|parent| cities.contains(&parent)))
                .cloned()
                .collect(),
        )
    }
}
