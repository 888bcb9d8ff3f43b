// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene arena: skeleton, children lists, enable counting, updates, and damage.

use alloc::{boxed::Box, vec::Vec};
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};
use trellis_region::{Geometry, Point, Region};

use crate::error::Error;
use crate::types::{
    FloatingKind, Layer, NodeFlags, NodeId, NodeKind, ObserverId, OutputId, OutputNodes,
    UpdateFlags,
};

type RootObserver = Box<dyn FnMut(UpdateFlags)>;

/// The compositor scene graph.
///
/// The scene owns a fixed skeleton: a root whose children are the
/// [`Layer`]s, bottom first, and per-output nodes inside every layer. Those
/// are *structure* nodes. Everything else is *floating*: created by the
/// embedder, placed into containers, and reordered at will.
///
/// Children lists are ordered bottom to top, so the last child is drawn
/// above the others and is hit first.
///
/// Every change is reported with [`Scene::update`], which bubbles to the
/// root and notifies the root observers once. Changes that affect what is
/// visible also accumulate damage in global coordinates, drained with
/// [`Scene::take_damage`].
///
/// ## Example
///
/// ```rust
/// use trellis_region::Geometry;
/// use trellis_scene::{FloatingKind, Layer, Scene};
///
/// let mut scene = Scene::new();
/// let view = scene.create_node(FloatingKind::Content {
///     bounds: Geometry::new(10, 10, 100, 100),
///     accepts_input: true,
/// });
/// scene.add_front(scene.layer(Layer::Workspace), view).unwrap();
///
/// let hit = scene.find_node_at(kurbo::Point::new(50.0, 50.0)).unwrap();
/// assert_eq!(hit.node, view);
/// assert_eq!(scene.take_damage().extents(), Geometry::new(10, 10, 100, 100));
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    layers: [NodeId; Layer::COUNT],
    pub(crate) outputs: HashMap<OutputId, [OutputNodes; Layer::COUNT]>,
    observers: Vec<(ObserverId, RootObserver)>,
    next_observer: u64,
    damage: Region,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &alive)
            .field("outputs", &self.outputs.len())
            .field("observers", &self.observers.len())
            .field("damage", &self.damage)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) is_structure: bool,
    pub(crate) enabled_counter: i32,
    pub(crate) kind: NodeKind,
}

impl Scene {
    /// Create a scene with the root and all layers, and no outputs.
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            layers: [NodeId::new(0, 0); Layer::COUNT],
            outputs: HashMap::new(),
            observers: Vec::new(),
            next_observer: 0,
            damage: Region::new(),
        };
        scene.root = scene.alloc(NodeKind::Root, true, 1);
        let layers = Layer::ALL.map(|layer| scene.alloc(NodeKind::Layer(layer), true, 1));
        scene.layers = layers;
        scene.link_children(scene.root, layers.to_vec());
        scene
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind, is_structure: bool, enabled_counter: i32) -> NodeId {
        let node = |generation| Node {
            generation,
            parent: None,
            children: Vec::new(),
            is_structure,
            enabled_counter,
            kind,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create a detached, enabled floating node.
    pub fn create_node(&mut self, kind: FloatingKind) -> NodeId {
        self.alloc(kind.into(), false, 1)
    }

    /// Create a detached floating node that starts out disabled.
    ///
    /// It becomes enabled once enable requests outnumber disable requests.
    pub fn create_disabled_node(&mut self, kind: FloatingKind) -> NodeId {
        self.alloc(kind.into(), false, 0)
    }

    /// Destroy a detached floating node and its subtree.
    pub fn destroy_node(&mut self, id: NodeId) -> Result<(), Error> {
        let node = self.node(id)?;
        if node.is_structure {
            return Err(Error::NotFloating);
        }
        if node.parent.is_some() {
            return Err(Error::AlreadyParented);
        }
        self.free_subtree(id);
        Ok(())
    }

    pub(crate) fn free_subtree(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        let Some(node) = self.nodes.get_mut(id.idx()).and_then(Option::take) else {
            return;
        };
        self.free_list.push(id.idx());
        for child in node.children {
            self.free_subtree(child);
        }
    }

    // --- queries ---

    /// The scene root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The container node of a layer.
    pub fn layer(&self, layer: Layer) -> NodeId {
        self.layers[layer.index()]
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// What the node is, if live.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node_opt(id).map(|n| &n.kind)
    }

    /// Returns the parent of a node if live, or `None` for the root, detached nodes, or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Get the children of a node, bottom first, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Whether the node is live and enabled.
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.enabled_counter > 0)
    }

    /// State bits of a node, if live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        let node = self.node_opt(id)?;
        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::DISABLED, node.enabled_counter <= 0);
        flags.set(NodeFlags::STRUCTURE, node.is_structure);
        Some(flags)
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent_of(node);
        }
        false
    }

    // --- children lists ---

    /// Replace the children of `parent`.
    ///
    /// The structure nodes among the children must stay exactly the same, in
    /// the same relative order; only floating nodes may be added, removed, or
    /// moved. New children must be detached or already children of `parent`.
    /// Removed children become detached but stay alive.
    ///
    /// The old and new extents of `parent` are damaged. Callers report the
    /// change with [`Scene::update`].
    pub fn set_children_list(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), Error> {
        let node = self.node(parent)?;
        if !node.kind.is_container() {
            return Err(Error::NotFloating);
        }
        for (i, &child) in children.iter().enumerate() {
            let c = self.node(child)?;
            if children[..i].contains(&child) {
                return Err(Error::DuplicateChild);
            }
            if c.parent.is_some_and(|p| p != parent) {
                warn!(?parent, ?child, "Rejected child that already has a parent.");
                return Err(Error::AlreadyParented);
            }
            if child == parent || self.is_ancestor(child, parent) {
                return Err(Error::Cycle);
            }
        }

        let old_structure: SmallVec<[NodeId; 8]> = node
            .children
            .iter()
            .copied()
            .filter(|&c| self.node_opt(c).is_some_and(|n| n.is_structure))
            .collect();
        let new_structure: SmallVec<[NodeId; 8]> = children
            .iter()
            .copied()
            .filter(|&c| self.node_opt(c).is_some_and(|n| n.is_structure))
            .collect();
        if old_structure != new_structure {
            warn!(?parent, "Rejected children list that moves structure nodes.");
            return Err(Error::StructureMismatch);
        }

        self.set_children_unchecked(parent, children.to_vec());
        Ok(())
    }

    /// Replace the children of `parent` without checking the structure nodes.
    pub(crate) fn set_children_unchecked(&mut self, parent: NodeId, children: Vec<NodeId>) {
        let mut damage = Region::from(self.bounding_box(parent).unwrap_or(Geometry::ZERO));
        let count = children.len();
        self.link_children(parent, children);
        damage |= self.bounding_box(parent).unwrap_or(Geometry::ZERO);
        self.damage_node(parent, &damage);
        debug!(?parent, count, "Replaced children list.");
    }

    fn link_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        let old = match self.node_opt_mut(parent) {
            Some(node) => core::mem::take(&mut node.children),
            None => return,
        };
        for child in old {
            if let Some(c) = self.node_opt_mut(child) {
                c.parent = None;
            }
        }
        for &child in &children {
            if let Some(c) = self.node_opt_mut(child) {
                c.parent = Some(parent);
            }
        }
        if let Some(node) = self.node_opt_mut(parent) {
            node.children = children;
        }
    }

    // --- enable state ---

    /// Record one enable (`true`) or disable (`false`) request.
    ///
    /// A node is enabled while enable requests outnumber disable requests,
    /// counting from its initial state. When the effective state flips, the
    /// node's extent is damaged and an [`UpdateFlags::ENABLED`] update is sent.
    pub fn set_node_enabled(&mut self, id: NodeId, enabled: bool) -> Result<(), Error> {
        let was_enabled = self.is_enabled(id);
        let node = self.node_opt_mut(id).ok_or(Error::StaleNode)?;
        node.enabled_counter = if enabled {
            node.enabled_counter.saturating_add(1)
        } else {
            node.enabled_counter.saturating_sub(1)
        };
        if was_enabled != self.is_enabled(id) {
            let bbox = self.bounding_box(id).unwrap_or(Geometry::ZERO);
            self.damage_node(id, &Region::from(bbox));
            self.update(id, UpdateFlags::ENABLED);
        }
        Ok(())
    }

    // --- updates ---

    /// Report a change to `id`.
    ///
    /// The flags are normalized (structural, enable, and geometry changes
    /// imply [`UpdateFlags::INPUT_STATE`]) and carried up to the root, where
    /// every root observer is called once. Updates from nodes that are not
    /// attached to the root are dropped.
    pub fn update(&mut self, id: NodeId, flags: UpdateFlags) {
        let flags = flags.normalized();
        let mut current = id;
        while current != self.root {
            let Some(parent) = self.parent_of(current) else {
                trace!(?id, ?flags, "Dropped update from a detached node.");
                return;
            };
            current = parent;
        }
        for (_, observer) in &mut self.observers {
            observer(flags);
        }
    }

    /// Call `observer` with the flags of every update that reaches the root.
    pub fn connect_root_update(&mut self, observer: impl FnMut(UpdateFlags) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Stop notifying an observer. Returns `false` if it was not connected.
    pub fn disconnect_root_update(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    // --- damage ---

    /// Damage `region`, given in the coordinates of `id`'s parent.
    ///
    /// The region is converted to global coordinates and accumulated. Damage
    /// from nodes that are not attached to the root is dropped.
    pub fn damage_node(&mut self, id: NodeId, region: &Region) {
        if region.is_empty() {
            return;
        }
        let mut offset = Point::ZERO;
        let mut current = id;
        while current != self.root {
            let Some(parent) = self.parent_of(current) else {
                trace!(?id, "Dropped damage from a detached node.");
                return;
            };
            if let Some(kind) = self.kind(parent) {
                offset += kind.child_offset();
            }
            current = parent;
        }
        self.damage |= &(region + offset);
    }

    /// Damage accumulated since the last [`Scene::take_damage`], in global coordinates.
    pub fn pending_damage(&self) -> &Region {
        &self.damage
    }

    /// Drain the accumulated damage.
    pub fn take_damage(&mut self) -> Region {
        core::mem::take(&mut self.damage)
    }

    // --- node properties ---

    /// Move or resize a content node.
    pub fn set_content_bounds(&mut self, id: NodeId, bounds: Geometry) -> Result<(), Error> {
        let before = self.bounding_box(id).unwrap_or(Geometry::ZERO);
        match self.node_opt_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Content { bounds: current, .. }) => *current = bounds,
            Some(_) => return Err(Error::WrongKind),
            None => return Err(Error::StaleNode),
        }
        self.damage_node(id, &(Region::from(before) | bounds));
        self.update(id, UpdateFlags::GEOMETRY);
        Ok(())
    }

    /// Change the offset of a translation node.
    pub fn set_translation(&mut self, id: NodeId, offset: Point) -> Result<(), Error> {
        let before = self.bounding_box(id).unwrap_or(Geometry::ZERO);
        match self.node_opt_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Translation { offset: current }) => *current = offset,
            Some(_) => return Err(Error::WrongKind),
            None => return Err(Error::StaleNode),
        }
        let after = self.bounding_box(id).unwrap_or(Geometry::ZERO);
        self.damage_node(id, &(Region::from(before) | after));
        self.update(id, UpdateFlags::GEOMETRY);
        Ok(())
    }

    // --- internals ---

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, Error> {
        self.node_opt(id).ok_or(Error::StaleNode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    fn content(scene: &mut Scene, bounds: Geometry) -> NodeId {
        scene.create_node(FloatingKind::Content {
            bounds,
            accepts_input: true,
        })
    }

    fn record_updates(scene: &mut Scene) -> Rc<RefCell<Vec<UpdateFlags>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        scene.connect_root_update(move |flags| sink.borrow_mut().push(flags));
        seen
    }

    #[test]
    fn skeleton_has_every_layer_bottom_first() {
        let scene = Scene::new();
        let layers: Vec<_> = Layer::ALL.iter().map(|&l| scene.layer(l)).collect();
        assert_eq!(scene.children_of(scene.root()), layers.as_slice());
        for &layer in &layers {
            assert_eq!(scene.parent_of(layer), Some(scene.root()));
            assert!(scene.flags(layer).unwrap().contains(NodeFlags::STRUCTURE));
            assert!(scene.is_enabled(layer));
        }
        assert_eq!(scene.parent_of(scene.root()), None);
    }

    #[test]
    fn reordering_structure_nodes_is_rejected() {
        let mut scene = Scene::new();
        let root = scene.root();
        let floating = content(&mut scene, Geometry::new(0, 0, 5, 5));
        scene.add_front(root, floating).unwrap();
        let before = scene.children_of(root).to_vec();

        let mut swapped = before.clone();
        swapped.swap(0, 1);
        assert_eq!(
            scene.set_children_list(root, &swapped),
            Err(Error::StructureMismatch)
        );
        assert_eq!(scene.children_of(root), before.as_slice());

        let dropped: Vec<_> = before[1..].to_vec();
        assert_eq!(
            scene.set_children_list(root, &dropped),
            Err(Error::StructureMismatch)
        );
        assert_eq!(scene.children_of(root), before.as_slice());
        assert_eq!(scene.parent_of(before[0]), Some(root));

        let mut moved_floating = before.clone();
        let last = moved_floating.pop().unwrap();
        moved_floating.insert(2, last);
        scene.set_children_list(root, &moved_floating).unwrap();
        assert_eq!(scene.children_of(root)[2], floating);
    }

    #[test]
    fn children_list_validation() {
        let mut scene = Scene::new();
        let workspace = scene.layer(Layer::Workspace);
        let top = scene.layer(Layer::Top);
        let a = content(&mut scene, Geometry::new(0, 0, 5, 5));
        let group = scene.create_node(FloatingKind::Inner);
        scene.add_front(workspace, a).unwrap();
        scene.add_front(workspace, group).unwrap();

        assert_eq!(scene.set_children_list(top, &[a]), Err(Error::AlreadyParented));
        let b = content(&mut scene, Geometry::new(0, 0, 5, 5));
        assert_eq!(scene.set_children_list(top, &[b, b]), Err(Error::DuplicateChild));
        assert_eq!(scene.set_children_list(a, &[b]), Err(Error::NotFloating));

        let inner = scene.create_node(FloatingKind::Inner);
        scene.set_children_list(inner, &[b]).unwrap();
        assert_eq!(scene.set_children_list(inner, &[inner]), Err(Error::Cycle));
        assert_eq!(scene.parent_of(b), Some(inner));

        scene.destroy_node(inner).unwrap();
        assert!(!scene.is_alive(b));
        assert_eq!(scene.set_children_list(top, &[b]), Err(Error::StaleNode));
        assert_eq!(scene.destroy_node(top), Err(Error::NotFloating));
        assert_eq!(scene.destroy_node(a), Err(Error::AlreadyParented));
    }

    #[test]
    fn replaced_children_are_detached_but_alive() {
        let mut scene = Scene::new();
        let group = scene.create_node(FloatingKind::Inner);
        let a = content(&mut scene, Geometry::new(0, 0, 5, 5));
        let b = content(&mut scene, Geometry::new(0, 0, 5, 5));
        scene.set_children_list(group, &[a, b]).unwrap();
        scene.set_children_list(group, &[b]).unwrap();
        assert!(scene.is_alive(a));
        assert_eq!(scene.parent_of(a), None);
        assert_eq!(scene.parent_of(b), Some(group));
    }

    #[test]
    fn enable_requests_are_counted() {
        let mut scene = Scene::new();
        let node = scene.create_disabled_node(FloatingKind::Inner);
        assert!(!scene.is_enabled(node));
        for _ in 0..3 {
            scene.set_node_enabled(node, true).unwrap();
        }
        for _ in 0..2 {
            scene.set_node_enabled(node, false).unwrap();
        }
        assert!(scene.is_enabled(node), "three enables outweigh two disables");
        scene.set_node_enabled(node, false).unwrap();
        assert!(!scene.is_enabled(node));
        assert_eq!(scene.flags(node), Some(NodeFlags::DISABLED));

        let fresh = scene.create_node(FloatingKind::Inner);
        scene.set_node_enabled(fresh, false).unwrap();
        assert!(!scene.is_enabled(fresh));
        scene.set_node_enabled(fresh, true).unwrap();
        assert!(scene.is_enabled(fresh));
    }

    #[test]
    fn enable_counter_saturates() {
        let mut scene = Scene::new();
        let node = scene.create_node(FloatingKind::Inner);
        scene.node_opt_mut(node).unwrap().enabled_counter = i32::MAX;
        scene.set_node_enabled(node, true).unwrap();
        assert_eq!(scene.node_opt(node).unwrap().enabled_counter, i32::MAX);
        scene.set_node_enabled(node, false).unwrap();
        assert!(scene.is_enabled(node));

        scene.node_opt_mut(node).unwrap().enabled_counter = i32::MIN;
        scene.set_node_enabled(node, false).unwrap();
        assert_eq!(scene.node_opt(node).unwrap().enabled_counter, i32::MIN);
        assert!(!scene.is_enabled(node));
    }

    #[test]
    fn deep_updates_reach_the_root_once() {
        let mut scene = Scene::new();
        let mut parent = scene.layer(Layer::Workspace);
        for _ in 0..3 {
            let inner = scene.create_node(FloatingKind::Inner);
            scene.add_front(parent, inner).unwrap();
            parent = inner;
        }
        let leaf = content(&mut scene, Geometry::new(0, 0, 10, 10));
        scene.add_front(parent, leaf).unwrap();

        let seen = record_updates(&mut scene);
        scene.update(leaf, UpdateFlags::CHILDREN_LIST);
        assert_eq!(
            seen.borrow().as_slice(),
            &[UpdateFlags::CHILDREN_LIST | UpdateFlags::INPUT_STATE]
        );

        seen.borrow_mut().clear();
        scene.set_node_enabled(leaf, false).unwrap();
        assert_eq!(
            seen.borrow().as_slice(),
            &[UpdateFlags::ENABLED | UpdateFlags::INPUT_STATE]
        );

        seen.borrow_mut().clear();
        scene.update(leaf, UpdateFlags::empty());
        assert_eq!(seen.borrow().as_slice(), &[UpdateFlags::empty()]);
    }

    #[test]
    fn detached_updates_are_dropped() {
        let mut scene = Scene::new();
        let seen = record_updates(&mut scene);
        let lonely = scene.create_node(FloatingKind::Inner);
        scene.update(lonely, UpdateFlags::GEOMETRY);
        scene.set_node_enabled(lonely, false).unwrap();
        assert!(seen.borrow().is_empty());
        assert!(scene.pending_damage().is_empty());
    }

    #[test]
    fn observers_can_disconnect() {
        let mut scene = Scene::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = scene.connect_root_update(move |_| *sink.borrow_mut() += 1);
        let root = scene.root();
        scene.update(root, UpdateFlags::GEOMETRY);
        assert!(scene.disconnect_root_update(id));
        assert!(!scene.disconnect_root_update(id));
        scene.update(root, UpdateFlags::GEOMETRY);
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn damage_is_reported_in_global_coordinates() {
        let mut scene = Scene::new();
        let shift = scene.create_node(FloatingKind::Translation {
            offset: Point::new(100, 50),
        });
        let leaf = content(&mut scene, Geometry::new(0, 0, 10, 10));
        scene.set_children_list(shift, &[leaf]).unwrap();
        scene.add_front(scene.layer(Layer::Top), shift).unwrap();
        assert_eq!(
            scene.take_damage().extents(),
            Geometry::new(100, 50, 10, 10)
        );

        scene.set_node_enabled(leaf, false).unwrap();
        assert_eq!(
            scene.take_damage().extents(),
            Geometry::new(100, 50, 10, 10)
        );
        assert!(scene.pending_damage().is_empty());

        scene.set_node_enabled(leaf, true).unwrap();
        scene.take_damage();
        scene.set_content_bounds(leaf, Geometry::new(20, 0, 10, 10)).unwrap();
        let damage = scene.take_damage();
        assert_eq!(damage.area(), 200);
        assert_eq!(damage.extents(), Geometry::new(100, 50, 30, 10));

        scene.set_translation(shift, Point::new(0, 0)).unwrap();
        assert_eq!(
            scene.take_damage(),
            Region::from(Geometry::new(20, 0, 10, 10)) | Geometry::new(120, 50, 10, 10)
        );
        assert_eq!(
            scene.set_translation(leaf, Point::ZERO),
            Err(Error::WrongKind)
        );
    }

    #[test]
    fn update_flags_normalize() {
        assert_eq!(
            UpdateFlags::GEOMETRY.normalized(),
            UpdateFlags::GEOMETRY | UpdateFlags::INPUT_STATE
        );
        assert_eq!(UpdateFlags::INPUT_STATE.normalized(), UpdateFlags::INPUT_STATE);
        assert_eq!(UpdateFlags::empty().normalized(), UpdateFlags::empty());
    }
}
