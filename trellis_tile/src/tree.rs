// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiling tree arena: structure edits, proportional layout, gaps, and flattening.

use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};
use trellis_region::{Dimensions, Geometry, Point};

use crate::error::Error;
use crate::host::ViewHost;
use crate::types::{Edges, Gaps, NodeId, NodeKind, SplitDirection, ViewId, WorkspaceInfo};

/// Arena of tiling nodes.
///
/// A tree is a set of disjoint rooted hierarchies. Each root is a split node
/// covering one workspace cell; leaves wrap exactly one window. Nodes are
/// addressed by generational [`NodeId`]s, so handles to destroyed nodes are
/// detected rather than dereferenced.
///
/// Geometry flows top-down. Setting the geometry of a split redistributes it
/// among the children in proportion to their previous extents, and setting
/// the geometry of a view leaf asks the [`ViewHost`] to resize the window.
///
/// ## Example
///
/// ```rust
/// use trellis_region::Geometry;
/// use trellis_tile::{Edges, SplitDirection, Tree, ViewHost, ViewId, WorkspaceInfo};
///
/// struct Host(Vec<(ViewId, Geometry)>);
///
/// impl ViewHost for Host {
///     fn is_mapped(&self, _: ViewId) -> bool { true }
///     fn workspace_info(&self, _: ViewId) -> Option<WorkspaceInfo> {
///         Some(WorkspaceInfo::default())
///     }
///     fn request_tiled_geometry(&mut self, view: ViewId, geometry: Geometry, _: Edges) {
///         self.0.push((view, geometry));
///     }
/// }
///
/// let mut host = Host(Vec::new());
/// let mut tree = Tree::new();
/// let root = tree.new_split(Geometry::new(0, 0, 1280, 720), SplitDirection::Vertical);
///
/// let a = tree.new_view(ViewId(1)).unwrap();
/// let b = tree.new_view(ViewId(2)).unwrap();
/// tree.add_child(root, a, None, &mut host).unwrap();
/// tree.add_child(root, b, None, &mut host).unwrap();
///
/// assert_eq!(tree.geometry(a), Some(Geometry::new(0, 0, 640, 720)));
/// assert_eq!(tree.geometry(b), Some(Geometry::new(640, 0, 640, 720)));
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    views: HashMap<ViewId, NodeId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("views", &self.views.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    geometry: Geometry,
    gaps: Gaps,
    kind: NodeKind,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            views: HashMap::new(),
        }
    }

    /// Create a detached split node.
    ///
    /// A split created here and never attached is a tree root.
    pub fn new_split(&mut self, geometry: Geometry, direction: SplitDirection) -> NodeId {
        self.alloc(NodeKind::Split(direction), geometry)
    }

    /// Create a detached leaf for `view`.
    ///
    /// A view may only be tiled once at a time.
    pub fn new_view(&mut self, view: ViewId) -> Result<NodeId, Error> {
        if self.views.contains_key(&view) {
            return Err(Error::AlreadyTiled(view));
        }
        let id = self.alloc(NodeKind::View(view), Geometry::ZERO);
        self.views.insert(view, id);
        trace!(?view, ?id, "Created view node.");
        Ok(id)
    }

    fn alloc(&mut self, kind: NodeKind, geometry: Geometry) -> NodeId {
        let node = |generation| Node {
            generation,
            parent: None,
            children: Vec::new(),
            geometry,
            gaps: Gaps::default(),
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

    /// Destroy a detached node and its whole subtree.
    ///
    /// View leaves in the subtree release their window, which can then be tiled again.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), Error> {
        if self.node(id)?.parent.is_some() {
            return Err(Error::AlreadyAttached);
        }
        self.free_subtree(id);
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        let Some(node) = self.nodes.get_mut(id.idx()).and_then(Option::take) else {
            return;
        };
        if let NodeKind::View(view) = node.kind {
            self.views.remove(&view);
        }
        self.free_list.push(id.idx());
        for child in node.children {
            self.free_subtree(child);
        }
    }

    // --- queries ---

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// What the node holds, if live.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.kind)
    }

    /// The window wrapped by a view leaf.
    pub fn view_of(&self, id: NodeId) -> Option<ViewId> {
        match self.kind(id)? {
            NodeKind::View(view) => Some(view),
            NodeKind::Split(_) => None,
        }
    }

    /// The direction of a split node.
    pub fn split_direction(&self, id: NodeId) -> Option<SplitDirection> {
        match self.kind(id)? {
            NodeKind::Split(direction) => Some(direction),
            NodeKind::View(_) => None,
        }
    }

    /// The leaf currently wrapping `view`.
    pub fn node_for_view(&self, view: ViewId) -> Option<NodeId> {
        self.views.get(&view).copied()
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Position of the node among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent_of(id)?;
        self.children_of(parent).iter().position(|&c| c == id)
    }

    /// The root of the hierarchy containing `id`.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.node_opt(id).map(|_| id)?;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        Some(current)
    }

    /// Global geometry of the node.
    pub fn geometry(&self, id: NodeId) -> Option<Geometry> {
        self.node_opt(id).map(|n| n.geometry)
    }

    /// Gaps currently applied to the node.
    pub fn gaps(&self, id: NodeId) -> Option<Gaps> {
        self.node_opt(id).map(|n| n.gaps)
    }

    /// Visit every view below `root` in depth-first order.
    pub fn for_each_view(&self, root: NodeId, f: &mut impl FnMut(NodeId, ViewId)) {
        let Some(node) = self.node_opt(root) else {
            return;
        };
        match node.kind {
            NodeKind::View(view) => f(root, view),
            NodeKind::Split(_) => {
                for &child in &node.children {
                    self.for_each_view(child, f);
                }
            }
        }
    }

    /// All views below `root`, in depth-first order.
    pub fn views_in(&self, root: NodeId) -> Vec<ViewId> {
        let mut out = Vec::new();
        self.for_each_view(root, &mut |_, view| out.push(view));
        out
    }

    // --- structure edits ---

    /// Attach the detached node `child` to the split `parent`.
    ///
    /// The new child gets an even share, `1 / (n + 1)` of the split axis, and
    /// the existing children are squeezed proportionally into the rest. `index`
    /// picks the position among the children; `None` or an out-of-range index
    /// appends.
    pub fn add_child<H: ViewHost + ?Sized>(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: Option<usize>,
        host: &mut H,
    ) -> Result<(), Error> {
        let direction = self.split_of(parent)?;
        if self.node(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached);
        }
        if self.root_of(parent) == Some(child) {
            return Err(Error::Cycle);
        }

        let (available, count) = {
            let p = self.node(parent)?;
            (p.geometry, p.children.len())
        };
        let total = axis_extent(available, direction);
        let new_size = ceil_share(total, count);
        if count > 0 {
            self.squeeze_children(parent, direction, available, total - new_size);
        }

        if let Some(c) = self.node_opt_mut(child) {
            c.geometry = axis_slice(available, direction, 0, new_size);
            c.parent = Some(parent);
        }
        if let Some(p) = self.node_opt_mut(parent) {
            let at = index.filter(|&i| i <= p.children.len());
            match at {
                Some(i) => p.children.insert(i, child),
                None => p.children.push(child),
            }
        }
        trace!(?parent, ?child, ?index, "Added child.");

        self.refresh_gaps(parent);
        self.recalculate_children(parent, available, host);
        Ok(())
    }

    /// Detach `child` from the split `parent` and give its space to the siblings.
    ///
    /// The detached node stays alive; the caller either re-attaches it or
    /// [destroys](Self::destroy) it.
    pub fn remove_child<H: ViewHost + ?Sized>(
        &mut self,
        parent: NodeId,
        child: NodeId,
        host: &mut H,
    ) -> Result<NodeId, Error> {
        self.split_of(parent)?;
        let pos = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(Error::NotAChild)?;

        let mut available = Geometry::ZERO;
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.remove(pos);
            available = p.geometry;
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = None;
        }
        trace!(?parent, ?child, "Removed child.");

        self.refresh_gaps(parent);
        self.recalculate_children(parent, available, host);
        Ok(child)
    }

    /// Give the node a new global geometry and propagate it.
    ///
    /// Splits redistribute the new geometry among their children; view leaves
    /// request the new size from their window.
    pub fn set_geometry<H: ViewHost + ?Sized>(
        &mut self,
        id: NodeId,
        geometry: Geometry,
        host: &mut H,
    ) -> Result<(), Error> {
        self.node(id)?;
        self.apply_geometry(id, geometry, host);
        Ok(())
    }

    /// Set the gaps of a subtree.
    ///
    /// Children inherit the outer gaps, except that edges shared with a
    /// sibling get half the internal gap. Geometry is not pushed again; call
    /// [`Tree::set_geometry`] on the root to apply the new gaps.
    pub fn set_gaps(&mut self, id: NodeId, gaps: Gaps) -> Result<(), Error> {
        self.node(id)?;
        self.apply_gaps(id, gaps);
        Ok(())
    }

    /// Resend the recorded geometry of a view that has just been mapped.
    pub fn view_mapped<H: ViewHost + ?Sized>(
        &mut self,
        view: ViewId,
        host: &mut H,
    ) -> Result<(), Error> {
        let id = self.node_for_view(view).ok_or(Error::NotTiled(view))?;
        self.push_view_geometry(id, host);
        Ok(())
    }

    /// Collapse interior nodes left with a single child, and prune empty splits.
    ///
    /// `node` is overwritten with the node now occupying its position, so a
    /// root handle stays usable after its only split child replaces it. A
    /// tree root keeps its split wrapper when its single child is a view, and
    /// is never pruned. Returns `false` if `node` was stale or was pruned.
    ///
    /// Children are normalized before their parent, so a second call is a no-op.
    pub fn flatten<H: ViewHost + ?Sized>(&mut self, node: &mut NodeId, host: &mut H) -> bool {
        if !self.is_alive(*node) {
            return false;
        }
        match self.flatten_node(*node, host) {
            Some(id) => {
                *node = id;
                true
            }
            None => false,
        }
    }

    fn flatten_node<H: ViewHost + ?Sized>(&mut self, id: NodeId, host: &mut H) -> Option<NodeId> {
        let node = self.node_opt(id)?;
        if matches!(node.kind, NodeKind::View(_)) {
            return Some(id);
        }
        let children: SmallVec<[NodeId; 8]> = node.children.iter().copied().collect();
        for child in children {
            self.flatten_node(child, host);
        }

        let node = self.node_opt(id)?;
        let parent = node.parent;
        let children: SmallVec<[NodeId; 8]> = node.children.iter().copied().collect();
        match children.as_slice() {
            [] => {
                let Some(parent) = parent else {
                    return Some(id);
                };
                debug!(?id, "Pruning empty split.");
                if let Err(err) = self.remove_child(parent, id, host) {
                    debug!(?id, %err, "Empty split was not a child of its parent.");
                }
                self.free_subtree(id);
                None
            }
            &[only] => {
                if parent.is_none() && matches!(self.kind(only), Some(NodeKind::View(_))) {
                    return Some(id);
                }
                self.splice(id, only, host);
                Some(only)
            }
            _ => Some(id),
        }
    }

    /// Replace `id` by its only child `child`, in place.
    fn splice<H: ViewHost + ?Sized>(&mut self, id: NodeId, child: NodeId, host: &mut H) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        node.children.clear();
        let (parent, geometry, gaps) = (node.parent, node.geometry, node.gaps);

        if let Some(p) = parent.and_then(|p| self.node_opt_mut(p))
            && let Some(slot) = p.children.iter_mut().find(|c| **c == id)
        {
            *slot = child;
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = parent;
        }
        self.free_subtree(id);
        debug!(?id, ?child, "Collapsed single-child split.");

        self.apply_gaps(child, gaps);
        self.apply_geometry(child, geometry, host);
    }

    // --- layout ---

    /// Scale the stored extents of the children into `total` without notifying views.
    fn squeeze_children(
        &mut self,
        parent: NodeId,
        direction: SplitDirection,
        available: Geometry,
        total: i32,
    ) {
        let children: SmallVec<[NodeId; 8]> = self.children_of(parent).iter().copied().collect();
        let old: SmallVec<[i32; 8]> = children
            .iter()
            .map(|&c| self.geometry(c).map_or(0, |g| axis_extent(g, direction)))
            .collect();
        let bounds = scaled_boundaries(&old, total);
        for (&child, edge) in children.iter().zip(bounds.windows(2)) {
            if let Some(c) = self.node_opt_mut(child) {
                c.geometry = axis_slice(available, direction, edge[0], edge[1] - edge[0]);
            }
        }
    }

    /// Redistribute `available` among the children of `parent`.
    ///
    /// Every boundary is derived from the children's cumulative share of the
    /// old total, so rounding never accumulates across children or across calls.
    fn recalculate_children<H: ViewHost + ?Sized>(
        &mut self,
        parent: NodeId,
        available: Geometry,
        host: &mut H,
    ) {
        let Some(node) = self.node_opt(parent) else {
            return;
        };
        let NodeKind::Split(direction) = node.kind else {
            return;
        };
        if node.children.is_empty() {
            return;
        }
        let children: SmallVec<[NodeId; 8]> = node.children.iter().copied().collect();
        let old: SmallVec<[i32; 8]> = children
            .iter()
            .map(|&c| self.geometry(c).map_or(0, |g| axis_extent(g, direction)))
            .collect();
        let bounds = scaled_boundaries(&old, axis_extent(available, direction));
        for (&child, edge) in children.iter().zip(bounds.windows(2)) {
            let geometry = axis_slice(available, direction, edge[0], edge[1] - edge[0]);
            self.apply_geometry(child, geometry, host);
        }
    }

    fn apply_geometry<H: ViewHost + ?Sized>(&mut self, id: NodeId, geometry: Geometry, host: &mut H) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        node.geometry = geometry;
        let kind = node.kind;
        match kind {
            NodeKind::Split(_) => self.recalculate_children(id, geometry, host),
            NodeKind::View(_) => self.push_view_geometry(id, host),
        }
    }

    fn push_view_geometry<H: ViewHost + ?Sized>(&self, id: NodeId, host: &mut H) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        let NodeKind::View(view) = node.kind else {
            return;
        };
        if !host.is_mapped(view) {
            trace!(?view, "View is not mapped, geometry recorded only.");
            return;
        }
        let Some(info) = host.workspace_info(view) else {
            trace!(?view, "View has no output, geometry recorded only.");
            return;
        };
        let local = local_view_geometry(node.geometry, node.gaps, info, host.is_fullscreen(view));
        host.request_tiled_geometry(view, local, Edges::all());
    }

    fn refresh_gaps(&mut self, id: NodeId) {
        if let Some(gaps) = self.gaps(id) {
            self.apply_gaps(id, gaps);
        }
    }

    fn apply_gaps(&mut self, id: NodeId, gaps: Gaps) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        node.gaps = gaps;
        let NodeKind::Split(direction) = node.kind else {
            return;
        };
        let children: SmallVec<[NodeId; 8]> = node.children.iter().copied().collect();
        let last = children.len().saturating_sub(1);
        let half = gaps.internal / 2;
        for (i, &child) in children.iter().enumerate() {
            let mut inherited = gaps;
            match direction {
                SplitDirection::Horizontal => {
                    if i != 0 {
                        inherited.top = half;
                    }
                    if i != last {
                        inherited.bottom = half;
                    }
                }
                SplitDirection::Vertical => {
                    if i != 0 {
                        inherited.left = half;
                    }
                    if i != last {
                        inherited.right = half;
                    }
                }
            }
            self.apply_gaps(child, inherited);
        }
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node(&self, id: NodeId) -> Result<&Node, Error> {
        self.node_opt(id).ok_or(Error::StaleNode)
    }

    fn split_of(&self, id: NodeId) -> Result<SplitDirection, Error> {
        match self.node(id)?.kind {
            NodeKind::Split(direction) => Ok(direction),
            NodeKind::View(_) => Err(Error::NotASplit),
        }
    }
}

/// Extent of `geometry` along the axis a split of `direction` divides.
pub(crate) fn axis_extent(geometry: Geometry, direction: SplitDirection) -> i32 {
    match direction {
        SplitDirection::Horizontal => geometry.height,
        SplitDirection::Vertical => geometry.width,
    }
}

fn axis_slice(available: Geometry, direction: SplitDirection, start: i32, len: i32) -> Geometry {
    match direction {
        SplitDirection::Horizontal => {
            Geometry::new(available.x, available.y + start, available.width, len)
        }
        SplitDirection::Vertical => {
            Geometry::new(available.x + start, available.y, len, available.height)
        }
    }
}

/// `ceil(total / (count + 1))`, the share a new child gets next to `count` siblings.
fn ceil_share(total: i32, count: usize) -> i32 {
    let total = i64::from(total.max(0));
    let parts = i64::try_from(count).unwrap_or(i64::MAX - 1) + 1;
    i32::try_from((total + parts - 1) / parts).unwrap_or(i32::MAX)
}

/// `round(num / den)` with halves rounded up, for `num >= 0` and `den > 0`.
fn div_round(num: i64, den: i64) -> i64 {
    (2 * num + den) / (2 * den)
}

/// Boundaries that split `total` in proportion to `old`.
///
/// The result has `old.len() + 1` entries, starting at 0 and ending at
/// `total`. When every old extent is zero the shares are even.
fn scaled_boundaries(old: &[i32], total: i32) -> SmallVec<[i32; 9]> {
    let total = i64::from(total.max(0));
    let sum: i64 = old.iter().map(|&e| i64::from(e.max(0))).sum();
    let count = i64::try_from(old.len()).unwrap_or(i64::MAX);

    let mut bounds = SmallVec::new();
    bounds.push(0);
    let mut up_to_now = 0_i64;
    for (i, &extent) in old.iter().enumerate() {
        up_to_now += i64::from(extent.max(0));
        let end = if sum == 0 {
            let done = i64::try_from(i + 1).unwrap_or(count);
            div_round(done * total, count)
        } else {
            div_round(up_to_now * total, sum)
        };
        bounds.push(i32::try_from(end).unwrap_or(i32::MAX));
    }
    bounds
}

/// Geometry of a view relative to the current workspace, with gaps applied.
///
/// Fullscreen views cover the whole workspace cell their tile lives in.
pub(crate) fn local_view_geometry(
    global: Geometry,
    gaps: Gaps,
    info: WorkspaceInfo,
    fullscreen: bool,
) -> Geometry {
    let screen = info.screen_size;
    let current = info.current_workspace;
    if fullscreen {
        let cell = workspace_cell(global, screen);
        return Geometry::new(
            (cell.x - current.x) * screen.width,
            (cell.y - current.y) * screen.height,
            screen.width,
            screen.height,
        );
    }
    let local = global - Point::new(current.x * screen.width, current.y * screen.height);
    Geometry::new(
        local.x + gaps.left,
        local.y + gaps.top,
        (local.width - gaps.left - gaps.right).max(0),
        (local.height - gaps.top - gaps.bottom).max(0),
    )
}

/// The workspace cell containing the center of `global`.
fn workspace_cell(global: Geometry, screen: Dimensions) -> Point {
    if screen.width <= 0 || screen.height <= 0 {
        return Point::ZERO;
    }
    let cx = global.x + global.width / 2;
    let cy = global.y + global.height / 2;
    Point::new(cx.div_euclid(screen.width), cy.div_euclid(screen.height))
}
