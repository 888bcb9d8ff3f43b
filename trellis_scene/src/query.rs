// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry queries: bounding boxes, coordinate mapping, hit testing, and render lists.

use alloc::vec::Vec;

use trellis_region::{Geometry, Point};

use crate::scene::Scene;
use crate::types::{InputNode, NodeId, NodeKind, OutputId, RenderInstance};

impl Scene {
    /// Extent of a node in its parent's coordinates.
    ///
    /// Content nodes report their bounds. Containers report the union of their
    /// enabled children, shifted by their own offset. Empty containers report
    /// an empty box.
    pub fn bounding_box(&self, id: NodeId) -> Option<Geometry> {
        let node = self.node_opt(id)?;
        if let NodeKind::Content { bounds, .. } = &node.kind {
            return Some(*bounds);
        }
        let mut bbox = Geometry::ZERO;
        for &child in &node.children {
            if !self.is_enabled(child) {
                continue;
            }
            if let Some(child_box) = self.bounding_box(child) {
                bbox = bbox.union(&child_box);
            }
        }
        if bbox.is_empty() {
            return Some(Geometry::ZERO);
        }
        Some(bbox + node.kind.child_offset())
    }

    /// Map a point from `id`'s own coordinates into the coordinates of its children.
    pub fn to_local(&self, id: NodeId, point: kurbo::Point) -> Option<kurbo::Point> {
        let offset = self.kind(id)?.child_offset();
        Some(point - offset.to_vec2())
    }

    /// Map a point from the coordinates of `id`'s children into its own.
    pub fn to_global(&self, id: NodeId, point: kurbo::Point) -> Option<kurbo::Point> {
        let offset = self.kind(id)?.child_offset();
        Some(point + offset.to_vec2())
    }

    /// Offset from `id`'s coordinates (its parent's child space) to the
    /// coordinates of the topmost ancestor.
    pub fn global_offset(&self, id: NodeId) -> Option<Point> {
        self.node_opt(id)?;
        let mut offset = Point::ZERO;
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if let Some(kind) = self.kind(parent) {
                offset += kind.child_offset();
            }
            current = self.parent_of(parent);
        }
        Some(offset)
    }

    /// Find the topmost enabled content node accepting input at a global point.
    pub fn find_node_at(&self, point: kurbo::Point) -> Option<InputNode> {
        self.find_node_at_in(self.root(), point)
    }

    /// Like [`Scene::find_node_at`], searching only below `id`.
    ///
    /// `point` is in `id`'s parent coordinates. Output nodes with a limit
    /// region only take points inside it.
    pub fn find_node_at_in(&self, id: NodeId, point: kurbo::Point) -> Option<InputNode> {
        let node = self.node_opt(id)?;
        match &node.kind {
            NodeKind::Content {
                bounds,
                accepts_input,
            } => (*accepts_input && bounds.contains_pointf(point)).then_some(InputNode {
                node: id,
                local: point,
            }),
            kind => {
                if let NodeKind::Output {
                    limit_region: Some(limit),
                    ..
                } = kind
                    && !limit.contains_pointf(point)
                {
                    return None;
                }
                let local = point - kind.child_offset().to_vec2();
                node.children
                    .iter()
                    .rev()
                    .filter(|&&child| self.is_enabled(child))
                    .find_map(|&child| self.find_node_at_in(child, local))
            }
        }
    }

    /// List `id` and its enabled descendants in drawing order, topmost first.
    ///
    /// Each instance carries the offset that maps the node's coordinates to
    /// global ones. With `shown_on` set, outputs that confine their content
    /// with a limit region are skipped unless they are that output.
    pub fn gen_render_instances(&self, id: NodeId, shown_on: Option<OutputId>) -> Vec<RenderInstance> {
        let mut out = Vec::new();
        if let Some(offset) = self.global_offset(id) {
            self.push_instances(id, offset, shown_on, &mut out);
        }
        out
    }

    fn push_instances(
        &self,
        id: NodeId,
        offset: Point,
        shown_on: Option<OutputId>,
        out: &mut Vec<RenderInstance>,
    ) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        if let NodeKind::Output {
            output,
            limit_region: Some(_),
            ..
        } = &node.kind
            && shown_on.is_some_and(|shown| shown != *output)
        {
            return;
        }
        out.push(RenderInstance { node: id, offset });
        let child_offset = offset + node.kind.child_offset();
        for &child in node.children.iter().rev() {
            if self.is_enabled(child) {
                self.push_instances(child, child_offset, shown_on, out);
            }
        }
    }
}
