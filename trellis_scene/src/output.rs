// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-output structure nodes.
//!
//! Every output gets one node per layer. Each of those holds two structure
//! containers: `dynamic` for reorderable content and `static_node` above it.

use alloc::vec::Vec;

use tracing::debug;
use trellis_region::{Geometry, Point, Region};

use crate::error::Error;
use crate::scene::Scene;
use crate::types::{Layer, NodeId, NodeKind, OutputId, OutputNodes, UpdateFlags};

impl Scene {
    /// Create the nodes for a new output at `origin` in the global layout.
    pub fn add_output(&mut self, output: OutputId, origin: Point) -> Result<(), Error> {
        if self.outputs.contains_key(&output) {
            return Err(Error::OutputExists(output));
        }
        let nodes = Layer::ALL.map(|layer| {
            let output_node = self.alloc(
                NodeKind::Output {
                    output,
                    origin,
                    limit_region: None,
                },
                true,
                1,
            );
            let dynamic = self.alloc(NodeKind::Inner, true, 1);
            let static_node = self.alloc(NodeKind::Inner, true, 1);
            self.set_children_unchecked(output_node, alloc::vec![dynamic, static_node]);

            let layer_node = self.layer(layer);
            let mut list = self.children_of(layer_node).to_vec();
            list.push(output_node);
            self.set_children_unchecked(layer_node, list);
            OutputNodes {
                output: output_node,
                dynamic,
                static_node,
            }
        });
        self.outputs.insert(output, nodes);
        debug!(%output, %origin, "Added output.");
        self.update(self.root(), UpdateFlags::CHILDREN_LIST);
        Ok(())
    }

    /// Remove an output and destroy everything placed on it.
    pub fn remove_output(&mut self, output: OutputId) -> Result<(), Error> {
        let nodes = self
            .outputs
            .remove(&output)
            .ok_or(Error::UnknownOutput(output))?;
        for node in nodes {
            if let Some(layer_node) = self.parent_of(node.output) {
                let list: Vec<_> = self
                    .children_of(layer_node)
                    .iter()
                    .copied()
                    .filter(|&c| c != node.output)
                    .collect();
                self.set_children_unchecked(layer_node, list);
            }
            self.free_subtree(node.output);
        }
        debug!(%output, "Removed output.");
        self.update(self.root(), UpdateFlags::CHILDREN_LIST);
        Ok(())
    }

    /// The nodes of `output` within `layer`.
    pub fn output_nodes(&self, output: OutputId, layer: Layer) -> Option<OutputNodes> {
        self.outputs.get(&output).map(|nodes| nodes[layer.index()])
    }

    /// All known outputs, in no particular order.
    pub fn outputs(&self) -> impl Iterator<Item = OutputId> + '_ {
        self.outputs.keys().copied()
    }

    /// Move an output within the global layout.
    pub fn set_output_origin(&mut self, output: OutputId, origin: Point) -> Result<(), Error> {
        let nodes = self.layer_outputs(output)?;
        for node in nodes {
            let before = self.bounding_box(node).unwrap_or(Geometry::ZERO);
            if let Some(NodeKind::Output { origin: current, .. }) =
                self.node_opt_mut(node).map(|n| &mut n.kind)
            {
                *current = origin;
            }
            let after = self.bounding_box(node).unwrap_or(Geometry::ZERO);
            self.damage_node(node, &(Region::from(before) | after));
        }
        self.update(self.root(), UpdateFlags::GEOMETRY);
        Ok(())
    }

    /// Confine input and rendering of an output's nodes to a global region, or lift the limit.
    pub fn set_output_limit_region(
        &mut self,
        output: OutputId,
        limit: Option<Region>,
    ) -> Result<(), Error> {
        let nodes = self.layer_outputs(output)?;
        for node in nodes {
            if let Some(NodeKind::Output { limit_region, .. }) =
                self.node_opt_mut(node).map(|n| &mut n.kind)
            {
                limit_region.clone_from(&limit);
            }
        }
        self.update(self.root(), UpdateFlags::INPUT_STATE);
        Ok(())
    }

    fn layer_outputs(&self, output: OutputId) -> Result<[NodeId; Layer::COUNT], Error> {
        self.outputs
            .get(&output)
            .map(|nodes| (*nodes).map(|n| n.output))
            .ok_or(Error::UnknownOutput(output))
    }
}
