// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text dumps of the scene, for logs and tests.

use alloc::{format, string::String};

use crate::scene::Scene;
use crate::types::{NodeId, NodeKind};

impl Scene {
    /// One-line description of a node.
    ///
    /// Disabled nodes are marked `(d)`:
    ///
    /// ```text
    /// root ()
    /// layer_workspace ()
    /// output 1 ()
    /// node (d)
    /// translation (10,20) ()
    /// content (0,0 640x480) ()
    /// ```
    pub fn stringify(&self, id: NodeId) -> Option<String> {
        let node = self.node_opt(id)?;
        let flags = if node.enabled_counter > 0 { "()" } else { "(d)" };
        Some(match &node.kind {
            NodeKind::Root => format!("root {flags}"),
            NodeKind::Layer(layer) => format!("layer_{} {flags}", layer.name()),
            NodeKind::Inner => format!("node {flags}"),
            NodeKind::Output { output, .. } => format!("output {output} {flags}"),
            NodeKind::Translation { offset } => format!("translation {offset} {flags}"),
            NodeKind::Content { bounds, .. } => format!("content {bounds} {flags}"),
        })
    }

    /// Describe `id` and its subtree, one node per line, children indented
    /// by two spaces and listed bottom first.
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(line) = self.stringify(id) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&line);
        out.push('\n');
        for &child in self.children_of(id) {
            self.dump_into(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_region::{Geometry, Point};

    use crate::{FloatingKind, Layer, OutputId, Scene};

    #[test]
    fn stringify_names_each_kind() {
        let mut scene = Scene::new();
        assert_eq!(scene.stringify(scene.root()).unwrap(), "root ()");
        assert_eq!(
            scene.stringify(scene.layer(Layer::DesktopWidget)).unwrap(),
            "layer_dwidget ()"
        );
        let shift = scene.create_disabled_node(FloatingKind::Translation {
            offset: Point::new(-3, 4),
        });
        assert_eq!(scene.stringify(shift).unwrap(), "translation (-3,4) (d)");
        scene.destroy_node(shift).unwrap();
        assert_eq!(scene.stringify(shift), None);
    }

    #[test]
    fn dump_indents_children() {
        let mut scene = Scene::new();
        scene.add_output(OutputId(2), Point::ZERO).unwrap();
        let nodes = scene.output_nodes(OutputId(2), Layer::Workspace).unwrap();
        let window = scene.create_node(FloatingKind::Content {
            bounds: Geometry::new(0, 0, 640, 480),
            accepts_input: true,
        });
        scene.add_front(nodes.dynamic, window).unwrap();

        assert_eq!(
            scene.dump(scene.layer(Layer::Workspace)),
            "layer_workspace ()\n  output 2 ()\n    node ()\n      content (0,0 640x480) ()\n    node ()\n"
        );
    }
}
