// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only tree queries: hit-testing, drop classification, and adjacency.

use trellis_region::{Geometry, Point};

use crate::options::DEFAULT_DROP_SENSITIVITY;
use crate::tree::Tree;
use crate::types::{Insertion, NodeId, NodeKind};

impl Tree {
    /// The view leaf below `root` whose tile contains `point`.
    ///
    /// A view leaf passed as `root` is its own match. Returns `None` when no
    /// child contains the point, which is a normal outcome near rounding gaps.
    pub fn find_view_at(&self, root: NodeId, point: Point) -> Option<NodeId> {
        match self.kind(root)? {
            NodeKind::View(_) => Some(root),
            NodeKind::Split(_) => {
                let child = self.children_of(root).iter().copied().find(|&child| {
                    self.geometry(child)
                        .is_some_and(|g| g.contains_point(point))
                })?;
                self.find_view_at(child, point)
            }
        }
    }

    /// Classify a drop at `point` onto `node` with the default sensitivity.
    pub fn calculate_insert_type(&self, node: NodeId, point: Point) -> Insertion {
        self.calculate_insert_type_with(node, point, DEFAULT_DROP_SENSITIVITY)
    }

    /// Classify a drop at `point` onto `node`.
    ///
    /// The edge closest to the point wins, as long as the point lies within
    /// `sensitivity` (a fraction of the node's size) of it. Ties go to the
    /// first of left, above, right, below. Points outside the node, or too far
    /// from every edge, give [`Insertion::None`].
    pub fn calculate_insert_type_with(
        &self,
        node: NodeId,
        point: Point,
        sensitivity: f64,
    ) -> Insertion {
        let Some(geometry) = self.geometry(node) else {
            return Insertion::None;
        };
        if !geometry.contains_point(point) {
            return Insertion::None;
        }

        let px = f64::from(point.x - geometry.x) / f64::from(geometry.width);
        let py = f64::from(point.y - geometry.y) / f64::from(geometry.height);
        let candidates = [
            (px, Insertion::Left),
            (py, Insertion::Above),
            (1.0 - px, Insertion::Right),
            (1.0 - py, Insertion::Below),
        ];

        let mut best: Option<(f64, Insertion)> = None;
        for (score, insertion) in candidates {
            if score > sensitivity {
                continue;
            }
            if best.is_none_or(|(closest, _)| score < closest) {
                best = Some((score, insertion));
            }
        }
        best.map_or(Insertion::None, |(_, insertion)| insertion)
    }

    /// The part of `node` to highlight while a drop would insert there.
    ///
    /// This is the third of the node on the insertion side, or the whole node
    /// for [`Insertion::None`].
    pub fn calculate_split_preview(&self, node: NodeId, insertion: Insertion) -> Option<Geometry> {
        let g = self.geometry(node)?;
        let third_w = g.width / 3;
        let third_h = g.height / 3;
        Some(match insertion {
            Insertion::Left => Geometry::new(g.x, g.y, third_w, g.height),
            Insertion::Right => Geometry::new(g.right() - third_w, g.y, third_w, g.height),
            Insertion::Above => Geometry::new(g.x, g.y, g.width, third_h),
            Insertion::Below => Geometry::new(g.x, g.bottom() - third_h, g.width, third_h),
            Insertion::None => g,
        })
    }

    /// The view directly adjacent to `from` in `direction`.
    ///
    /// Probes one pixel past the middle of the matching edge, within the
    /// hierarchy that contains `from`.
    pub fn find_first_view_in_direction(
        &self,
        from: NodeId,
        direction: Insertion,
    ) -> Option<NodeId> {
        let g = self.geometry(from)?;
        let probe = match direction {
            Insertion::Above => Point::new(g.x + g.width / 2, g.y - 1),
            Insertion::Below => Point::new(g.x + g.width / 2, g.bottom()),
            Insertion::Left => Point::new(g.x - 1, g.y + g.height / 2),
            Insertion::Right => Point::new(g.right(), g.y + g.height / 2),
            Insertion::None => return None,
        };
        let root = self.root_of(from)?;
        self.find_view_at(root, probe)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::RecordingHost;
    use crate::tree::Tree;
    use crate::types::{Insertion, NodeId, SplitDirection, ViewId};
    use trellis_region::{Geometry, Point};

    fn square() -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let root = tree.new_split(Geometry::new(0, 0, 300, 300), SplitDirection::Vertical);
        (tree, root)
    }

    #[test]
    fn classifies_edges_and_center() {
        let (tree, node) = square();
        let at = |x, y| tree.calculate_insert_type(node, Point::new(x, y));
        assert_eq!(at(10, 150), Insertion::Left);
        assert_eq!(at(150, 10), Insertion::Above);
        assert_eq!(at(290, 150), Insertion::Right);
        assert_eq!(at(150, 290), Insertion::Below);
        assert_eq!(at(150, 150), Insertion::None);
        assert_eq!(at(400, 150), Insertion::None);
        assert_eq!(at(-1, 150), Insertion::None);
    }

    #[test]
    fn equal_scores_prefer_the_earlier_edge() {
        let (tree, node) = square();
        assert_eq!(tree.calculate_insert_type(node, Point::new(10, 10)), Insertion::Left);
        assert_eq!(
            tree.calculate_insert_type(node, Point::new(290, 290)),
            Insertion::Right
        );
    }

    #[test]
    fn sensitivity_narrows_the_edge_bands() {
        let (tree, node) = square();
        let point = Point::new(60, 150);
        assert_eq!(tree.calculate_insert_type(node, point), Insertion::Left);
        assert_eq!(
            tree.calculate_insert_type_with(node, point, 0.1),
            Insertion::None
        );
    }

    #[test]
    fn split_preview_takes_a_third() {
        let (tree, node) = square();
        let preview = |insertion| tree.calculate_split_preview(node, insertion);
        assert_eq!(preview(Insertion::Left), Some(Geometry::new(0, 0, 100, 300)));
        assert_eq!(preview(Insertion::Right), Some(Geometry::new(200, 0, 100, 300)));
        assert_eq!(preview(Insertion::Above), Some(Geometry::new(0, 0, 300, 100)));
        assert_eq!(preview(Insertion::Below), Some(Geometry::new(0, 200, 300, 100)));
        assert_eq!(preview(Insertion::None), Some(Geometry::new(0, 0, 300, 300)));
    }

    #[test]
    fn hit_testing_and_neighbours() {
        let mut host = RecordingHost::new();
        let mut tree = Tree::new();
        let root = tree.new_split(Geometry::new(0, 0, 1280, 720), SplitDirection::Vertical);
        let a = tree.new_view(ViewId(1)).unwrap();
        tree.add_child(root, a, None, &mut host).unwrap();
        let column = tree.new_split(Geometry::ZERO, SplitDirection::Horizontal);
        tree.add_child(root, column, None, &mut host).unwrap();
        let b = tree.new_view(ViewId(2)).unwrap();
        let c = tree.new_view(ViewId(3)).unwrap();
        tree.add_child(column, b, None, &mut host).unwrap();
        tree.add_child(column, c, None, &mut host).unwrap();

        assert_eq!(tree.find_view_at(root, Point::new(10, 700)), Some(a));
        assert_eq!(tree.find_view_at(root, Point::new(700, 100)), Some(b));
        assert_eq!(tree.find_view_at(root, Point::new(700, 400)), Some(c));
        assert_eq!(tree.find_view_at(root, Point::new(2000, 400)), None);
        assert_eq!(tree.find_view_at(a, Point::new(2000, 400)), Some(a));

        assert_eq!(tree.find_first_view_in_direction(a, Insertion::Right), Some(c));
        assert_eq!(tree.find_first_view_in_direction(c, Insertion::Above), Some(b));
        assert_eq!(tree.find_first_view_in_direction(b, Insertion::Left), Some(a));
        assert_eq!(tree.find_first_view_in_direction(b, Insertion::Above), None);
        assert_eq!(tree.find_first_view_in_direction(a, Insertion::Left), None);
        assert_eq!(tree.find_first_view_in_direction(a, Insertion::None), None);
    }
}
