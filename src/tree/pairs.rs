use super::{NodeID, Octree, ROOT};
use crate::{aabb::Aabb, bounded::Bounded, vector::InternalVector};

impl<E, V> Octree<E, V>
where
    E: Bounded<Vector = V> + PartialEq,
    V: InternalVector,
{
    /// Calls `f` once for every unordered pair of distinct stored elements whose bounding boxes
    /// may overlap.
    ///
    /// Every pair of overlapping elements is visited, along with pairs that merely share a node
    /// or are close to each other. Use [`Aabb::overlaps`] or a finer test to narrow them down.
    ///
    /// ```
    /// # use loose_octree::prelude::*;
    /// # use glam::Vec3;
    /// let config = OctreeConfig::default().with_thresholds(1, 2);
    /// let mut octree = Octree::with_config(Aabb::new(Vec3::splat(-1.0), Vec3::ONE), config).unwrap();
    /// octree.insert(Aabb::new(Vec3::ZERO, Vec3::splat(0.5))).unwrap();
    /// octree.insert(Aabb::new(Vec3::splat(-0.5), Vec3::ONE)).unwrap();
    ///
    /// let mut overlapping = 0;
    /// octree.visit_pairs(|a, b| {
    ///     if a.overlaps(b) {
    ///         overlapping += 1;
    ///     }
    /// });
    ///
    /// assert_eq!(overlapping, 1);
    /// ```
    pub fn visit_pairs<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a E, &'a E),
    {
        let _span = tracing::trace_span!("visit_pairs", elements = self.count()).entered();
        self.visit_subtree(ROOT, &mut f);
    }

    /// Pairs of stored elements whose bounding boxes overlap.
    pub fn overlapping_pairs(&self) -> Vec<(&E, &E)> {
        let mut pairs = Vec::new();
        self.visit_pairs(|a, b| {
            if a.bounding_box().overlaps(&b.bounding_box()) {
                pairs.push((a, b));
            }
        });
        pairs
    }

    fn visit_subtree<'a, F>(&'a self, id: NodeID, f: &mut F)
    where
        F: FnMut(&'a E, &'a E),
    {
        self.visit_local(id, f);
        if let Some(children) = self.get(id).children() {
            for &child in children.as_slice() {
                self.visit_subtree(child, f);
            }
        }
    }

    /// Visits the pairs whose deepest common node is `id`: pairs of its own elements, its own
    /// elements with the elements below it, and elements of two different children that both
    /// reach into the margin the loose regions of these children share.
    pub(super) fn visit_local<'a, F>(&'a self, id: NodeID, f: &mut F)
    where
        F: FnMut(&'a E, &'a E),
    {
        let node = self.get(id);
        if node.len < 2 {
            return;
        }

        let own = node.elements.as_slice();
        for (i, a) in own.iter().enumerate() {
            for b in &own[i + 1..] {
                f(a, b);
            }
        }

        let Some(children) = node.children() else {
            return;
        };
        let children = children.as_slice();

        if !own.is_empty() {
            let mut below = Vec::new();
            for &child in children {
                self.collect_subtree(child, &mut below);
            }
            tracing::trace!(node = id, overflow = own.len(), below = below.len(), "overflow pairs");
            for a in own {
                for &b in &below {
                    f(a, b);
                }
            }
        }

        let (mut lhs, mut rhs) = (Vec::new(), Vec::new());
        for (i, &first) in children.iter().enumerate() {
            if self.get(first).len == 0 {
                continue;
            }
            for &second in &children[i + 1..] {
                if self.get(second).len == 0 {
                    continue;
                }
                let Some(margin) = self
                    .get(first)
                    .region
                    .intersection(&self.get(second).region)
                else {
                    continue;
                };

                lhs.clear();
                self.collect_overlapping(first, &margin, &mut lhs);
                if lhs.is_empty() {
                    continue;
                }
                rhs.clear();
                self.collect_overlapping(second, &margin, &mut rhs);

                for &a in &lhs {
                    for &b in &rhs {
                        f(a, b);
                    }
                }
            }
        }
    }

    fn collect_subtree<'a>(&'a self, id: NodeID, dest: &mut Vec<&'a E>) {
        let node = self.get(id);
        if node.len == 0 {
            return;
        }
        dest.extend(node.elements.iter());
        if let Some(children) = node.children() {
            for &child in children.as_slice() {
                self.collect_subtree(child, dest);
            }
        }
    }

    fn collect_overlapping<'a>(&'a self, id: NodeID, zone: &Aabb<V>, dest: &mut Vec<&'a E>) {
        let node = self.get(id);
        if node.len == 0 || !node.region.overlaps(zone) {
            return;
        }
        dest.extend(
            node.elements
                .iter()
                .filter(|element| element.bounding_box().overlaps(zone)),
        );
        if let Some(children) = node.children() {
            for &child in children.as_slice() {
                self.collect_overlapping(child, zone, dest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::*;
    use super::*;
    use crate::config::OctreeConfig;
    use glam::Vec3;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn visited(tree: &Octree<Body, Vec3>) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        tree.visit_pairs(|a, b| pairs.push((a.id.min(b.id), a.id.max(b.id))));
        pairs
    }

    #[test]
    fn overflow_pairs_with_descendants() {
        let mut tree = small_tree();
        tree.insert(cube(1, 0.0, 0.5)).unwrap();
        tree.insert(cube(2, -0.5, 1.0)).unwrap();

        let mut intersections = 0;
        tree.visit_pairs(|a, b| {
            if a.bounding_box.overlaps(&b.bounding_box) {
                intersections += 1;
            }
        });

        assert_eq!(intersections, 1);
        assert_eq!(tree.overlapping_pairs().len(), 1);
    }

    #[test]
    fn leaf_pairs_are_unordered_and_distinct() {
        let mut tree = Octree::new(unit_region());
        for id in 0..4 {
            tree.insert(cube(id, -0.1 * id as f32, 0.5)).unwrap();
        }

        let mut pairs = visited(&tree);
        pairs.sort_unstable();

        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn siblings_overlapping_in_the_margin_are_paired() {
        let mut tree = small_tree();
        // Both fit their own loose octant but reach across the center plane x = 0.
        let left = body(1, [-0.05, -0.5, -0.5], [0.05, -0.4, -0.4]);
        let right = body(2, [0.0, -0.5, -0.5], [0.15, -0.4, -0.4]);
        tree.insert(left.clone()).unwrap();
        tree.insert(right.clone()).unwrap();

        let children = tree.root().children().unwrap().0;
        assert_eq!(tree.locate(&left), Ok(children[0]));
        assert_eq!(tree.locate(&right), Ok(children[1]));
        assert!(left.bounding_box.overlaps(&right.bounding_box));

        assert_eq!(visited(&tree), vec![(1, 2)]);
    }

    #[test]
    fn distant_siblings_are_not_paired() {
        let mut tree = small_tree();
        tree.insert(cube(1, -0.9, -0.8)).unwrap();
        tree.insert(cube(2, 0.8, 0.9)).unwrap();

        assert!(visited(&tree).is_empty());
    }

    fn arb_boxes() -> impl Strategy<Value = Vec<(Vec3, f32)>> {
        let body = (
            (-1.0_f32..0.9, -1.0_f32..0.9, -1.0_f32..0.9),
            0.01_f32..0.4,
        )
            .prop_map(|((x, y, z), size)| (Vec3::new(x, y, z), size));

        proptest::collection::vec(body, 0..60)
    }

    proptest! {
        #[test]
        fn every_overlapping_pair_is_visited_once(
            boxes in arb_boxes(),
            max_threshold in 2_usize..6,
            overlap in 0.0_f64..0.5,
        ) {
            let config = OctreeConfig::default()
                .with_thresholds(1, max_threshold)
                .with_overlap(overlap);
            let mut tree = Octree::with_config(unit_region(), config).unwrap();
            let bodies: Vec<_> = boxes
                .iter()
                .enumerate()
                .map(|(id, &(min, size))| {
                    let max = (min + Vec3::splat(size)).min(Vec3::ONE);
                    body(id as u32, min.to_array(), max.to_array())
                })
                .collect();
            for body in &bodies {
                tree.insert(body.clone()).unwrap();
            }

            let pairs = visited(&tree);
            let unique: HashSet<_> = pairs.iter().copied().collect();
            prop_assert_eq!(unique.len(), pairs.len(), "pair visited twice");
            prop_assert!(pairs.iter().all(|(a, b)| a != b), "element paired with itself");

            for (i, a) in bodies.iter().enumerate() {
                for b in &bodies[i + 1..] {
                    if a.bounding_box.overlaps(&b.bounding_box) {
                        prop_assert!(
                            unique.contains(&(a.id, b.id)),
                            "missing pair ({}, {})", a.id, b.id
                        );
                    }
                }
            }
        }
    }
}
