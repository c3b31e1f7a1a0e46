use super::{NodeID, Octree, ROOT};
use crate::{
    bounded::Bounded,
    error::{OctreeError, Rejected},
    vector::InternalVector,
};

impl<E, V> Octree<E, V>
where
    E: Bounded<Vector = V> + PartialEq,
    V: InternalVector,
{
    /// Replaces the stored element equal to `element` after its bounding box changed, and
    /// returns the identifier of the node now holding it.
    ///
    /// The element is first removed, then reinserted from the node it was taken from, or from
    /// the parent of that node if the new bounding box left its region.
    ///
    /// Fails with [`OctreeError::NotFound`] if no equal element is stored, and with
    /// [`OctreeError::OutOfRegion`] if neither of these two nodes can contain the new bounding
    /// box. In the latter case the element is no longer in the tree; it is handed back so it
    /// can be [inserted](Octree::insert) again from the root.
    ///
    /// ```
    /// # use loose_octree::prelude::*;
    /// # use glam::Vec3;
    /// #[derive(Bounded, Debug)]
    /// struct Body {
    ///     id: u32,
    ///     bounding_box: Aabb<Vec3>,
    /// }
    ///
    /// impl PartialEq for Body {
    ///     fn eq(&self, other: &Self) -> bool {
    ///         self.id == other.id
    ///     }
    /// }
    ///
    /// let mut octree = Octree::new(Aabb::new(Vec3::splat(-1.0), Vec3::ONE));
    /// let mut body = Body { id: 0, bounding_box: Aabb::new(Vec3::ZERO, Vec3::splat(0.1)) };
    /// octree.insert(Body { ..body }).unwrap();
    ///
    /// body.bounding_box = Aabb::new(Vec3::splat(0.2), Vec3::splat(0.3));
    /// octree.relocate(body).unwrap();
    ///
    /// assert_eq!(octree.count(), 1);
    /// ```
    pub fn relocate(&mut self, element: E) -> Result<NodeID, Rejected<E>> {
        self.relocate_from(ROOT, element)
    }

    /// Same as [`relocate`](Octree::relocate), only searching the subtree rooted at `start`.
    pub fn relocate_from(&mut self, start: NodeID, element: E) -> Result<NodeID, Rejected<E>> {
        let holder = self
            .node(start)
            .and_then(|_| self.find(start, &element));
        let Some((anchor, _)) = holder.and_then(|holder| self.remove_at(holder, &element)) else {
            return Err(Rejected::new(element, OctreeError::NotFound));
        };

        let bounding_box = element.bounding_box();
        if self.get(anchor).region.fully_contains(&bounding_box) {
            return Ok(self.place(anchor, element, &bounding_box));
        }

        match self.get(anchor).parent {
            Some(parent) if self.get(parent).region.fully_contains(&bounding_box) => {
                tracing::debug!(node = anchor, parent, "relocation fell back to the parent node");
                Ok(self.place(parent, element, &bounding_box))
            }
            _ => {
                tracing::debug!(node = anchor, "relocation rejected: bounding box out of region");
                Err(Rejected::new(element, OctreeError::OutOfRegion))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::*;
    use super::*;
    use crate::Aabb;
    use glam::Vec3;

    fn stored_box(tree: &Octree<Body, Vec3>, id: u32) -> Option<Aabb<Vec3>> {
        tree.iter()
            .find(|body| body.id == id)
            .map(|body| body.bounding_box)
    }

    #[test]
    fn small_move_stays_in_place() {
        let mut tree = Octree::new(unit_region());
        for id in 0..3 {
            let min = -0.5 + id as f32 * 0.3;
            tree.insert(cube(id, min, min + 0.1)).unwrap();
        }

        let moved = cube(1, -0.15, -0.05);
        assert_eq!(tree.relocate(moved.clone()), Ok(ROOT));

        assert_eq!(tree.count(), 3);
        assert_eq!(stored_box(&tree, 1), Some(moved.bounding_box));
        assert_invariants(&tree);
    }

    #[test]
    fn falls_back_to_the_parent() {
        let mut tree = small_tree();
        tree.insert(cube(1, 0.2, 0.4)).unwrap();
        tree.insert(cube(2, -0.5, -0.3)).unwrap();
        let children = tree.root().children().unwrap().0;
        assert_eq!(tree.locate(&cube(1, 0.0, 0.0)), Ok(children[7]));

        let holder = tree.relocate(cube(1, -0.9, -0.8)).unwrap();

        assert_ne!(holder, children[7]);
        assert_eq!(tree.locate(&cube(1, 0.0, 0.0)), Ok(holder));
        assert_eq!(stored_box(&tree, 1), Some(cube(1, -0.9, -0.8).bounding_box));
        assert_eq!(tree.count(), 2);
        assert_invariants(&tree);
    }

    #[test]
    fn leaving_the_root_hands_element_back() {
        let mut tree = small_tree();
        tree.insert(cube(1, 0.0, 0.5)).unwrap();

        let rejected = tree.relocate(cube(1, 0.5, 1.5)).unwrap_err();

        assert_eq!(rejected.error(), OctreeError::OutOfRegion);
        assert_eq!(rejected.element().id, 1);
        assert!(!tree.contains(&cube(1, 0.0, 0.0)));
        assert!(tree.is_empty());
    }

    #[test]
    fn fallback_is_limited_to_one_level() {
        let mut tree = small_tree();
        tree.insert(cube(1, 0.5, 0.6)).unwrap();
        tree.insert(cube(2, 0.8, 0.9)).unwrap();
        let holder = tree.locate(&cube(1, 0.0, 0.0)).unwrap();
        assert!(tree.node(holder).unwrap().depth() >= 2);

        let rejected = tree.relocate(cube(1, -0.9, -0.8)).unwrap_err();
        assert_eq!(rejected.error(), OctreeError::OutOfRegion);
        assert!(!tree.contains(&cube(1, 0.0, 0.0)));
        assert_eq!(tree.count(), 1);

        tree.insert(rejected.into_inner()).unwrap();
        assert_eq!(tree.count(), 2);
        assert_invariants(&tree);
    }

    #[test]
    fn relocating_absent_element_is_not_found() {
        let mut tree = small_tree();
        tree.insert(cube(1, 0.0, 0.5)).unwrap();

        let rejected = tree.relocate(cube(99, 0.0, 0.5)).unwrap_err();
        assert_eq!(rejected.error(), OctreeError::NotFound);
        assert_eq!(rejected.into_inner().id, 99);

        let rejected = tree.relocate_from(1000, cube(1, 0.0, 0.5)).unwrap_err();
        assert_eq!(rejected.error(), OctreeError::NotFound);
        assert_eq!(tree.count(), 1);
    }
}
