use super::{Node, NodeID, Octree, Orthant, ROOT};
use crate::{
    aabb::Aabb,
    bounded::Bounded,
    error::{OctreeError, Rejected},
    vector::InternalVector,
};

impl<E, V> Octree<E, V>
where
    E: Bounded<Vector = V> + PartialEq,
    V: InternalVector,
{
    /// Inserts an element and returns the identifier of the node now holding it.
    ///
    /// The element descends into the first child whose region fully contains its bounding box
    /// and stays at the deepest internal node no child can take. Leaves that would reach the
    /// split threshold are subdivided first.
    ///
    /// Fails with [`OctreeError::OutOfRegion`] if the region of the tree does not fully contain
    /// the bounding box. The tree is left untouched and the element is handed back.
    ///
    /// ```
    /// # use loose_octree::prelude::*;
    /// # use glam::Vec3;
    /// let mut octree = Octree::new(Aabb::new(Vec3::splat(-1.0), Vec3::ONE));
    ///
    /// let id = octree.insert(Aabb::new(Vec3::ZERO, Vec3::splat(0.5))).unwrap();
    ///
    /// assert_eq!(id, ROOT);
    /// assert_eq!(octree.count(), 1);
    /// ```
    pub fn insert(&mut self, element: E) -> Result<NodeID, Rejected<E>> {
        self.insert_at(ROOT, element)
    }

    pub(super) fn insert_at(&mut self, id: NodeID, element: E) -> Result<NodeID, Rejected<E>> {
        let bounding_box = element.bounding_box();
        if !self.get(id).region.fully_contains(&bounding_box) {
            tracing::debug!(node = id, "insertion rejected: bounding box out of region");
            return Err(Rejected::new(element, OctreeError::OutOfRegion));
        }

        Ok(self.place(id, element, &bounding_box))
    }

    // The region of `id` must fully contain `bounding_box`.
    pub(super) fn place(&mut self, mut id: NodeID, element: E, bounding_box: &Aabb<V>) -> NodeID {
        loop {
            let (state, own, depth) = {
                let node = self.get(id);
                (node.state, node.elements.len(), node.depth)
            };

            match state {
                Node::External => {
                    if own + 1 >= self.config.max_threshold && depth < self.config.max_depth {
                        self.split(id);
                        continue;
                    }
                    self.push_own(id, element);
                    return id;
                }
                Node::Internal(Orthant(children)) => {
                    let target = children
                        .into_iter()
                        .find(|&child| self.get(child).region.fully_contains(bounding_box));

                    match target {
                        Some(child) => id = child,
                        None => {
                            self.push_own(id, element);
                            return id;
                        }
                    }
                }
            }
        }
    }

    fn split(&mut self, id: NodeID) {
        let node = self.get(id);
        let depth = node.depth + 1;
        let octants = node.region.loose_octants(self.overlap());

        let children = octants.map(|region| self.allocate(region, id, depth));
        let elements = std::mem::take(&mut self.get_mut(id).elements);
        self.shrink(id, elements.len());
        self.get_mut(id).state = Node::Internal(Orthant(children));

        tracing::trace!(node = id, depth, elements = elements.len(), "split");

        for element in elements {
            let bounding_box = element.bounding_box();
            self.place(id, element, &bounding_box);
        }
    }
}
