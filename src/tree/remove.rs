use super::{Node, NodeID, Octree, Orthant, ROOT};
use crate::{bounded::Bounded, error::OctreeError, vector::InternalVector};

impl<E, V> Octree<E, V>
where
    E: Bounded<Vector = V> + PartialEq,
    V: InternalVector,
{
    /// Removes the element equal to `element` and returns it.
    ///
    /// Internal nodes whose subtree holds no more than
    /// [`min_threshold`](crate::OctreeConfig::min_threshold) elements are collapsed back into
    /// leaves on the way.
    ///
    /// Fails with [`OctreeError::NotFound`] if no such element is stored. Such a removal may still
    /// collapse the underloaded subtrees it searched through.
    ///
    /// ```
    /// # use loose_octree::prelude::*;
    /// # use glam::Vec3;
    /// let mut octree = Octree::new(Aabb::new(Vec3::splat(-1.0), Vec3::ONE));
    /// let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(0.5));
    /// octree.insert(aabb).unwrap();
    ///
    /// assert_eq!(octree.remove(&aabb), Ok(aabb));
    /// assert_eq!(octree.remove(&aabb), Err(OctreeError::NotFound));
    /// ```
    pub fn remove(&mut self, element: &E) -> Result<E, OctreeError> {
        self.remove_at(ROOT, element)
            .map(|(_, removed)| removed)
            .ok_or(OctreeError::NotFound)
    }

    /// Removes the element equal to `element` from the subtree rooted at the given node.
    ///
    /// Fails with [`OctreeError::NotFound`], leaving the tree untouched, if the element is not
    /// stored in that subtree. A merge started in this subtree may propagate to its ancestors.
    pub fn remove_from(&mut self, id: NodeID, element: &E) -> Result<E, OctreeError> {
        if self.node(id).and_then(|_| self.find(id, element)).is_none() {
            return Err(OctreeError::NotFound);
        }

        self.remove_at(id, element)
            .map(|(_, removed)| removed)
            .ok_or(OctreeError::NotFound)
    }

    /// Returns the removed element with the node it was taken from, which is still live.
    pub(super) fn remove_at(&mut self, id: NodeID, element: &E) -> Option<(NodeID, E)> {
        let (state, len, parent) = {
            let node = self.get(id);
            (node.state, node.len, node.parent)
        };
        let min_threshold = self.config.min_threshold;

        match state {
            Node::External => self.take_own(id, element).map(|removed| (id, removed)),
            Node::Internal(Orthant(children)) if len > min_threshold => {
                if let Some(removed) = self.take_own(id, element) {
                    return Some((id, removed));
                }
                children
                    .into_iter()
                    .find_map(|child| self.remove_at(child, element))
            }
            Node::Internal(_) => {
                self.merge(id);
                match parent {
                    Some(parent) if self.get(parent).len <= min_threshold => {
                        self.remove_at(parent, element)
                    }
                    _ => self.remove_at(id, element),
                }
            }
        }
    }

    // Turns an internal node into a leaf holding every element of its subtree.
    fn merge(&mut self, id: NodeID) {
        let Node::Internal(Orthant(children)) = self.get(id).state else {
            return;
        };

        let mut elements = Vec::new();
        for child in children {
            self.release(child, &mut elements);
        }

        let node = self.get_mut(id);
        node.state = Node::External;
        node.elements.append(&mut elements);

        tracing::debug!(node = id, elements = node.elements.len(), "merge");
    }

    fn release(&mut self, id: NodeID, elements: &mut Vec<E>) {
        let node = self.get_mut(id);
        elements.append(&mut node.elements);
        let state = std::mem::replace(&mut node.state, Node::External);
        node.parent = None;
        node.depth = 0;
        node.len = 0;

        if let Node::Internal(Orthant(children)) = state {
            for child in children {
                self.release(child, elements);
            }
        }
        self.free.push(id);
    }
}
