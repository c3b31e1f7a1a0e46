mod insert;
mod pairs;
#[cfg(feature = "parallel")]
mod parallel;
mod relocate;
mod remove;

use crate::{
    aabb::Aabb,
    bounded::Bounded,
    config::OctreeConfig,
    error::OctreeError,
    vector::{InternalVector, Scalar},
};

/// Index of a node in the arena of an [`Octree`].
pub type NodeID = u32;

/// Identifier of the root node of every [`Octree`].
pub const ROOT: NodeID = 0;

/// Identifiers of the `N` children of an internal node, in octant order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orthant<const N: usize>(pub [NodeID; N]);

impl<const N: usize> Orthant<N> {
    /// Returns the children identifiers as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[NodeID] {
        &self.0
    }
}

/// State of a node of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<N> {
    /// Node subdivided into children.
    Internal(N),
    /// Leaf node.
    External,
}

/// A node of an [`Octree`], governing a cuboid region.
#[derive(Clone, Debug)]
pub struct OctreeNode<E, V> {
    region: Aabb<V>,
    parent: Option<NodeID>,
    depth: u32,
    state: Node<Orthant<8>>,
    elements: Vec<E>,
    len: usize,
}

impl<E, V> OctreeNode<E, V> {
    fn new(region: Aabb<V>, parent: Option<NodeID>, depth: u32) -> Self {
        Self {
            region,
            parent,
            depth,
            state: Node::External,
            elements: Vec::new(),
            len: 0,
        }
    }

    /// Region governed by the node, overlap included.
    #[inline]
    pub fn region(&self) -> &Aabb<V> {
        &self.region
    }

    /// Identifier of the parent node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeID> {
        self.parent
    }

    /// Depth of the node, the root being at depth 0.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Internal or external state of the node.
    #[inline]
    pub fn state(&self) -> &Node<Orthant<8>> {
        &self.state
    }

    /// Returns true if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.state, Node::External)
    }

    /// Children of the node if it is internal.
    #[inline]
    pub fn children(&self) -> Option<&Orthant<8>> {
        match &self.state {
            Node::Internal(orthant) => Some(orthant),
            Node::External => None,
        }
    }

    /// Elements held directly by the node.
    ///
    /// For an internal node, these are the overflow elements no child could fully contain.
    #[inline]
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Number of elements in the subtree rooted at this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the subtree rooted at this node holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A dynamic loose octree storing [`Bounded`] elements over a fixed region.
///
/// Nodes live in an arena and are addressed by [`NodeID`]. Leaves split into 8 loose octants
/// when they would hold [`max_threshold`](OctreeConfig::max_threshold) elements, and internal
/// nodes collapse back into leaves when an element is removed from a subtree holding at most
/// [`min_threshold`](OctreeConfig::min_threshold) elements.
///
/// Elements are matched with [`PartialEq`] and must not be inserted twice.
#[derive(Clone, Debug)]
pub struct Octree<E, V> {
    nodes: Vec<OctreeNode<E, V>>,
    free: Vec<NodeID>,
    config: OctreeConfig,
}

impl<E, V> Octree<E, V>
where
    E: Bounded<Vector = V> + PartialEq,
    V: InternalVector,
{
    /// Creates an empty [`Octree`] over the given region with the default [`OctreeConfig`].
    pub fn new(region: Aabb<V>) -> Self {
        Self::from_parts(region, OctreeConfig::default())
    }

    /// Creates an empty [`Octree`] over the given region with the given configuration.
    ///
    /// Fails with [`OctreeError::InvalidConfig`] if the configuration does not
    /// [validate](OctreeConfig::validate).
    pub fn with_config(region: Aabb<V>, config: OctreeConfig) -> Result<Self, OctreeError> {
        config.validate()?;
        Ok(Self::from_parts(region, config))
    }

    fn from_parts(region: Aabb<V>, config: OctreeConfig) -> Self {
        Self {
            nodes: vec![OctreeNode::new(region, None, 0)],
            free: Vec::new(),
            config,
        }
    }

    /// Configuration of the tree.
    #[inline]
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Region covered by the tree.
    #[inline]
    pub fn region(&self) -> &Aabb<V> {
        &self.root().region
    }

    /// Root node of the tree.
    #[inline]
    pub fn root(&self) -> &OctreeNode<E, V> {
        self.get(ROOT)
    }

    /// Returns the node with the given identifier, or `None` if no live node has it.
    pub fn node(&self, id: NodeID) -> Option<&OctreeNode<E, V>> {
        let node = self.nodes.get(id as usize)?;
        // Released slots lose their parent, every live node but the root has one.
        (id == ROOT || node.parent.is_some()).then_some(node)
    }

    /// Number of live nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Depth of the deepest node.
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Number of elements stored in the tree.
    #[inline]
    pub fn count(&self) -> usize {
        self.root().len
    }

    /// Number of elements stored in the subtree rooted at the given node.
    #[inline]
    pub fn count_at(&self, id: NodeID) -> Option<usize> {
        self.node(id).map(OctreeNode::len)
    }

    /// Returns true if the tree holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns true if an element equal to `element` is stored anywhere in the tree.
    #[inline]
    pub fn contains(&self, element: &E) -> bool {
        self.find(ROOT, element).is_some()
    }

    /// Identifier of the node holding an element equal to `element`.
    #[inline]
    pub fn locate(&self, element: &E) -> Result<NodeID, OctreeError> {
        self.find(ROOT, element).ok_or(OctreeError::NotFound)
    }

    /// Iterates over every stored element once, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.nodes.iter().flat_map(|node| node.elements.iter())
    }

    /// Extends `dest` with a reference to every stored element.
    #[inline]
    pub fn collect_all<'a>(&'a self, dest: &mut impl Extend<&'a E>) {
        dest.extend(self.iter());
    }

    /// Removes every element and node, leaving an empty root over the same region.
    pub fn clear(&mut self) {
        let region = *self.region();
        self.nodes.clear();
        self.nodes.push(OctreeNode::new(region, None, 0));
        self.free.clear();
    }

    #[inline]
    fn get(&self, id: NodeID) -> &OctreeNode<E, V> {
        &self.nodes[id as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeID) -> &mut OctreeNode<E, V> {
        &mut self.nodes[id as usize]
    }

    #[inline]
    fn overlap(&self) -> V::Scalar {
        <V::Scalar as Scalar>::from_f64(self.config.overlap)
    }

    fn allocate(&mut self, region: Aabb<V>, parent: NodeID, depth: u32) -> NodeID {
        let node = OctreeNode::new(region, Some(parent), depth);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id as usize] = node;
                id
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as NodeID
            }
        }
    }

    // Subtree counts are cached, every change is applied to the whole ancestor chain.
    fn grow(&mut self, id: NodeID, n: usize) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.len += n;
            current = node.parent;
        }
    }

    fn shrink(&mut self, id: NodeID, n: usize) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.len -= n;
            current = node.parent;
        }
    }

    fn push_own(&mut self, id: NodeID, element: E) {
        let node = self.get_mut(id);
        if node.elements.contains(&element) {
            return;
        }
        node.elements.push(element);
        self.grow(id, 1);
    }

    fn take_own(&mut self, id: NodeID, element: &E) -> Option<E> {
        let node = self.get_mut(id);
        let index = node.elements.iter().position(|e| e == element)?;
        let taken = node.elements.swap_remove(index);
        self.shrink(id, 1);
        Some(taken)
    }

    fn find(&self, id: NodeID, element: &E) -> Option<NodeID> {
        let node = self.get(id);
        if node.len == 0 {
            return None;
        }
        if node.elements.contains(element) {
            return Some(id);
        }
        node.children()?
            .as_slice()
            .iter()
            .find_map(|&child| self.find(child, element))
    }
}

#[cfg(test)]
pub(crate) mod support {
    use super::*;
    use crate::Bounded;
    use glam::Vec3;

    #[derive(Bounded, Clone, Debug)]
    pub(crate) struct Body {
        pub id: u32,
        pub bounding_box: Aabb<Vec3>,
    }

    impl PartialEq for Body {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    pub(crate) fn body(id: u32, min: [f32; 3], max: [f32; 3]) -> Body {
        Body {
            id,
            bounding_box: Aabb::new(Vec3::from_array(min), Vec3::from_array(max)),
        }
    }

    pub(crate) fn cube(id: u32, min: f32, max: f32) -> Body {
        body(id, [min; 3], [max; 3])
    }

    pub(crate) fn unit_region() -> Aabb<Vec3> {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    pub(crate) fn small_config() -> OctreeConfig {
        OctreeConfig::default().with_thresholds(1, 2)
    }

    pub(crate) fn small_tree() -> Octree<Body, Vec3> {
        Octree::with_config(unit_region(), small_config()).unwrap()
    }

    pub(crate) fn ids(tree: &Octree<Body, Vec3>) -> Vec<u32> {
        let mut ids: Vec<_> = tree.iter().map(|body| body.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Checks containment, cached counts and parent links of every reachable node.
    pub(crate) fn assert_invariants<E, V>(tree: &Octree<E, V>)
    where
        E: Bounded<Vector = V> + PartialEq + std::fmt::Debug,
        V: InternalVector,
    {
        fn check<E, V>(tree: &Octree<E, V>, id: NodeID, visited: &mut usize) -> usize
        where
            E: Bounded<Vector = V> + PartialEq + std::fmt::Debug,
            V: InternalVector,
        {
            *visited += 1;
            let node = tree.node(id).expect("reachable node must be live");

            for (i, element) in node.elements.iter().enumerate() {
                assert!(
                    node.region.fully_contains(&element.bounding_box()),
                    "{element:?} escapes node {id}"
                );
                assert!(
                    !node.elements[i + 1..].contains(element),
                    "{element:?} stored twice in node {id}"
                );
            }

            let mut len = node.elements.len();
            if let Some(children) = node.children() {
                for &child in children.as_slice() {
                    let child_node = tree.node(child).expect("child must be live");
                    assert_eq!(child_node.parent, Some(id));
                    assert_eq!(child_node.depth, node.depth + 1);
                    assert!(node.region.fully_contains(&child_node.region));
                    len += check(tree, child, visited);
                }
            }
            assert_eq!(node.len, len, "cached count of node {id}");
            len
        }

        let mut visited = 0;
        let len = check(tree, ROOT, &mut visited);
        assert_eq!(len, tree.iter().count());
        assert_eq!(visited, tree.node_count());
        assert!(tree.depth() <= tree.config().max_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::support::*;
    use super::*;

    #[test]
    fn empty_tree() {
        let tree = Octree::<Body, _>::new(unit_region());

        assert!(tree.is_empty());
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().parent(), None);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.locate(&cube(0, 0.0, 0.5)), Err(OctreeError::NotFound));
        assert_invariants(&tree);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = OctreeConfig::default().with_thresholds(4, 4);

        assert!(matches!(
            Octree::<Body, _>::with_config(unit_region(), config),
            Err(OctreeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn membership_is_idempotent() {
        let mut tree = small_tree();
        let first = cube(1, 0.0, 0.5);
        let second = cube(2, -0.5, 0.0);
        tree.insert(first.clone()).unwrap();
        tree.insert(second.clone()).unwrap();

        for _ in 0..3 {
            assert!(tree.contains(&first));
            assert!(tree.contains(&second));
            assert!(!tree.contains(&cube(3, 0.0, 0.5)));
        }
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn overflow_elements_are_found() {
        let mut tree = small_tree();
        tree.insert(cube(1, 0.0, 0.5)).unwrap();
        let straddling = cube(2, -0.5, 1.0);
        let holder = tree.insert(straddling.clone()).unwrap();

        assert_eq!(holder, ROOT);
        assert!(!tree.root().is_leaf());
        assert!(tree.contains(&straddling));
        assert_eq!(tree.locate(&straddling), Ok(ROOT));
        assert_eq!(tree.root().elements().len(), 1);
    }

    #[test]
    fn collect_all_and_iter_agree() {
        let mut tree = small_tree();
        for (id, min) in [(1, -0.9), (2, -0.4), (3, 0.1), (4, 0.6)] {
            tree.insert(cube(id, min, min + 0.2)).unwrap();
        }

        let mut collected = Vec::new();
        tree.collect_all(&mut collected);
        let mut collected: Vec<_> = collected.into_iter().map(|body| body.id).collect();
        collected.sort_unstable();

        assert_eq!(collected, vec![1, 2, 3, 4]);
        assert_eq!(ids(&tree), collected);
        assert_eq!(tree.count_at(ROOT), Some(4));
        assert_invariants(&tree);
    }

    #[test]
    fn clear_keeps_the_region() {
        let mut tree = small_tree();
        for id in 0..8 {
            let min = -0.9 + id as f32 * 0.2;
            tree.insert(cube(id, min, min + 0.1)).unwrap();
        }
        assert!(tree.node_count() > 1);

        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(*tree.region(), unit_region());
        assert_eq!(tree.node(1).map(OctreeNode::len), None);
        assert_invariants(&tree);
    }
}
