use rayon::prelude::*;

use super::{NodeID, Octree, ROOT};
use crate::{bounded::Bounded, vector::InternalVector};

impl<E, V> Octree<E, V>
where
    E: Bounded<Vector = V> + PartialEq + Sync,
    V: InternalVector + Sync,
{
    /// Same as [`visit_pairs`](Octree::visit_pairs), walking the children of every internal
    /// node in parallel using [rayon](https://github.com/rayon-rs/rayon).
    ///
    /// Pairs are visited in no particular order.
    pub fn par_visit_pairs<'a, F>(&'a self, f: F)
    where
        F: Fn(&'a E, &'a E) + Sync,
    {
        let _span = tracing::trace_span!("par_visit_pairs", elements = self.count()).entered();
        self.par_visit_subtree(ROOT, &f);
    }

    fn par_visit_subtree<'a, F>(&'a self, id: NodeID, f: &F)
    where
        F: Fn(&'a E, &'a E) + Sync,
    {
        self.visit_local(id, &mut |a, b| f(a, b));
        if let Some(children) = self.get(id).children() {
            children
                .as_slice()
                .par_iter()
                .for_each(|&child| self.par_visit_subtree(child, f));
        }
    }
}
