//! # Loose Octree
//!
//! Loose Octree is a crate providing a dynamic spatial index of axis-aligned bounding boxes in
//! Rust, meant to serve as the broad phase of a collision detection pipeline.
//!
//! ## Goals
//!
//! The main goal of this crate is to keep objects that move every frame indexed cheaply, and to
//! enumerate the pairs of objects close enough to deserve a finer overlap test.
//! Thus it does not perform narrow phase collision detection, ray casts or distance queries and
//! instead only focuses on the bookkeeping of the boxes.
//!
//! The tree covers a fixed region. Each leaf splits into 8 octants when it holds too many
//! elements, and these octants are slightly enlarged so that they overlap their siblings. Small
//! objects moving across an octant boundary therefore rarely need to leave their node.
//! Subtrees that become nearly empty after removals are merged back into a single leaf.
//!
//! Pair enumeration can walk the tree in parallel on the CPU thanks to
//! [rayon](https://github.com/rayon-rs/rayon). Enable the "parallel" feature to access
//! [`Octree::par_visit_pairs`].
//!
//! # Using Loose Octree
//!
//! ## Implementing the [`Bounded`](bounded::Bounded) trait
//!
//! #### Deriving:
//!
//! Used in most cases, when the type has a field named `bounding_box`:
//!
//! ```
//! # use loose_octree::prelude::*;
//! # use glam::Vec3;
//! #
//! #[derive(Bounded)]
//! struct Body {
//!     id: u32,
//!     bounding_box: Aabb<Vec3>,
//! //  ...
//! }
//! ```
//! #### Manual implementation:
//!
//! Used when the type cannot directly provide a [bounding box](bounded::Bounded::bounding_box).
//!
//! ```
//! # use loose_octree::prelude::*;
//! # use glam::Vec3;
//! #
//! struct Body {
//!     position: Vec3,
//!     radius: f32,
//! //  ...
//! }
//!
//! impl Bounded for Body {
//!     type Vector = Vec3;
//!
//!     fn bounding_box(&self) -> Aabb<Vec3> {
//!         Aabb::from_center_half_extents(self.position, Vec3::splat(self.radius))
//!     }
//! }
//! ```
//! ## Setting up the tree
//!
//! Create an [`Octree`] covering the region of the simulation and insert the objects into it.
//! Elements are matched with [`PartialEq`], so objects that move should compare equal
//! independently of their bounding box.
//!
//! ```
//! # use loose_octree::prelude::*;
//! # use glam::Vec3;
//! #
//! # #[derive(Bounded, Debug)]
//! # struct Body {
//! #     id: u32,
//! #     bounding_box: Aabb<Vec3>,
//! # }
//! # impl PartialEq for Body {
//! #     fn eq(&self, other: &Self) -> bool {
//! #         self.id == other.id
//! #     }
//! # }
//! let region = Aabb::new(Vec3::splat(-100.0), Vec3::splat(100.0));
//! let mut octree = Octree::new(region);
//!
//! octree.insert(Body { id: 0, bounding_box: Aabb::new(Vec3::ZERO, Vec3::ONE) }).unwrap();
//! octree.insert(Body { id: 1, bounding_box: Aabb::new(Vec3::splat(0.5), Vec3::splat(2.0)) }).unwrap();
//!
//! // The object moved: its node is updated in place.
//! let moved = Body { id: 1, bounding_box: Aabb::new(Vec3::splat(3.0), Vec3::splat(4.0)) };
//! if let Err(rejected) = octree.relocate(moved) {
//!     // Too far from its previous node, insert it from the root again.
//!     octree.insert(rejected.into_inner()).unwrap();
//! }
//! ```
//!
//! ## Finding the overlapping pairs
//!
//! Finally, use the [`visit_pairs`](Octree::visit_pairs) method of [`Octree`].
//! It calls the given closure for every pair of objects that may overlap.
//!
//! ```
//! # use loose_octree::prelude::*;
//! # use glam::Vec3;
//! #
//! # let mut octree = Octree::new(Aabb::new(Vec3::splat(-100.0), Vec3::splat(100.0)));
//! # octree.insert(Aabb::new(Vec3::ZERO, Vec3::ONE)).unwrap();
//! # octree.insert(Aabb::new(Vec3::splat(0.5), Vec3::splat(2.0))).unwrap();
//! let mut contacts = Vec::new();
//!
//! octree.visit_pairs(|a, b| {
//!     if a.overlaps(b) {
//!         contacts.push((*a, *b));
//!     }
//! });
//!
//! assert_eq!(contacts.len(), 1);
//! ```

#![warn(missing_docs)]

extern crate self as loose_octree;

/// Axis-aligned bounding boxes.
pub mod aabb;

/// Trait to implement on types stored in the octree.
pub mod bounded;

/// Construction parameters of the octree.
pub mod config;

/// Errors returned by the octree.
pub mod error;

/// The octree and its nodes.
pub mod tree;

/// Internal representation of vectors used for geometric computations.
pub mod vector;

pub use aabb::Aabb;
pub use bounded::Bounded;
pub use config::OctreeConfig;
pub use error::{OctreeError, Rejected};
pub use tree::{Node, NodeID, Octree, OctreeNode, Orthant, ROOT};

/// Derive macro for types stored in the octree.
pub mod loose_octree_derive {
    pub use loose_octree_derive::Bounded;
}

pub use crate::loose_octree_derive::Bounded;

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::aabb::Aabb;
    pub use crate::bounded::Bounded;
    pub use crate::config::OctreeConfig;
    pub use crate::error::{OctreeError, Rejected};
    pub use crate::loose_octree_derive::*;
    pub use crate::tree::{NodeID, Octree, ROOT};
}
