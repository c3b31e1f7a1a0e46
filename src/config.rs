use crate::error::OctreeError;

/// Default value of [`OctreeConfig::min_threshold`].
pub const DEFAULT_MIN_THRESHOLD: usize = 2;
/// Default value of [`OctreeConfig::max_threshold`].
pub const DEFAULT_MAX_THRESHOLD: usize = 10;
/// Default value of [`OctreeConfig::overlap`].
pub const DEFAULT_OVERLAP: f64 = 0.1;
/// Default value of [`OctreeConfig::max_depth`].
pub const DEFAULT_MAX_DEPTH: u32 = 16;

/// Parameters shared by every node of an [`Octree`](crate::Octree).
///
/// ```
/// # use loose_octree::OctreeConfig;
/// let config = OctreeConfig::default()
///     .with_thresholds(1, 4)
///     .with_overlap(0.25);
///
/// assert!(config.validate().is_ok());
/// assert!(OctreeConfig::default().with_overlap(1.5).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctreeConfig {
    /// Subtree element count at or below which an internal node merges its children back on
    /// removal.
    pub min_threshold: usize,
    /// Element count that makes a leaf split on insertion: a leaf splits when it would hold
    /// `max_threshold` elements.
    pub max_threshold: usize,
    /// Fraction by which each octant is expanded toward its siblings, in `[0, 1)`.
    pub overlap: f64,
    /// Depth at which leaves stop splitting and keep every element they receive.
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            min_threshold: DEFAULT_MIN_THRESHOLD,
            max_threshold: DEFAULT_MAX_THRESHOLD,
            overlap: DEFAULT_OVERLAP,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl OctreeConfig {
    /// Sets the merge and split thresholds.
    #[inline]
    pub fn with_thresholds(mut self, min_threshold: usize, max_threshold: usize) -> Self {
        self.min_threshold = min_threshold;
        self.max_threshold = max_threshold;
        self
    }

    /// Sets the octant overlap fraction.
    #[inline]
    pub fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Sets the maximum depth of the tree.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks that the configuration describes a usable tree.
    pub fn validate(&self) -> Result<(), OctreeError> {
        if self.max_threshold < 2 {
            return Err(OctreeError::InvalidConfig("max_threshold must be at least 2"));
        }
        if self.min_threshold >= self.max_threshold {
            return Err(OctreeError::InvalidConfig(
                "min_threshold must be lower than max_threshold",
            ));
        }
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(OctreeError::InvalidConfig("overlap must be in [0, 1)"));
        }
        if self.max_depth == 0 {
            return Err(OctreeError::InvalidConfig("max_depth must be at least 1"));
        }

        Ok(())
    }
}
