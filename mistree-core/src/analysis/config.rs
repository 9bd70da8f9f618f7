//! Builder for [`AnalysisConfig`].
//!
//! The builder collects raw inputs and [`AnalysisConfigBuilder::build`]
//! validates them once, so an [`AnalysisConfig`] is always usable.

use std::num::NonZeroUsize;

use crate::error::{MistreeError, Result};

/// Validated settings for an [`crate::MstAnalysis`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnalysisConfig {
    root: usize,
    validate: bool,
    grid_subdivisions: Option<NonZeroUsize>,
    include_index: bool,
    angular_edge_lengths: bool,
}

impl AnalysisConfig {
    /// Returns a builder populated with the defaults.
    #[must_use]
    pub const fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Node the tree is rooted at.
    #[must_use]
    #[rustfmt::skip]
    pub const fn root(&self) -> usize { self.root }

    /// Whether tree building checks the graph is a single group first.
    #[must_use]
    #[rustfmt::skip]
    pub const fn validate(&self) -> bool { self.validate }

    /// Grid cells per axis for branch seeding, when a grid is used.
    #[must_use]
    #[rustfmt::skip]
    pub const fn grid_subdivisions(&self) -> Option<NonZeroUsize> { self.grid_subdivisions }

    /// Whether summaries carry the edge and branch index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn include_index(&self) -> bool { self.include_index }

    /// Whether unit-sphere chord lengths are converted to angles.
    #[must_use]
    #[rustfmt::skip]
    pub const fn angular_edge_lengths(&self) -> bool { self.angular_edge_lengths }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            root: 0,
            validate: true,
            grid_subdivisions: None,
            include_index: false,
            angular_edge_lengths: false,
        }
    }
}

/// Configures and validates an [`AnalysisConfig`].
///
/// # Examples
/// ```
/// use mistree_core::AnalysisConfigBuilder;
///
/// let config = AnalysisConfigBuilder::new()
///     .with_root(3)
///     .with_grid_subdivisions(4)
///     .with_include_index(true)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(config.root(), 3);
/// assert_eq!(config.grid_subdivisions().map(|cells| cells.get()), Some(4));
/// assert!(config.validate());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnalysisConfigBuilder {
    root: usize,
    skip_validation: bool,
    grid_subdivisions: Option<usize>,
    include_index: bool,
    angular_edge_lengths: bool,
}

impl AnalysisConfigBuilder {
    /// Creates a builder populated with the defaults: root 0, validation on,
    /// no grid and no index in summaries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: 0,
            skip_validation: false,
            grid_subdivisions: None,
            include_index: false,
            angular_edge_lengths: false,
        }
    }

    /// Roots the tree at `root`.
    #[must_use]
    pub const fn with_root(mut self, root: usize) -> Self {
        self.root = root;
        self
    }

    /// Turns the spanning check before tree building on or off.
    #[must_use]
    pub const fn with_validation(mut self, validate: bool) -> Self {
        self.skip_validation = !validate;
        self
    }

    /// Seeds branch walks cell by cell over a grid with `cells` intervals per
    /// axis.
    #[must_use]
    pub const fn with_grid_subdivisions(mut self, cells: usize) -> Self {
        self.grid_subdivisions = Some(cells);
        self
    }

    /// Includes the edge and branch index in summaries.
    #[must_use]
    pub const fn with_include_index(mut self, include: bool) -> Self {
        self.include_index = include;
        self
    }

    /// Converts unit-sphere chord lengths to angles with `2·asin(d / 2)`.
    #[must_use]
    pub const fn with_angular_edge_lengths(mut self, angular: bool) -> Self {
        self.angular_edge_lengths = angular;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    /// Returns [`MistreeError::InvalidGridSubdivisions`] when a grid with zero
    /// cells per axis was requested.
    pub fn build(self) -> Result<AnalysisConfig> {
        let grid_subdivisions = self
            .grid_subdivisions
            .map(|cells| NonZeroUsize::new(cells).ok_or(MistreeError::InvalidGridSubdivisions { got: cells }))
            .transpose()?;
        Ok(AnalysisConfig {
            root: self.root,
            validate: !self.skip_validation,
            grid_subdivisions,
            include_index: self.include_index,
            angular_edge_lengths: self.angular_edge_lengths,
        })
    }
}
