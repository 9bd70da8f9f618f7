//! Error types for the mistree core library.
//!
//! Every failure surfaced by the tree engine is a [`MistreeError`]. Variants
//! carry the offending node or edge index so callers can diagnose bad input,
//! expose a stable [`MistreeErrorCode`] for logs, and group into a coarse
//! [`ErrorKind`]. None of these conditions are transient; nothing retries.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr, $kind:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the taxonomy bucket this code belongs to.
            #[must_use]
            pub const fn kind(self) -> ErrorKind {
                match self {
                    $(Self::$CodeVariant => ErrorKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }

            /// Return the taxonomy bucket for this error.
            #[must_use]
            pub const fn kind(&self) -> ErrorKind {
                self.code().kind()
            }
        }
    };
}

/// Coarse classification of [`MistreeError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The caller supplied inconsistent or out-of-range data.
    InvalidInput,
    /// The graph does not form a single connected component.
    NotSpanning,
    /// A structure that must be a tree contains a cycle or is disconnected.
    MalformedTree,
    /// A branch has zero length and its shape is undefined.
    DegenerateBranch,
    /// A weight lookup referenced a pair of nodes that are not adjacent.
    Lookup,
    /// A pipeline stage ran before the stage it depends on.
    Precondition,
}

/// Errors produced by the mistree tree engine.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MistreeError {
    /// A graph must contain at least one node.
    #[error("graph must contain at least one node")]
    EmptyGraph,
    /// An edge or argument referenced a node id outside `[0, node_count)`.
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    InvalidNodeId {
        /// The offending node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge connected a node to itself.
    #[error("edge {edge} is a self-loop on node {node}")]
    SelfLoop {
        /// Index of the offending edge.
        edge: usize,
        /// Node on both ends of the edge.
        node: usize,
    },
    /// Two parallel arrays disagreed in length.
    #[error("{what} has length {got} but {expected} was expected")]
    LengthMismatch {
        /// Name of the array with the wrong length.
        what: &'static str,
        /// Length implied by the other inputs.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },
    /// An edge weight was negative.
    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight {
        /// Index of the offending edge.
        edge: usize,
        /// The negative weight.
        weight: f64,
    },
    /// An edge weight was NaN or infinite.
    #[error("edge {edge} has a non-finite weight")]
    NonFiniteWeight {
        /// Index of the offending edge.
        edge: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("coordinate {axis} of point {point} is not finite")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        point: usize,
        /// Axis label of the offending coordinate.
        axis: &'static str,
    },
    /// A spherical angle fell outside its valid range.
    #[error("{angle} of point {point} is {value}, outside [0, {max}]")]
    AngleOutOfRange {
        /// Index of the offending point.
        point: usize,
        /// Name of the angle (`phi` or `theta`).
        angle: &'static str,
        /// Value supplied by the caller.
        value: f64,
        /// Upper bound for the angle in the requested units.
        max: f64,
    },
    /// A supplied degree did not match the number of incident edges.
    #[error("node {node} has degree {got} but {expected} edges are incident to it")]
    DegreeMismatch {
        /// Node whose degree disagrees with the edge list.
        node: usize,
        /// Incident edge count derived from the edge list.
        expected: usize,
        /// Degree supplied by the caller.
        got: usize,
    },
    /// A spatial grid was requested without point coordinates.
    #[error("grid subdivisions require point coordinates")]
    MissingCoordinates,
    /// The grid must be divided into at least one cell per axis.
    #[error("grid_subdivisions must be at least 1 (got {got})")]
    InvalidGridSubdivisions {
        /// The invalid subdivision count.
        got: usize,
    },
    /// Percolation walks need at least one step.
    #[error("percolation walks need at least one step (got {got})")]
    InvalidPercolationSteps {
        /// The invalid step count.
        got: usize,
    },
    /// The graph splits into more than one connected group.
    #[error("graph is not spanning: found {groups} connected groups")]
    NotSpanning {
        /// Number of connected groups found.
        groups: usize,
    },
    /// Branch walking did not terminate within the edge budget.
    #[error("edge {edge} does not belong to a tree (walk exceeded {budget} steps or revisited an edge)")]
    MalformedTree {
        /// Edge at which the walk failed.
        edge: usize,
        /// Maximum number of steps a walk may take.
        budget: usize,
    },
    /// Following parent links from a node never reached the root.
    #[error("parent chain from node {node} contains a cycle")]
    CycleDetected {
        /// Node whose root path failed.
        node: usize,
    },
    /// Two nodes share no ancestor in the rooted tree.
    #[error("nodes {left} and {right} have no common ancestor")]
    NoCommonAncestor {
        /// First node of the query.
        left: usize,
        /// Second node of the query.
        right: usize,
    },
    /// Leaf peeling found a disconnected or cyclic edge set.
    #[error("leaf peeling stalled with {remaining} edges left at edge {edge}")]
    PeelingDisconnected {
        /// Edges still active when peeling failed.
        remaining: usize,
        /// An edge from the stalled set.
        edge: usize,
    },
    /// A branch has zero summed weight.
    #[error("branch {branch} has zero length")]
    DegenerateBranch {
        /// Index of the offending branch.
        branch: usize,
    },
    /// A path stepped between two nodes that share no edge.
    #[error("no edge between nodes {from} and {to}")]
    MissingEdge {
        /// Start of the missing step.
        from: usize,
        /// End of the missing step.
        to: usize,
    },
    /// A pipeline stage ran before its prerequisite.
    #[error("{stage} requires {requires} to be computed first")]
    Precondition {
        /// Stage that was requested.
        stage: &'static str,
        /// Stage that must run before it.
        requires: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`MistreeError`] variants.
    enum MistreeErrorCode for MistreeError {
        /// A graph must contain at least one node.
        EmptyGraph => EmptyGraph => "MISTREE_EMPTY_GRAPH", InvalidInput,
        /// A node id was out of range.
        InvalidNodeId => InvalidNodeId { .. } => "MISTREE_INVALID_NODE_ID", InvalidInput,
        /// An edge connected a node to itself.
        SelfLoop => SelfLoop { .. } => "MISTREE_SELF_LOOP", InvalidInput,
        /// Two parallel arrays disagreed in length.
        LengthMismatch => LengthMismatch { .. } => "MISTREE_LENGTH_MISMATCH", InvalidInput,
        /// An edge weight was negative.
        NegativeWeight => NegativeWeight { .. } => "MISTREE_NEGATIVE_WEIGHT", InvalidInput,
        /// An edge weight was not finite.
        NonFiniteWeight => NonFiniteWeight { .. } => "MISTREE_NON_FINITE_WEIGHT", InvalidInput,
        /// A coordinate was not finite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "MISTREE_NON_FINITE_COORDINATE", InvalidInput,
        /// A spherical angle was out of range.
        AngleOutOfRange => AngleOutOfRange { .. } => "MISTREE_ANGLE_OUT_OF_RANGE", InvalidInput,
        /// A supplied degree disagreed with the edge list.
        DegreeMismatch => DegreeMismatch { .. } => "MISTREE_DEGREE_MISMATCH", InvalidInput,
        /// A spatial grid was requested without coordinates.
        MissingCoordinates => MissingCoordinates => "MISTREE_MISSING_COORDINATES", InvalidInput,
        /// The grid subdivision count was zero.
        InvalidGridSubdivisions => InvalidGridSubdivisions { .. } => "MISTREE_INVALID_GRID_SUBDIVISIONS", InvalidInput,
        /// The percolation step count was zero.
        InvalidPercolationSteps => InvalidPercolationSteps { .. } => "MISTREE_INVALID_PERCOLATION_STEPS", InvalidInput,
        /// The graph is not a single connected group.
        NotSpanning => NotSpanning { .. } => "MISTREE_NOT_SPANNING", NotSpanning,
        /// Branch walking found a cycle.
        MalformedTree => MalformedTree { .. } => "MISTREE_MALFORMED_TREE", MalformedTree,
        /// A parent chain contained a cycle.
        CycleDetected => CycleDetected { .. } => "MISTREE_CYCLE_DETECTED", MalformedTree,
        /// Two nodes share no ancestor.
        NoCommonAncestor => NoCommonAncestor { .. } => "MISTREE_NO_COMMON_ANCESTOR", MalformedTree,
        /// Leaf peeling stalled.
        PeelingDisconnected => PeelingDisconnected { .. } => "MISTREE_PEELING_DISCONNECTED", MalformedTree,
        /// A branch had zero length.
        DegenerateBranch => DegenerateBranch { .. } => "MISTREE_DEGENERATE_BRANCH", DegenerateBranch,
        /// A path step had no edge.
        MissingEdge => MissingEdge { .. } => "MISTREE_MISSING_EDGE", Lookup,
        /// A stage ran before its prerequisite.
        Precondition => Precondition { .. } => "MISTREE_PRECONDITION", Precondition,
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, MistreeError>;
