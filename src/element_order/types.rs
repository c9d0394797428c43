//! Element ordering core types
//!
//! Options, strategies and result types for ordering the elements
//! (speech balloons, faces, ...) inside a single panel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::BBox;

// ============================================================
// Constants
// ============================================================

/// Largest element count solved by exhaustive permutation search
pub const DEFAULT_MAX_EXHAUSTIVE: usize = 8;

/// Largest element count solved exactly (Held-Karp above the exhaustive cap)
pub const DEFAULT_MAX_EXACT: usize = 15;

/// Hard ceiling for exhaustive search (9! interior permutations)
pub const MAX_EXHAUSTIVE_CLAMP: usize = 10;

/// Hard ceiling for Held-Karp (memory grows as n * 2^n)
pub const MAX_EXACT_CLAMP: usize = 18;

// ============================================================
// Error Types
// ============================================================

/// Element ordering error types
#[derive(Debug, Error)]
pub enum ElementOrderError {
    #[error("Too many elements for exact ordering: {count} (limit {limit})")]
    TooManyElements { count: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, ElementOrderError>;

// ============================================================
// Strategy
// ============================================================

/// Path search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Every permutation of the interior elements, lexicographic order
    Exhaustive,
    /// Dynamic program over subsets; same optimum as exhaustive
    HeldKarp,
    /// Greedy nearest neighbour from the start element
    NearestNeighbor,
}

impl Strategy {
    /// Whether the strategy always finds the shortest path
    pub fn is_exact(&self) -> bool {
        !matches!(self, Strategy::NearestNeighbor)
    }

    /// Largest element count the strategy accepts, `None` when unbounded
    pub fn max_elements(&self) -> Option<usize> {
        match self {
            Strategy::Exhaustive => Some(MAX_EXHAUSTIVE_CLAMP),
            Strategy::HeldKarp => Some(MAX_EXACT_CLAMP),
            Strategy::NearestNeighbor => None,
        }
    }

    /// Whether `count` elements are within the strategy's hard ceiling
    pub fn supports(&self, count: usize) -> bool {
        self.max_elements().is_none_or(|max| count <= max)
    }
}

/// What to do when a panel holds more elements than `max_exact`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fall back to the nearest-neighbour heuristic
    #[default]
    Fallback,
    /// Fail with [`ElementOrderError::TooManyElements`]
    Reject,
}

// ============================================================
// Options
// ============================================================

/// Element ordering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementOrderOptions {
    /// Largest element count for exhaustive search
    pub max_exhaustive: usize,
    /// Largest element count for any exact strategy
    pub max_exact: usize,
    /// Behaviour above `max_exact`
    pub overflow: OverflowPolicy,
    /// Force a strategy regardless of element count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
}

impl Default for ElementOrderOptions {
    fn default() -> Self {
        Self {
            max_exhaustive: DEFAULT_MAX_EXHAUSTIVE,
            max_exact: DEFAULT_MAX_EXACT,
            overflow: OverflowPolicy::Fallback,
            strategy: None,
        }
    }
}

impl ElementOrderOptions {
    /// Create a new options builder
    pub fn builder() -> ElementOrderOptionsBuilder {
        ElementOrderOptionsBuilder::default()
    }

    /// Options that fail instead of approximating
    pub fn strict() -> Self {
        Self {
            overflow: OverflowPolicy::Reject,
            ..Default::default()
        }
    }

    /// Pick the strategy for `count` elements.
    ///
    /// A forced strategy is honoured only while `count` is within its hard
    /// ceiling; past it, selection goes by count and the overflow policy.
    /// The caps never exceed [`MAX_EXHAUSTIVE_CLAMP`] and [`MAX_EXACT_CLAMP`].
    pub fn select_strategy(&self, count: usize) -> Result<Strategy> {
        if let Some(strategy) = self.strategy.filter(|s| s.supports(count)) {
            return Ok(strategy);
        }
        if count <= self.max_exhaustive.min(MAX_EXHAUSTIVE_CLAMP) {
            return Ok(Strategy::Exhaustive);
        }
        let max_exact = self.max_exact.min(MAX_EXACT_CLAMP);
        if count <= max_exact {
            return Ok(Strategy::HeldKarp);
        }
        match self.overflow {
            OverflowPolicy::Fallback => Ok(Strategy::NearestNeighbor),
            OverflowPolicy::Reject => Err(ElementOrderError::TooManyElements {
                count,
                limit: max_exact,
            }),
        }
    }
}

/// Builder for ElementOrderOptions
#[derive(Debug, Default)]
pub struct ElementOrderOptionsBuilder {
    options: ElementOrderOptions,
}

impl ElementOrderOptionsBuilder {
    /// Set the exhaustive search cap (clamped to 1-10)
    #[must_use]
    pub fn max_exhaustive(mut self, count: usize) -> Self {
        self.options.max_exhaustive = count.clamp(1, MAX_EXHAUSTIVE_CLAMP);
        self
    }

    /// Set the exact search cap (clamped to 1-18)
    #[must_use]
    pub fn max_exact(mut self, count: usize) -> Self {
        self.options.max_exact = count.clamp(1, MAX_EXACT_CLAMP);
        self
    }

    /// Set the overflow policy
    #[must_use]
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.options.overflow = policy;
        self
    }

    /// Force a strategy
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.options.strategy = Some(strategy);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> ElementOrderOptions {
        self.options
    }
}

// ============================================================
// Result
// ============================================================

/// Ordered elements of one panel
#[derive(Debug, Clone, Serialize)]
pub struct ElementOrder {
    /// Elements in reading order
    pub elements: Vec<BBox>,
    /// Indices into the input slice, in reading order
    pub indices: Vec<usize>,
    /// Strategy that produced the order
    pub strategy: Strategy,
    /// Path length from the start element to the bottom-left anchor
    pub length: f64,
}

impl ElementOrder {
    pub(crate) fn empty(strategy: Strategy) -> Self {
        Self {
            elements: Vec::new(),
            indices: Vec::new(),
            strategy,
            length: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_boxes(self) -> Vec<BBox> {
        self.elements
    }
}
