//! Binary CART classifier with Gini impurity.
//!
//! Nodes live in a flat arena; index 0 is the root. Samples with
//! `x[feature] <= threshold` go left.

use serde::{Deserialize, Serialize};

use crate::error::CreditSimError;
use crate::scoring::profile::{FEATURE_COUNT, FEATURE_NAMES};
use crate::CreditSimResult;

/// Splits that improve impurity by less than this are not taken.
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

/// Growth limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        samples: usize,
        defaults: usize,
    },
    Leaf {
        samples: usize,
        defaults: usize,
    },
}

impl Node {
    fn counts(&self) -> (usize, usize) {
        match self {
            Node::Split { samples, defaults, .. } | Node::Leaf { samples, defaults } => {
                (*samples, *defaults)
            }
        }
    }
}

/// Fitted tree. Immutable after [`DecisionTree::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    params: TreeParams,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    weighted_gini: f64,
}

/// Gini impurity of a two-class node.
pub fn gini(defaults: usize, samples: usize) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let p = defaults as f64 / samples as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

impl DecisionTree {
    pub fn fit(
        x: &[[f64; FEATURE_COUNT]],
        y: &[bool],
        params: TreeParams,
    ) -> CreditSimResult<Self> {
        if x.is_empty() {
            return Err(CreditSimError::InsufficientData(
                "Decision tree requires at least one training sample".into(),
            ));
        }
        if x.len() != y.len() {
            return Err(CreditSimError::invalid(
                "labels",
                format!("{} feature rows but {} labels", x.len(), y.len()),
            ));
        }
        if params.min_samples_leaf == 0 || params.min_samples_split < 2 {
            return Err(CreditSimError::invalid(
                "params",
                "min_samples_leaf must be >= 1 and min_samples_split >= 2",
            ));
        }

        let mut tree = DecisionTree {
            nodes: Vec::new(),
            params,
        };
        let indices: Vec<usize> = (0..x.len()).collect();
        tree.grow(x, y, &indices, 0);
        Ok(tree)
    }

    fn grow(&mut self, x: &[[f64; FEATURE_COUNT]], y: &[bool], indices: &[usize], depth: usize) -> usize {
        let samples = indices.len();
        let defaults = indices.iter().filter(|&&i| y[i]).count();
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { samples, defaults });

        let pure = defaults == 0 || defaults == samples;
        if pure || depth >= self.params.max_depth || samples < self.params.min_samples_split {
            return id;
        }

        let Some(split) = self.best_split(x, y, indices) else {
            return id;
        };
        if gini(defaults, samples) - split.weighted_gini < MIN_IMPURITY_DECREASE {
            return id;
        }

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| x[i][split.feature] <= split.threshold);

        let left = self.grow(x, y, &left_idx, depth + 1);
        let right = self.grow(x, y, &right_idx, depth + 1);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
            samples,
            defaults,
        };
        id
    }

    /// Exhaustive search over every feature and every boundary between
    /// distinct sorted values. Ties keep the earliest candidate.
    fn best_split(
        &self,
        x: &[[f64; FEATURE_COUNT]],
        y: &[bool],
        indices: &[usize],
    ) -> Option<SplitCandidate> {
        let n = indices.len();
        let total_defaults = indices.iter().filter(|&&i| y[i]).count();
        let min_leaf = self.params.min_samples_leaf;
        let mut best: Option<SplitCandidate> = None;
        let mut order = indices.to_vec();

        for feature in 0..FEATURE_COUNT {
            order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

            let mut left_defaults = 0;
            for k in 1..n {
                if y[order[k - 1]] {
                    left_defaults += 1;
                }
                let lo = x[order[k - 1]][feature];
                let hi = x[order[k]][feature];
                if lo >= hi || k < min_leaf || n - k < min_leaf {
                    continue;
                }

                let right_defaults = total_defaults - left_defaults;
                let weighted = (k as f64 * gini(left_defaults, k)
                    + (n - k) as f64 * gini(right_defaults, n - k))
                    / n as f64;

                if best.map_or(true, |b| weighted < b.weighted_gini) {
                    let mut threshold = lo + (hi - lo) / 2.0;
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        weighted_gini: weighted,
                    });
                }
            }
        }
        best
    }

    /// Fraction of defaulted training samples in the leaf `features` reaches.
    pub fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    id = if features[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf { samples, defaults } => {
                    return if *samples == 0 {
                        0.0
                    } else {
                        *defaults as f64 / *samples as f64
                    };
                }
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn params(&self) -> TreeParams {
        self.params
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Depth of the deepest leaf; a lone root leaf has depth 0.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
                Node::Leaf { .. } => 0,
            }
        }
        walk(&self.nodes, 0)
    }

    /// Flattened, human-readable view of the tree.
    pub fn describe(&self) -> Vec<NodeSummary> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(id, node)| {
                let (samples, defaults) = node.counts();
                let default_probability = if samples == 0 {
                    0.0
                } else {
                    defaults as f64 / samples as f64
                };
                let (rule, left, right) = match node {
                    Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                        ..
                    } => (
                        Some(format!("{} <= {:.2}", FEATURE_NAMES[*feature], threshold)),
                        Some(*left),
                        Some(*right),
                    ),
                    Node::Leaf { .. } => (None, None, None),
                };
                NodeSummary {
                    id,
                    rule,
                    left,
                    right,
                    samples,
                    default_probability,
                    gini: gini(defaults, samples),
                }
            })
            .collect()
    }
}

/// One row of [`DecisionTree::describe`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: usize,
    /// Split rule, `None` for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<usize>,
    pub samples: usize,
    pub default_probability: f64,
    pub gini: f64,
}
