use rand::Rng;
use rand::seq::SliceRandom;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
const DEFAULT_TREE_COUNT: usize = 100;
const MAX_SAMPLE_SIZE: usize = 256;

/// Isolation forest over a single feature.
#[derive(Debug)]
pub(crate) struct IsolationForest {
    trees: Vec<Node>,
    sample_size: usize,
}

#[derive(Debug)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl IsolationForest {
    pub(crate) fn fit<R: Rng>(values: &[f64], rng: &mut R) -> Self {
        Self::fit_with_trees(values, DEFAULT_TREE_COUNT, rng)
    }

    pub(crate) fn fit_with_trees<R: Rng>(
        values: &[f64],
        tree_count: usize,
        rng: &mut R,
    ) -> Self {
        let sample_size = values.len().min(MAX_SAMPLE_SIZE);
        let max_depth = (sample_size.max(2) as f64).log2().ceil() as usize;

        let trees = (0..tree_count)
            .map(|_| {
                let mut sample: Vec<f64> = values
                    .choose_multiple(rng, sample_size)
                    .copied()
                    .collect();
                build_node(&mut sample, 0, max_depth, rng)
            })
            .collect();

        Self { trees, sample_size }
    }

    /// Anomaly score in (0, 1]; higher means easier to isolate.
    pub(crate) fn score(&self, value: f64) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }

        let total: f64 = self
            .trees
            .iter()
            .map(|tree| path_length(tree, value, 0))
            .sum();
        let mean_depth = total / self.trees.len() as f64;
        let normalizer = average_path_length(self.sample_size);
        if normalizer <= 0.0 {
            return 0.5;
        }

        2f64.powf(-mean_depth / normalizer)
    }
}

fn build_node<R: Rng>(
    values: &mut [f64],
    depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Node {
    if depth >= max_depth || values.len() <= 1 {
        return Node::Leaf { size: values.len() };
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(*value), hi.max(*value))
        });
    if max <= min {
        return Node::Leaf { size: values.len() };
    }

    let threshold = rng.gen_range(min..max);
    let split_at = partition(values, threshold);
    let (left, right) = values.split_at_mut(split_at);

    Node::Split {
        threshold,
        left: Box::new(build_node(left, depth + 1, max_depth, rng)),
        right: Box::new(build_node(right, depth + 1, max_depth, rng)),
    }
}

/// Moves values `<= threshold` to the front and returns their count.
fn partition(values: &mut [f64], threshold: f64) -> usize {
    let mut boundary = 0;
    for index in 0..values.len() {
        if values[index] <= threshold {
            values.swap(boundary, index);
            boundary += 1;
        }
    }
    boundary
}

fn path_length(node: &Node, value: f64, depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Split {
            threshold,
            left,
            right,
        } => {
            if value <= *threshold {
                path_length(left, value, depth + 1)
            } else {
                path_length(right, value, depth + 1)
            }
        }
    }
}

/// Average path length of an unsuccessful binary search tree lookup over `n` points.
pub(crate) fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Percentile with linear interpolation between closest ranks. `sorted` must be ascending.
pub(crate) fn percentile(sorted: &[f64], percent: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let rank = (percent.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
