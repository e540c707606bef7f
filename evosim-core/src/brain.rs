use crate::SimError;
use evosim_config::NetworkTopology;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-topology feed-forward decision network: input → ReLU hidden →
/// ReLU hidden → softmax over the action set. Weight matrices are stored
/// row-major; the flattening order (W1 rows, b1, W2 rows, b2, W3 rows, b3)
/// is the contract the genetic operators cut against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionNetwork {
    input_nodes: usize,
    hidden1_nodes: usize,
    hidden2_nodes: usize,
    output_nodes: usize,
    w1: Vec<f32>,
    b1: Vec<f32>,
    w2: Vec<f32>,
    b2: Vec<f32>,
    w3: Vec<f32>,
    b3: Vec<f32>,
}

impl DecisionNetwork {
    pub fn random<R: Rng + ?Sized>(topology: &NetworkTopology, rng: &mut R) -> Self {
        let scale = topology.init_weight_scale;
        let mut init = |len: usize| -> Vec<f32> {
            if scale > 0.0 {
                (0..len).map(|_| rng.random_range(-scale..scale)).collect()
            } else {
                vec![0.0; len]
            }
        };
        Self {
            input_nodes: topology.input_nodes,
            hidden1_nodes: topology.hidden1_nodes,
            hidden2_nodes: topology.hidden2_nodes,
            output_nodes: topology.output_nodes,
            w1: init(topology.hidden1_nodes * topology.input_nodes),
            b1: vec![0.0; topology.hidden1_nodes],
            w2: init(topology.hidden2_nodes * topology.hidden1_nodes),
            b2: vec![0.0; topology.hidden2_nodes],
            w3: init(topology.output_nodes * topology.hidden2_nodes),
            b3: vec![0.0; topology.output_nodes],
        }
    }

    pub fn input_width(&self) -> usize {
        self.input_nodes
    }

    pub fn output_width(&self) -> usize {
        self.output_nodes
    }

    pub fn parameter_count(&self) -> usize {
        self.w1.len()
            + self.b1.len()
            + self.w2.len()
            + self.b2.len()
            + self.w3.len()
            + self.b3.len()
    }

    /// Forward pass returning an action-probability distribution.
    pub fn forward(&self, input: &[f32]) -> Result<Vec<f32>, SimError> {
        if input.len() != self.input_nodes {
            return Err(SimError::InputWidth {
                expected: self.input_nodes,
                actual: input.len(),
            });
        }

        let h1 = dense_relu(&self.w1, &self.b1, input, self.hidden1_nodes, self.input_nodes);
        let h2 = dense_relu(&self.w2, &self.b2, &h1, self.hidden2_nodes, self.hidden1_nodes);

        let mut logits = Vec::with_capacity(self.output_nodes);
        for row in 0..self.output_nodes {
            let offset = row * self.hidden2_nodes;
            let mut sum = self.b3[row];
            for (weight, value) in self.w3[offset..offset + self.hidden2_nodes].iter().zip(&h2) {
                sum += weight * value;
            }
            logits.push(sum);
        }

        Ok(softmax(&logits))
    }

    /// Flatten all parameters into one vector in the fixed total order.
    pub fn flatten(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.parameter_count());
        flat.extend_from_slice(&self.w1);
        flat.extend_from_slice(&self.b1);
        flat.extend_from_slice(&self.w2);
        flat.extend_from_slice(&self.b2);
        flat.extend_from_slice(&self.w3);
        flat.extend_from_slice(&self.b3);
        flat
    }

    /// Strict inverse of `flatten`: a wrong-length vector is an error,
    /// never truncated or padded.
    pub fn from_flat(topology: &NetworkTopology, params: &[f32]) -> Result<Self, SimError> {
        let expected = topology.parameter_count();
        if params.len() != expected {
            return Err(SimError::ParameterLength {
                expected,
                actual: params.len(),
            });
        }

        let mut cursor = 0usize;
        let mut take = |len: usize| -> Vec<f32> {
            let chunk = params[cursor..cursor + len].to_vec();
            cursor += len;
            chunk
        };

        let w1 = take(topology.hidden1_nodes * topology.input_nodes);
        let b1 = take(topology.hidden1_nodes);
        let w2 = take(topology.hidden2_nodes * topology.hidden1_nodes);
        let b2 = take(topology.hidden2_nodes);
        let w3 = take(topology.output_nodes * topology.hidden2_nodes);
        let b3 = take(topology.output_nodes);

        Ok(Self {
            input_nodes: topology.input_nodes,
            hidden1_nodes: topology.hidden1_nodes,
            hidden2_nodes: topology.hidden2_nodes,
            output_nodes: topology.output_nodes,
            w1,
            b1,
            w2,
            b2,
            w3,
            b3,
        })
    }
}

fn dense_relu(weights: &[f32], biases: &[f32], input: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(rows);
    for row in 0..rows {
        let offset = row * cols;
        let mut sum = biases[row];
        for (weight, value) in weights[offset..offset + cols].iter().zip(input) {
            sum += weight * value;
        }
        out.push(sum.max(0.0));
    }
    out
}

/// Max-subtracted softmax, falling back to a uniform distribution when
/// every exponential underflows to zero.
fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&logit| (logit - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        let uniform = 1.0 / logits.len() as f32;
        return vec![uniform; logits.len()];
    }
    exps.into_iter().map(|value| value / sum).collect()
}

/// Deterministic argmax over the distribution: `total_cmp`, lowest index
/// wins exact ties.
pub(crate) fn select_action_index(probabilities: &[f32]) -> usize {
    let mut best_idx = 0;
    let mut best = f32::NEG_INFINITY;
    for (idx, &probability) in probabilities.iter().enumerate() {
        if probability.total_cmp(&best) == std::cmp::Ordering::Greater {
            best_idx = idx;
            best = probability;
        }
    }
    best_idx
}
