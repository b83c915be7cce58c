use ndarray::{Array1, Array2, ArrayView1};

use crate::RegressorError;

/// Activation applied after a dense layer's affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
}

impl Activation {
    fn apply(self, z: Array1<f32>) -> Array1<f32> {
        match self {
            Self::Linear => z,
            Self::Relu => z.mapv(|v| v.max(0.0)),
            Self::Sigmoid => z.mapv(|v| 1.0 / (1.0 + (-v).exp())),
        }
    }
}

/// One dense layer: `y = act(W·x + b)`, weights stored `m × n`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Array2<f32>,
    biases: Array1<f32>,
    activation: Activation,
}

impl DenseLayer {
    /// # Errors
    /// Returns `RegressorError::ShapeMismatch` if the bias length does not
    /// match the weight matrix's row count.
    pub fn new(
        weights: Array2<f32>,
        biases: Array1<f32>,
        activation: Activation,
    ) -> Result<Self, RegressorError> {
        if biases.len() != weights.nrows() {
            return Err(RegressorError::ShapeMismatch {
                what: "biases",
                got: biases.len(),
                expected: weights.nrows(),
            });
        }
        Ok(Self {
            weights,
            biases,
            activation,
        })
    }

    fn in_dim(&self) -> usize {
        self.weights.ncols()
    }

    fn out_dim(&self) -> usize {
        self.weights.nrows()
    }

    fn forward(&self, x: ArrayView1<f32>) -> Array1<f32> {
        let z = self.weights.dot(&x) + &self.biases;
        self.activation.apply(z)
    }
}

/// Forward-only regression network mapping a fixed-length vector to one
/// scalar. Read-only after construction and reusable across predictions.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<DenseLayer>,
}

impl Network {
    /// # Errors
    /// Returns `RegressorError` if the stack is empty, consecutive layers
    /// do not chain, or the final layer is not scalar.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, RegressorError> {
        let last = layers
            .last()
            .ok_or(RegressorError::InvalidInput("network has no layers"))?;

        if last.out_dim() != 1 {
            return Err(RegressorError::ShapeMismatch {
                what: "output",
                got: last.out_dim(),
                expected: 1,
            });
        }

        for pair in layers.windows(2) {
            if pair[0].out_dim() != pair[1].in_dim() {
                return Err(RegressorError::ShapeMismatch {
                    what: "layer chain",
                    got: pair[1].in_dim(),
                    expected: pair[0].out_dim(),
                });
            }
        }

        Ok(Self { layers })
    }

    /// Number of inputs the first layer expects.
    pub fn input_dim(&self) -> usize {
        self.layers[0].in_dim()
    }

    /// Runs the forward pass and returns the single output value.
    ///
    /// # Errors
    /// Returns `RegressorError::ShapeMismatch` if `x` is not
    /// `input_dim()` long.
    pub fn predict(&self, x: ArrayView1<f32>) -> Result<f32, RegressorError> {
        if x.len() != self.input_dim() {
            return Err(RegressorError::ShapeMismatch {
                what: "input",
                got: x.len(),
                expected: self.input_dim(),
            });
        }

        let mut acc = self.layers[0].forward(x);
        for layer in &self.layers[1..] {
            acc = layer.forward(acc.view());
        }
        Ok(acc[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn linear(weights: Array2<f32>, biases: Array1<f32>) -> DenseLayer {
        DenseLayer::new(weights, biases, Activation::Linear).unwrap()
    }

    #[test]
    fn single_layer_affine() {
        let net = Network::new(vec![linear(array![[2.0_f32, -1.0]], array![0.5])]).unwrap();
        let y = net.predict(array![3.0_f32, 4.0].view()).unwrap();
        assert!((y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn relu_clamps_negative_preactivations() {
        let hidden = DenseLayer::new(
            array![[1.0_f32], [-1.0]],
            array![0.0, 0.0],
            Activation::Relu,
        )
        .unwrap();
        let out = linear(array![[1.0_f32, 1.0]], array![0.0]);
        let net = Network::new(vec![hidden, out]).unwrap();

        // x = 2: hidden = [2, 0] -> y = 2; x = -2: hidden = [0, 2] -> y = 2
        assert!((net.predict(array![2.0_f32].view()).unwrap() - 2.0).abs() < 1e-6);
        assert!((net.predict(array![-2.0_f32].view()).unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn sigmoid_of_zero_is_half() {
        let net = Network::new(vec![DenseLayer::new(
            array![[1.0_f32]],
            array![0.0],
            Activation::Sigmoid,
        )
        .unwrap()])
        .unwrap();
        let y = net.predict(array![0.0_f32].view()).unwrap();
        assert!((y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn wrong_input_length_is_rejected() {
        let net = Network::new(vec![linear(array![[1.0_f32, 1.0]], array![0.0])]).unwrap();
        let err = net.predict(array![1.0_f32].view()).unwrap_err();
        assert!(matches!(
            err,
            RegressorError::ShapeMismatch {
                what: "input",
                got: 1,
                expected: 2,
            }
        ));
    }

    #[test]
    fn mismatched_chain_is_rejected() {
        let a = linear(array![[1.0_f32, 1.0], [1.0, 1.0]], array![0.0, 0.0]);
        let b = linear(array![[1.0_f32, 1.0, 1.0]], array![0.0]);
        assert!(matches!(
            Network::new(vec![a, b]),
            Err(RegressorError::ShapeMismatch { what: "layer chain", .. })
        ));
    }

    #[test]
    fn non_scalar_output_is_rejected() {
        let wide = linear(array![[1.0_f32], [1.0]], array![0.0, 0.0]);
        assert!(matches!(
            Network::new(vec![wide]),
            Err(RegressorError::ShapeMismatch { what: "output", .. })
        ));
    }

    #[test]
    fn bias_length_must_match_rows() {
        assert!(matches!(
            DenseLayer::new(array![[1.0_f32, 2.0]], array![0.0, 0.0], Activation::Linear),
            Err(RegressorError::ShapeMismatch { what: "biases", .. })
        ));
    }
}
