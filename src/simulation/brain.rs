//! Neural network brains for entities.
//!
//! A brain is a fixed-topology multi-layer perceptron: 10 sensory inputs,
//! rectified-linear hidden layers, and a tanh output layer bounded to
//! [-1, 1]. Evolution only ever perturbs weight values; the topology is set
//! at creation and never changes.

use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

/// Number of sensory inputs every brain expects.
pub const INPUT_SIZE: usize = 10;
/// Number of action outputs: heading, speed, reproduction signal.
pub const OUTPUT_SIZE: usize = 3;
/// Default hidden layer widths.
pub const HIDDEN_LAYERS: [usize; 3] = [16, 16, 8];

/// Half-width of the uniform interval used for weight initialization.
const INIT_SCALE: f32 = 0.5;
/// Scale of the Gaussian noise added to a weight when it mutates.
const MUTATION_NOISE_SCALE: f32 = 0.1;

/// Activation applied after a layer's affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Rectified linear, used for hidden layers.
    Relu,
    /// Hyperbolic tangent, bounds the output layer to [-1, 1].
    Tanh,
}

/// A single dense layer of the perceptron.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
    /// Activation applied to this layer's output.
    pub activation: Activation,
}

impl Layer {
    /// Creates a layer with weights and biases uniform in `[-scale, scale)`.
    pub fn new_random<R: Rng>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        scale: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            weights: Array2::random_using(
                (output_size, input_size),
                Uniform::new(-scale, scale),
                rng,
            ),
            biases: Array1::random_using(output_size, Uniform::new(-scale, scale), rng),
            activation,
        }
    }

    /// Performs a forward pass through this layer.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        match self.activation {
            Activation::Relu => output.mapv_inplace(|v| v.max(0.0)),
            Activation::Tanh => output.mapv_inplace(f32::tanh),
        }
        output
    }

    /// Perturbs each weight and bias independently with probability `rate`.
    pub fn mutate<R: Rng>(&mut self, rate: f32, rng: &mut R) {
        for w in &mut self.weights {
            if rng.gen::<f32>() < rate {
                *w += gaussian(rng) * MUTATION_NOISE_SCALE;
            }
        }
        for b in &mut self.biases {
            if rng.gen::<f32>() < rate {
                *b += gaussian(rng) * MUTATION_NOISE_SCALE;
            }
        }
    }
}

/// Fixed-topology feed-forward brain controlling one entity.
///
/// Cloning yields a fully independent copy; mutating a clone never touches
/// the parent's weights.
#[derive(Debug, Clone)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Layer>,
}

impl Brain {
    /// Creates a brain with the default topology and random weights.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_hidden_layers(&HIDDEN_LAYERS, rng)
    }

    /// Creates a brain with the given hidden layer widths.
    ///
    /// Hidden layers use ReLU; the final layer uses tanh so every output
    /// lands in [-1, 1].
    pub fn with_hidden_layers<R: Rng>(hidden: &[usize], rng: &mut R) -> Self {
        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(INPUT_SIZE);
        sizes.extend_from_slice(hidden);
        sizes.push(OUTPUT_SIZE);

        let output_layer = sizes.len() - 2;
        let layers = (0..sizes.len() - 1)
            .map(|i| {
                let activation = if i == output_layer {
                    Activation::Tanh
                } else {
                    Activation::Relu
                };
                Layer::new_random(sizes[i], sizes[i + 1], activation, INIT_SCALE, rng)
            })
            .collect();

        Self { layers }
    }

    /// Length of the input vector this brain expects.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.weights.ncols())
    }

    /// Runs a forward pass and returns the action outputs.
    ///
    /// Deterministic for fixed weights. Panics when `inputs` does not match
    /// the input layer width; a mismatched vector is a caller bug, not a
    /// recoverable condition.
    pub fn predict(&self, inputs: &Array1<f32>) -> Array1<f32> {
        assert_eq!(
            inputs.len(),
            self.input_size(),
            "input vector length does not match brain input width"
        );
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Forward pass that keeps every layer's activations.
    ///
    /// The returned vector starts with the input vector itself and ends with
    /// the output layer's activations, so it always holds `layers.len() + 1`
    /// entries.
    pub fn forward_trace(&self, inputs: &Array1<f32>) -> Vec<Array1<f32>> {
        assert_eq!(
            inputs.len(),
            self.input_size(),
            "input vector length does not match brain input width"
        );
        let mut trace = Vec::with_capacity(self.layers.len() + 1);
        let mut current = inputs.clone();
        for layer in &self.layers {
            let next = layer.forward(&current);
            trace.push(current);
            current = next;
        }
        trace.push(current);
        trace
    }

    /// Mutates every layer in place.
    ///
    /// `rate` is the independent per-weight perturbation probability. Callers
    /// breeding offspring must clone first; mutation never leaves this brain.
    pub fn mutate<R: Rng>(&mut self, rate: f32, rng: &mut R) {
        for layer in &mut self.layers {
            layer.mutate(rate, rng);
        }
    }
}

/// Standard normal sample via the Box-Muller transform.
///
/// Uniform draws equal to zero are rejected so `ln` never sees 0.
pub(crate) fn gaussian<R: Rng>(rng: &mut R) -> f32 {
    let mut u = 0.0f32;
    while u == 0.0 {
        u = rng.gen();
    }
    let mut v = 0.0f32;
    while v == 0.0 {
        v = rng.gen();
    }
    (-2.0 * u.ln()).sqrt() * (std::f32::consts::TAU * v).cos()
}
