//! Parameter spaces and the parameters drawn from them.
//!
//! A strategy's conditional distribution is split in two: a [`Parameter`] is
//! drawn once per generation episode from the strategy's [`ParameterSpace`],
//! then any number of templates are drawn under that parameter. Parameters
//! are plain values and are never mutated after the draw.

use rand_chacha::ChaCha8Rng;

use crate::distributions;

/// A drawn parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// A probability or other real-valued knob
    Float(f64),
    /// A sorted, non-empty subset of element indices
    Subset(Vec<usize>),
    /// One parameter per component; empty for strategies with no degrees of freedom
    Composite(Vec<Parameter>),
}

impl Parameter {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Parameter::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&[Parameter]> {
        match self {
            Parameter::Composite(parts) => Some(parts),
            _ => None,
        }
    }
}

/// A distribution over parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSpace {
    UniformFloat { lower: f64, upper: f64 },
    NonEmptySubset { size: usize, activation_chance: f64 },
    Composite(Vec<ParameterSpace>),
}

impl ParameterSpace {
    pub fn uniform_float(lower: f64, upper: f64) -> Self {
        ParameterSpace::UniformFloat { lower, upper }
    }

    /// Subsets of `0..size`, each index active with chance `min(0.5, 3 / size)`.
    ///
    /// Panics if `size` is zero.
    pub fn non_empty_subset(size: usize) -> Self {
        assert!(size > 0, "a non-empty subset needs at least one element");
        ParameterSpace::NonEmptySubset {
            size,
            activation_chance: (3.0 / size as f64).min(0.5),
        }
    }

    pub fn composite(parts: Vec<ParameterSpace>) -> Self {
        ParameterSpace::Composite(parts)
    }

    /// The parameter space with no degrees of freedom.
    pub fn trivial() -> Self {
        ParameterSpace::Composite(Vec::new())
    }

    pub fn draw(&self, random: &mut ChaCha8Rng) -> Parameter {
        match self {
            ParameterSpace::UniformFloat { lower, upper } => {
                Parameter::Float(distributions::uniform_float(random, *lower, *upper))
            }
            ParameterSpace::NonEmptySubset {
                size,
                activation_chance,
            } => Parameter::Subset(distributions::non_empty_subset(
                random,
                *size,
                *activation_chance,
            )),
            ParameterSpace::Composite(parts) => {
                Parameter::Composite(parts.iter().map(|p| p.draw(random)).collect())
            }
        }
    }
}
