use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{Cardinality, SearchStrategy, Template};
use crate::basic::{BasicData, BasicKind};
use crate::descriptors::Descriptor;
use crate::errors::{check_data_type, DecodeResult, TypeMismatch};
use crate::params::{Parameter, ParameterSpace};
use crate::values::{RandomWithSeed, Value};

/// A strategy which produces seeded pseudo-random generators.
///
/// The template is a uniformly drawn 128-bit seed. Basic data only has signed
/// integers, so the seed is stored as the `i128` with the same bit pattern;
/// every `i128` decodes to exactly one seed.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    parameter: ParameterSpace,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            parameter: ParameterSpace::trivial(),
        }
    }

    fn seed(template: &Template) -> u128 {
        match template {
            Template::Seed(seed) => *seed,
            other => TypeMismatch::new("RandomStrategy", "a seed template", other).abort(),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for RandomStrategy {
    fn descriptor(&self) -> Descriptor {
        Descriptor::Random
    }

    fn parameter(&self) -> &ParameterSpace {
        &self.parameter
    }

    fn size_lower_bound(&self) -> Cardinality {
        Cardinality::Infinite
    }

    fn size_upper_bound(&self) -> Cardinality {
        Cardinality::Infinite
    }

    fn produce_template(&self, random: &mut ChaCha8Rng, _parameter: &Parameter) -> Template {
        let seed: u128 = random.gen();
        log::trace!("[STRATEGY] drew random seed {}", seed);
        Template::Seed(seed)
    }

    fn reify(&self, template: &Template) -> Value {
        Value::Random(RandomWithSeed::new(Self::seed(template)))
    }

    fn to_basic(&self, template: &Template) -> BasicData {
        BasicData::Integer(Self::seed(template) as i128)
    }

    fn from_basic(&self, data: &BasicData) -> DecodeResult<Template> {
        check_data_type(BasicKind::Integer, data)?;
        Ok(Template::Seed(data.as_integer().unwrap_or_default() as u128))
    }
}
