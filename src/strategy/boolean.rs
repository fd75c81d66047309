use rand_chacha::ChaCha8Rng;

use super::{Cardinality, SearchStrategy, Template};
use crate::basic::{BasicData, BasicKind};
use crate::descriptors::Descriptor;
use crate::distributions;
use crate::errors::{check_data_type, DecodeResult, TypeMismatch};
use crate::params::{Parameter, ParameterSpace};
use crate::values::Value;

/// Booleans with a Bernoulli conditional distribution.
///
/// The parameter is the coin's bias, drawn uniformly from `[0, 1)`.
#[derive(Debug, Clone)]
pub struct BoolStrategy {
    parameter: ParameterSpace,
}

impl BoolStrategy {
    pub fn new() -> Self {
        Self {
            parameter: ParameterSpace::uniform_float(0.0, 1.0),
        }
    }

    fn template_value(template: &Template) -> bool {
        match template {
            Template::Bool(b) => *b,
            other => TypeMismatch::new("BoolStrategy", "a boolean template", other).abort(),
        }
    }
}

impl Default for BoolStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for BoolStrategy {
    fn descriptor(&self) -> Descriptor {
        Descriptor::Bool
    }

    fn parameter(&self) -> &ParameterSpace {
        &self.parameter
    }

    fn size_lower_bound(&self) -> Cardinality {
        Cardinality::Finite(2)
    }

    fn size_upper_bound(&self) -> Cardinality {
        Cardinality::Finite(2)
    }

    fn produce_template(&self, random: &mut ChaCha8Rng, parameter: &Parameter) -> Template {
        let p = match parameter.as_float() {
            Some(p) => p,
            None => TypeMismatch::new("BoolStrategy", "a probability parameter", parameter).abort(),
        };
        Template::Bool(distributions::biased_coin(random, p))
    }

    fn reify(&self, template: &Template) -> Value {
        Value::Bool(Self::template_value(template))
    }

    fn to_basic(&self, template: &Template) -> BasicData {
        BasicData::Integer(Self::template_value(template) as i128)
    }

    fn from_basic(&self, data: &BasicData) -> DecodeResult<Template> {
        check_data_type(BasicKind::Integer, data)?;
        Ok(Template::Bool(data.as_integer() != Some(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn zero_bias_never_true() {
        let strategy = BoolStrategy::new();
        let mut random = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..1000 {
            assert_eq!(
                strategy.produce_template(&mut random, &Parameter::Float(0.0)),
                Template::Bool(false)
            );
        }
    }

    #[test]
    fn full_bias_never_false() {
        let strategy = BoolStrategy::new();
        let mut random = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(
                strategy.produce_template(&mut random, &Parameter::Float(1.0)),
                Template::Bool(true)
            );
        }
    }

    #[test]
    fn encodes_as_zero_or_one() {
        let strategy = BoolStrategy::new();
        assert_eq!(strategy.to_basic(&Template::Bool(true)), BasicData::Integer(1));
        assert_eq!(strategy.to_basic(&Template::Bool(false)), BasicData::Integer(0));
    }

    #[test]
    fn decodes_by_truthiness() {
        let strategy = BoolStrategy::new();
        assert_eq!(strategy.from_basic(&BasicData::Integer(0)), Ok(Template::Bool(false)));
        assert_eq!(strategy.from_basic(&BasicData::Integer(1)), Ok(Template::Bool(true)));
        assert_eq!(strategy.from_basic(&BasicData::Integer(-7)), Ok(Template::Bool(true)));
    }

    #[test]
    fn rejects_non_integer_data() {
        let strategy = BoolStrategy::new();
        assert!(strategy.from_basic(&BasicData::Null).is_err());
        assert!(strategy.from_basic(&BasicData::Sequence(vec![])).is_err());
    }

    #[test]
    #[should_panic(expected = "TypeMismatch")]
    fn foreign_template_aborts() {
        BoolStrategy::new().to_basic(&Template::Seed(3));
    }

    #[test]
    #[should_panic(expected = "TypeMismatch")]
    fn foreign_parameter_aborts() {
        let mut random = ChaCha8Rng::seed_from_u64(0);
        BoolStrategy::new().produce_template(&mut random, &Parameter::Composite(vec![]));
    }
}
