use rand_chacha::ChaCha8Rng;

use super::{Cardinality, SearchStrategy, Template};
use crate::basic::BasicData;
use crate::descriptors::Descriptor;
use crate::errors::{BadData, DecodeResult};
use crate::params::{Parameter, ParameterSpace};
use crate::values::Value;

/// A strategy which always returns one fixed value.
///
/// The value lives in the strategy, not the template, so the encoded form
/// carries no information and is always null.
#[derive(Debug, Clone)]
pub struct JustStrategy {
    value: Value,
    parameter: ParameterSpace,
}

impl JustStrategy {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            parameter: ParameterSpace::trivial(),
        }
    }
}

impl SearchStrategy for JustStrategy {
    fn descriptor(&self) -> Descriptor {
        Descriptor::Just(self.value.clone())
    }

    fn parameter(&self) -> &ParameterSpace {
        &self.parameter
    }

    fn size_lower_bound(&self) -> Cardinality {
        Cardinality::Finite(1)
    }

    fn size_upper_bound(&self) -> Cardinality {
        Cardinality::Finite(1)
    }

    fn produce_template(&self, _random: &mut ChaCha8Rng, _parameter: &Parameter) -> Template {
        Template::Value(self.value.clone())
    }

    fn reify(&self, _template: &Template) -> Value {
        self.value.clone()
    }

    fn to_basic(&self, _template: &Template) -> BasicData {
        BasicData::Null
    }

    fn from_basic(&self, data: &BasicData) -> DecodeResult<Template> {
        if !data.is_null() {
            return Err(BadData::UnexpectedValue {
                expected: "None".to_string(),
                found: data.clone(),
            });
        }
        Ok(Template::Value(self.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn always_produces_the_value() {
        let strategy = JustStrategy::new("fixed");
        for seed in 0..20 {
            let mut random = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(strategy.example(&mut random), Value::from("fixed"));
        }
    }

    #[test]
    fn encodes_to_null() {
        let strategy = JustStrategy::new(10);
        let template = Template::Value(Value::from(10));
        assert_eq!(strategy.to_basic(&template), BasicData::Null);
        assert_eq!(strategy.from_basic(&BasicData::Null), Ok(template));
    }

    #[test]
    fn rejects_non_null_payload() {
        let strategy = JustStrategy::new(10);
        let err = strategy.from_basic(&BasicData::Integer(10)).unwrap_err();
        assert_eq!(err.to_string(), "Expected None but got 10");
    }

    #[test]
    fn descriptor_wraps_value() {
        assert_eq!(JustStrategy::new(true).descriptor(), Descriptor::just(true));
    }
}
