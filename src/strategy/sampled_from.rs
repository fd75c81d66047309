use std::collections::HashSet;

use rand_chacha::ChaCha8Rng;

use super::{Cardinality, SearchStrategy, Template};
use crate::basic::{BasicData, BasicKind};
use crate::descriptors::Descriptor;
use crate::distributions;
use crate::errors::{check_data_type, BadData, DecodeResult, ResolutionError, TypeMismatch};
use crate::params::{Parameter, ParameterSpace};
use crate::values::Value;

/// A strategy which samples from a fixed list of elements.
///
/// Templates are indices into the element list. The parameter is a non-empty
/// subset of indices, which lets the search process bias different episodes
/// towards different live subsets. Template production currently ignores the
/// subset and draws uniformly over every index.
#[derive(Debug, Clone)]
pub struct SampledFromStrategy {
    elements: Vec<Value>,
    descriptor: Descriptor,
    parameter: ParameterSpace,
    size: u64,
}

impl SampledFromStrategy {
    pub fn new(elements: Vec<Value>) -> Result<Self, ResolutionError> {
        let descriptor = Descriptor::SampledFrom(elements.clone());
        Self::with_descriptor(elements, descriptor)
    }

    /// Build over `elements` but report `descriptor` as the strategy's origin.
    pub fn with_descriptor(
        elements: Vec<Value>,
        descriptor: Descriptor,
    ) -> Result<Self, ResolutionError> {
        if elements.is_empty() {
            return Err(ResolutionError::InvalidDescriptor {
                descriptor: descriptor.to_string(),
                reason: "cannot sample from an empty collection".to_string(),
            });
        }

        // Duplicates collapse when elements can be compared as set members;
        // otherwise every position counts.
        let size = if elements.iter().all(Value::is_hashable) {
            elements.iter().collect::<HashSet<_>>().len()
        } else {
            elements.len()
        };

        Ok(Self {
            parameter: ParameterSpace::non_empty_subset(elements.len()),
            size: size as u64,
            elements,
            descriptor,
        })
    }

    fn index(&self, template: &Template) -> usize {
        match template {
            Template::Index(i) if *i < self.elements.len() => *i,
            other => {
                TypeMismatch::new("SampledFromStrategy", "an index template in range", other)
                    .abort()
            }
        }
    }
}

impl SearchStrategy for SampledFromStrategy {
    fn descriptor(&self) -> Descriptor {
        self.descriptor.clone()
    }

    fn parameter(&self) -> &ParameterSpace {
        &self.parameter
    }

    fn size_lower_bound(&self) -> Cardinality {
        Cardinality::Finite(self.size)
    }

    fn size_upper_bound(&self) -> Cardinality {
        Cardinality::Finite(self.size)
    }

    fn produce_template(&self, random: &mut ChaCha8Rng, _parameter: &Parameter) -> Template {
        Template::Index(distributions::uniform_index(random, self.elements.len()))
    }

    fn reify(&self, template: &Template) -> Value {
        self.elements[self.index(template)].clone()
    }

    fn to_basic(&self, template: &Template) -> BasicData {
        BasicData::Integer(self.index(template) as i128)
    }

    fn from_basic(&self, data: &BasicData) -> DecodeResult<Template> {
        check_data_type(BasicKind::Integer, data)?;
        let index = data.as_integer().unwrap_or_default();
        if index < 0 || index >= self.elements.len() as i128 {
            return Err(BadData::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        Ok(Template::Index(index as usize))
    }
}
