//! The search strategy contract and the primitive strategies.
//!
//! A strategy turns randomness into values in three steps:
//!
//! 1. draw a [`Parameter`] from [`SearchStrategy::parameter`] once per episode,
//! 2. draw any number of [`Template`]s under that parameter,
//! 3. [`reify`](SearchStrategy::reify) each template into the [`Value`] a test sees.
//!
//! Templates are what the search process stores and shrinks. They carry no
//! reference to the strategy that produced them, so every operation takes the
//! strategy and the template separately; a template persisted through
//! [`to_basic`](SearchStrategy::to_basic) can be decoded and reified by a freshly
//! built strategy for the same descriptor.
//!
//! Every strategy must satisfy the round-trip law
//! `from_basic(to_basic(t)) == Ok(t)` for any template it can produce.
//! `from_basic` only checks that data is structurally legal; it does not check
//! that the template lies in the support of `produce_template`, because
//! shrinking synthesizes templates the distribution would never draw.

use std::fmt;

use rand_chacha::ChaCha8Rng;

use crate::basic::BasicData;
use crate::descriptors::Descriptor;
use crate::errors::DecodeResult;
use crate::params::{Parameter, ParameterSpace};
use crate::values::Value;

mod boolean;
mod just;
mod random;
mod sampled_from;

pub use self::boolean::BoolStrategy;
pub use self::just::JustStrategy;
pub use self::random::RandomStrategy;
pub use self::sampled_from::SampledFromStrategy;

/// Serializable stand-in for one generated value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Template {
    Bool(bool),
    /// Position in a strategy's element list
    Index(usize),
    /// Raw seed of a pseudo-random generator
    Seed(u128),
    /// A value baked into the strategy
    Value(Value),
}

/// Estimated number of distinct values a strategy can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cardinality {
    Finite(u64),
    Infinite,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Finite(n) => write!(f, "{}", n),
            Cardinality::Infinite => write!(f, "inf"),
        }
    }
}

/// Behaviour bundle binding a descriptor to generation, reification and encoding
///
/// Passing a template or parameter that this strategy could not have produced
/// (for instance a seed to a boolean strategy) is a programming error. Such calls
/// take the [`TypeMismatch`](crate::errors::TypeMismatch) abort path rather than
/// returning an error.
pub trait SearchStrategy: fmt::Debug + Send + Sync {
    /// The descriptor this strategy was built for
    fn descriptor(&self) -> Descriptor;

    /// Distribution the per-episode parameter is drawn from
    fn parameter(&self) -> &ParameterSpace;

    /// Lower bound on the number of distinct values. Advisory only.
    fn size_lower_bound(&self) -> Cardinality;

    /// Upper bound on the number of distinct values. Advisory only.
    fn size_upper_bound(&self) -> Cardinality;

    /// Draw one template conditioned on `parameter`.
    fn produce_template(&self, random: &mut ChaCha8Rng, parameter: &Parameter) -> Template;

    /// Convert a template into the value a test receives.
    fn reify(&self, template: &Template) -> Value;

    /// Encode a template as basic data.
    fn to_basic(&self, template: &Template) -> BasicData;

    /// Decode basic data back into a template.
    ///
    /// Data comes from persisted, possibly stale sources, so failure is expected
    /// and recoverable: callers discard the example.
    fn from_basic(&self, data: &BasicData) -> DecodeResult<Template>;

    fn draw_parameter(&self, random: &mut ChaCha8Rng) -> Parameter {
        self.parameter().draw(random)
    }

    /// Draw a fresh parameter and a single template under it.
    fn draw_and_produce(&self, random: &mut ChaCha8Rng) -> Template {
        let parameter = self.draw_parameter(random);
        self.produce_template(random, &parameter)
    }

    fn example(&self, random: &mut ChaCha8Rng) -> Value {
        let template = self.draw_and_produce(random);
        self.reify(&template)
    }
}
