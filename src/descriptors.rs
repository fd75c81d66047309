//! Descriptors: inert descriptions of the data a test wants.
//!
//! A descriptor carries no behaviour. The strategy table maps it to a
//! strategy, either by its [`DescriptorKind`], by its exact value, or by one of
//! the table's instance rules.

use std::fmt;
use std::sync::Arc;

use crate::strategy::SearchStrategy;
use crate::values::Value;

/// Description of a kind of data to generate
#[derive(Clone)]
pub enum Descriptor {
    /// Booleans
    Bool,
    /// Seeded pseudo-random generators
    Random,
    /// The "no value" marker itself
    Null,
    /// The type of the "no value" marker
    NullType,
    /// Exactly this value
    Just(Value),
    /// One of these values
    SampledFrom(Vec<Value>),
    /// A strategy that is used as-is
    Strategy(Arc<dyn SearchStrategy>),
}

/// Exact-kind key of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    Bool,
    Random,
    Null,
    NullType,
    Just,
    SampledFrom,
    Strategy,
}

impl Descriptor {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Descriptor::Bool => DescriptorKind::Bool,
            Descriptor::Random => DescriptorKind::Random,
            Descriptor::Null => DescriptorKind::Null,
            Descriptor::NullType => DescriptorKind::NullType,
            Descriptor::Just(_) => DescriptorKind::Just,
            Descriptor::SampledFrom(_) => DescriptorKind::SampledFrom,
            Descriptor::Strategy(_) => DescriptorKind::Strategy,
        }
    }

    pub fn just(value: impl Into<Value>) -> Self {
        Descriptor::Just(value.into())
    }

    pub fn sampled_from<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Descriptor::SampledFrom(elements.into_iter().map(Into::into).collect())
    }
}

fn same_strategy(a: &Arc<dyn SearchStrategy>, b: &Arc<dyn SearchStrategy>) -> bool {
    // Compare data pointers only; vtable pointers for one type may differ
    // between codegen units.
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Descriptor::Bool, Descriptor::Bool)
            | (Descriptor::Random, Descriptor::Random)
            | (Descriptor::Null, Descriptor::Null)
            | (Descriptor::NullType, Descriptor::NullType) => true,
            (Descriptor::Just(a), Descriptor::Just(b)) => a == b,
            (Descriptor::SampledFrom(a), Descriptor::SampledFrom(b)) => a == b,
            (Descriptor::Strategy(a), Descriptor::Strategy(b)) => same_strategy(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Strategy(s) => f.debug_tuple("Strategy").field(s).finish(),
            Descriptor::Just(v) => f.debug_tuple("Just").field(v).finish(),
            Descriptor::SampledFrom(vs) => f.debug_tuple("SampledFrom").field(vs).finish(),
            other => write!(f, "{:?}", other.kind()),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Bool => write!(f, "bool"),
            Descriptor::Random => write!(f, "Random"),
            Descriptor::Null => write!(f, "None"),
            Descriptor::NullType => write!(f, "NoneType"),
            Descriptor::Just(v) => write!(f, "Just(value={})", v),
            Descriptor::SampledFrom(elements) => {
                write!(f, "SampledFrom((")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, "))")
            }
            Descriptor::Strategy(s) => write!(f, "{:?}", s),
        }
    }
}
