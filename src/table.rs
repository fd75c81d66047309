//! Strategy table: resolution of descriptors to strategies.
//!
//! Tables are assembled with a [`StrategyTableBuilder`] and frozen by
//! [`StrategyTableBuilder::build`]. A built table cannot change, so it can be
//! shared between threads and read without locking. Registration and
//! generation therefore never overlap.
//!
//! Resolution of a descriptor `d` tries, in order:
//!
//! 1. the entry for `d.kind()`,
//! 2. the entry whose key equals `d` exactly,
//! 3. the instance rules, in the order they were defined; the first rule whose
//!    predicate accepts `d` wins.
//!
//! If nothing matches, [`ResolutionError::NoStrategyFor`] names the descriptor.
//!
//! Defining a kind or value key twice on a builder replaces the earlier
//! definition. Instance rules never replace each other; an earlier rule always
//! shadows a later one that accepts the same descriptors.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::descriptors::{Descriptor, DescriptorKind};
use crate::errors::ResolutionError;
use crate::strategy::{
    BoolStrategy, JustStrategy, RandomStrategy, SampledFromStrategy, SearchStrategy,
};
use crate::values::Value;

/// Shared handle to a strategy
pub type StrategyRef = Arc<dyn SearchStrategy>;

/// Builds a strategy for a descriptor. Receives the table so that compound
/// strategies can resolve their children.
pub type Constructor =
    Arc<dyn Fn(&StrategyTable, &Descriptor) -> Result<StrategyRef, ResolutionError> + Send + Sync>;

/// Decides whether an instance rule applies to a descriptor
pub type Predicate = Arc<dyn Fn(&Descriptor) -> bool + Send + Sync>;

struct InstanceRule {
    family: String,
    accepts: Predicate,
    construct: Constructor,
}

#[derive(Default, Clone)]
struct Entries {
    by_kind: HashMap<DescriptorKind, Constructor>,
    by_value: Vec<(Descriptor, Constructor)>,
    instance_rules: Vec<Arc<InstanceRule>>,
}

/// Collects definitions before freezing them into a [`StrategyTable`]
#[derive(Default)]
pub struct StrategyTableBuilder {
    entries: Entries,
}

impl StrategyTableBuilder {
    /// An empty builder with no definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder preloaded with the primitive strategy definitions.
    pub fn standard() -> Self {
        let shared_bool: StrategyRef = Arc::new(BoolStrategy::new());

        Self::new()
            .define_instance_for_kind(DescriptorKind::Bool, shared_bool)
            .define_for_instances_of(DescriptorKind::Just, "Just", |_, descriptor| {
                match descriptor {
                    Descriptor::Just(value) => {
                        Ok(Arc::new(JustStrategy::new(value.clone())) as StrategyRef)
                    }
                    other => Err(unexpected(other, "Just")),
                }
            })
            .define_for_instances_of(DescriptorKind::Strategy, "SearchStrategy", |_, descriptor| {
                match descriptor {
                    Descriptor::Strategy(strategy) => Ok(Arc::clone(strategy)),
                    other => Err(unexpected(other, "SearchStrategy")),
                }
            })
            .define_for_kind(DescriptorKind::Random, |_, _| {
                Ok(Arc::new(RandomStrategy::new()) as StrategyRef)
            })
            .define_for_instances_of(DescriptorKind::SampledFrom, "SampledFrom", |_, descriptor| {
                match descriptor {
                    Descriptor::SampledFrom(elements) => {
                        let strategy = SampledFromStrategy::with_descriptor(
                            elements.clone(),
                            descriptor.clone(),
                        )?;
                        Ok(Arc::new(strategy) as StrategyRef)
                    }
                    other => Err(unexpected(other, "SampledFrom")),
                }
            })
            .define_for_value(Descriptor::Null, define_none_strategy)
            .define_for_kind(DescriptorKind::NullType, define_none_strategy)
    }

    /// Define the constructor used for every descriptor of `kind`.
    pub fn define_for_kind<F>(mut self, kind: DescriptorKind, construct: F) -> Self
    where
        F: Fn(&StrategyTable, &Descriptor) -> Result<StrategyRef, ResolutionError>
            + Send
            + Sync
            + 'static,
    {
        if self.entries.by_kind.insert(kind, Arc::new(construct)).is_some() {
            log::debug!("[TABLE] replacing definition for kind {:?}", kind);
        } else {
            log::debug!("[TABLE] defined strategy for kind {:?}", kind);
        }
        self
    }

    /// Resolve every descriptor of `kind` to one shared strategy instance.
    pub fn define_instance_for_kind(self, kind: DescriptorKind, strategy: StrategyRef) -> Self {
        self.define_for_kind(kind, move |_, _| Ok(Arc::clone(&strategy)))
    }

    /// Define the constructor used for descriptors equal to `descriptor`.
    pub fn define_for_value<F>(mut self, descriptor: Descriptor, construct: F) -> Self
    where
        F: Fn(&StrategyTable, &Descriptor) -> Result<StrategyRef, ResolutionError>
            + Send
            + Sync
            + 'static,
    {
        let construct: Constructor = Arc::new(construct);
        match self.entries.by_value.iter_mut().find(|(key, _)| *key == descriptor) {
            Some(entry) => {
                log::debug!("[TABLE] replacing definition for value {}", descriptor);
                entry.1 = construct;
            }
            None => {
                log::debug!("[TABLE] defined strategy for value {}", descriptor);
                self.entries.by_value.push((descriptor, construct));
            }
        }
        self
    }

    /// Append an instance rule. `family` names the rule in logs and debug output.
    pub fn define_for_instances<P, F>(
        mut self,
        family: impl Into<String>,
        accepts: P,
        construct: F,
    ) -> Self
    where
        P: Fn(&Descriptor) -> bool + Send + Sync + 'static,
        F: Fn(&StrategyTable, &Descriptor) -> Result<StrategyRef, ResolutionError>
            + Send
            + Sync
            + 'static,
    {
        let family = family.into();
        log::debug!("[TABLE] defined instance rule {}", family);
        self.entries.instance_rules.push(Arc::new(InstanceRule {
            family,
            accepts: Arc::new(accepts),
            construct: Arc::new(construct),
        }));
        self
    }

    /// Append an instance rule accepting every descriptor of `kind`.
    pub fn define_for_instances_of<F>(
        self,
        kind: DescriptorKind,
        family: impl Into<String>,
        construct: F,
    ) -> Self
    where
        F: Fn(&StrategyTable, &Descriptor) -> Result<StrategyRef, ResolutionError>
            + Send
            + Sync
            + 'static,
    {
        self.define_for_instances(family, move |d: &Descriptor| d.kind() == kind, construct)
    }

    /// Freeze the definitions.
    pub fn build(self) -> StrategyTable {
        log::debug!(
            "[TABLE] built table with {} kind entries, {} value entries, {} instance rules",
            self.entries.by_kind.len(),
            self.entries.by_value.len(),
            self.entries.instance_rules.len()
        );
        StrategyTable {
            entries: self.entries,
        }
    }
}

fn define_none_strategy(_: &StrategyTable, _: &Descriptor) -> Result<StrategyRef, ResolutionError> {
    Ok(Arc::new(JustStrategy::new(Value::Null)))
}

fn unexpected(descriptor: &Descriptor, family: &str) -> ResolutionError {
    ResolutionError::InvalidDescriptor {
        descriptor: descriptor.to_string(),
        reason: format!("not an instance of {}", family),
    }
}

/// Immutable descriptor→strategy dispatch table
pub struct StrategyTable {
    entries: Entries,
}

impl StrategyTable {
    pub fn builder() -> StrategyTableBuilder {
        StrategyTableBuilder::new()
    }

    /// A table with the primitive strategy definitions.
    pub fn standard() -> Self {
        StrategyTableBuilder::standard().build()
    }

    /// A builder starting from this table's definitions, for extending it.
    pub fn to_builder(&self) -> StrategyTableBuilder {
        StrategyTableBuilder {
            entries: self.entries.clone(),
        }
    }

    /// Resolve a descriptor to its strategy.
    pub fn resolve(&self, descriptor: &Descriptor) -> Result<StrategyRef, ResolutionError> {
        let construct = match self.find(descriptor) {
            Some(construct) => construct,
            None => {
                log::debug!("[TABLE] no strategy for {}", descriptor);
                return Err(ResolutionError::NoStrategyFor {
                    descriptor: descriptor.to_string(),
                });
            }
        };
        construct(self, descriptor)
    }

    /// Whether some definition would be tried for this descriptor.
    pub fn handles(&self, descriptor: &Descriptor) -> bool {
        self.find(descriptor).is_some()
    }

    fn find(&self, descriptor: &Descriptor) -> Option<&Constructor> {
        if let Some(construct) = self.entries.by_kind.get(&descriptor.kind()) {
            log::trace!("[TABLE] {} matched kind entry", descriptor);
            return Some(construct);
        }

        let by_value = self.entries.by_value.iter().find(|(key, _)| key == descriptor);
        if let Some((_, construct)) = by_value {
            log::trace!("[TABLE] {} matched value entry", descriptor);
            return Some(construct);
        }

        self.entries
            .instance_rules
            .iter()
            .find(|rule| (rule.accepts)(descriptor))
            .map(|rule| {
                log::trace!("[TABLE] {} matched instance rule {}", descriptor, rule.family);
                &rule.construct
            })
    }
}

impl fmt::Debug for StrategyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let families: Vec<&str> = self
            .entries
            .instance_rules
            .iter()
            .map(|rule| rule.family.as_str())
            .collect();
        f.debug_struct("StrategyTable")
            .field("kinds", &self.entries.by_kind.keys().collect::<Vec<_>>())
            .field("values", &self.entries.by_value.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("instance_rules", &families)
            .finish()
    }
}

static STANDARD_TABLE: Lazy<StrategyTable> = Lazy::new(StrategyTable::standard);

/// The process-wide standard table, built on first use.
pub fn standard_table() -> &'static StrategyTable {
    &STANDARD_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_resolves_to_shared_instance() {
        let table = StrategyTable::standard();
        let a = table.resolve(&Descriptor::Bool).unwrap();
        let b = table.resolve(&Descriptor::Bool).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn null_resolves_by_value_and_by_kind() {
        let table = StrategyTable::standard();
        for descriptor in &[Descriptor::Null, Descriptor::NullType] {
            let strategy = table.resolve(descriptor).unwrap();
            assert_eq!(strategy.descriptor(), Descriptor::Just(Value::Null));
        }
    }

    #[test]
    fn empty_table_resolves_nothing() {
        let table = StrategyTable::builder().build();
        assert_eq!(
            table.resolve(&Descriptor::Bool).unwrap_err(),
            ResolutionError::NoStrategyFor {
                descriptor: "bool".to_string()
            }
        );
        assert!(!table.handles(&Descriptor::Bool));
    }

    #[test]
    fn standard_table_is_shared() {
        assert!(std::ptr::eq(standard_table(), standard_table()));
        assert!(standard_table().handles(&Descriptor::Random));
    }

    #[test]
    fn debug_lists_instance_rules_in_order() {
        let rendered = format!("{:?}", StrategyTable::standard());
        let just = rendered.find("\"Just\"").unwrap();
        let strategy = rendered.find("\"SearchStrategy\"").unwrap();
        let sampled = rendered.find("\"SampledFrom\"").unwrap();
        assert!(just < strategy && strategy < sampled);
    }
}
