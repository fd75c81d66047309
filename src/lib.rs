//! # searchstrategy
//!
//! The generation core of a property-based testing engine.
//!
//! A caller describes the data it wants with a [`Descriptor`]. A
//! [`StrategyTable`] resolves the descriptor to a [`SearchStrategy`], which
//! then generates values in two stages: a [`Parameter`] is drawn once per
//! episode, and [`Template`]s are drawn under it. Templates are reified into
//! the [`Value`]s a test receives, or encoded as [`BasicData`] so an example
//! store can persist them and a later run can replay them.
//!
//! ```rust
//! use rand::SeedableRng;
//! use searchstrategy::{standard_table, ChaCha8Rng, Descriptor, SearchStrategy};
//!
//! let strategy = standard_table()
//!     .resolve(&Descriptor::sampled_from(vec!["a", "b", "c"]))
//!     .unwrap();
//! let mut random = ChaCha8Rng::seed_from_u64(0);
//! let parameter = strategy.draw_parameter(&mut random);
//! let template = strategy.produce_template(&mut random, &parameter);
//!
//! let stored = strategy.to_basic(&template);
//! assert_eq!(strategy.from_basic(&stored), Ok(template));
//! ```
//!
//! The shrinking search, the example database and the test runner are not
//! part of this crate; they consume the contract defined here.

pub mod basic;
pub mod codec;
pub mod descriptors;
pub mod distributions;
pub mod errors;
pub mod params;
pub mod settings;
pub mod strategy;
pub mod table;
pub mod values;

pub use rand_chacha::ChaCha8Rng;

pub use basic::{BasicData, BasicKind};
pub use descriptors::{Descriptor, DescriptorKind};
pub use errors::{check_data_type, BadData, DecodeResult, ResolutionError, TypeMismatch};
pub use params::{Parameter, ParameterSpace};
pub use settings::Settings;
pub use strategy::{
    BoolStrategy, Cardinality, JustStrategy, RandomStrategy, SampledFromStrategy, SearchStrategy,
    Template,
};
pub use table::{standard_table, StrategyRef, StrategyTable, StrategyTableBuilder};
pub use values::{RandomWithSeed, Value};
