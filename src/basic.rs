//! Basic data: the closed primitive encoding every template is stored in.
//!
//! Example stores only ever see these three shapes, so they can persist
//! any strategy's templates without knowing anything about the strategy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive encoding of a template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicData {
    Null,
    Integer(i128),
    Sequence(Vec<BasicData>),
}

/// Discriminant of [`BasicData`], used in shape checks and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicKind {
    Null,
    Integer,
    Sequence,
}

impl BasicData {
    pub fn kind(&self) -> BasicKind {
        match self {
            BasicData::Null => BasicKind::Null,
            BasicData::Integer(_) => BasicKind::Integer,
            BasicData::Sequence(_) => BasicKind::Sequence,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, BasicData::Null)
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            BasicData::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[BasicData]> {
        match self {
            BasicData::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Nesting depth; scalars have depth zero.
    pub fn depth(&self) -> usize {
        match self {
            BasicData::Sequence(items) => 1 + items.iter().map(BasicData::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<i128> for BasicData {
    fn from(i: i128) -> Self {
        BasicData::Integer(i)
    }
}

impl From<i64> for BasicData {
    fn from(i: i64) -> Self {
        BasicData::Integer(i as i128)
    }
}

impl From<Vec<BasicData>> for BasicData {
    fn from(items: Vec<BasicData>) -> Self {
        BasicData::Sequence(items)
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicKind::Null => write!(f, "null"),
            BasicKind::Integer => write!(f, "integer"),
            BasicKind::Sequence => write!(f, "sequence"),
        }
    }
}

impl fmt::Display for BasicData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicData::Null => write!(f, "null"),
            BasicData::Integer(i) => write!(f, "{}", i),
            BasicData::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(BasicData::Null.kind(), BasicKind::Null);
        assert_eq!(BasicData::from(4i64).kind(), BasicKind::Integer);
        assert_eq!(BasicData::Sequence(vec![]).kind(), BasicKind::Sequence);
    }

    #[test]
    fn display_is_compact() {
        let data = BasicData::Sequence(vec![
            BasicData::Integer(-1),
            BasicData::Null,
            BasicData::Sequence(vec![BasicData::Integer(2)]),
        ]);
        assert_eq!(data.to_string(), "[-1, null, [2]]");
    }

    #[test]
    fn depth_counts_nesting() {
        assert_eq!(BasicData::Integer(1).depth(), 0);
        assert_eq!(BasicData::Sequence(vec![]).depth(), 1);
        let nested = BasicData::Sequence(vec![BasicData::Sequence(vec![BasicData::Null])]);
        assert_eq!(nested.depth(), 2);
    }
}
