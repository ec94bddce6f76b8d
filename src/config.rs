//! The one crate-wide parameter the path algebra depends on: k.
//!
//! Everything downstream (vertex size, the meaning of "truncated" in
//! `truncSize()`) is defined relative to k, so it is validated once here
//! rather than threaded loose through every constructor.

use std::fmt;

use crate::error::ConfigError;

/// A validated, odd k-mer length shared by every `Vertex`/`Edge` in a
/// [`crate::datastr::graph::Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KmerLen(usize);

impl KmerLen {
    pub fn new(k: usize) -> Result<KmerLen, ConfigError> {
        if k == 0 {
            return Err(ConfigError::Zero);
        }
        if k % 2 == 0 {
            return Err(ConfigError::Even(k));
        }
        Ok(KmerLen(k))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for KmerLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_even_and_zero() {
        assert!(KmerLen::new(0).is_err());
        assert!(KmerLen::new(4).is_err());
        assert!(KmerLen::new(21).is_ok());
    }
}
