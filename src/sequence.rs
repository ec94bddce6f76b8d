//! 2-bit DNA sequences: the alphabet `{A,C,G,T}` encoded as `{0,1,2,3}`.
//!
//! `Sequence` is the leaf layer every other type in this crate eventually
//! bottoms out on: vertex labels, edge labels, and the nucleotide strings
//! reconstructed from a `GraphPath` are all `Sequence`s.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A single nucleotide, one of `A=0, C=1, G=2, T=3`.
pub type Nucl = u8;

fn complement(n: Nucl) -> Nucl {
    3 - n
}

fn nucl_to_char(n: Nucl) -> char {
    match n {
        0 => 'A',
        1 => 'C',
        2 => 'G',
        3 => 'T',
        _ => unreachable!("nucleotide out of range: {}", n),
    }
}

/// Shared with `crate::path`'s line-format parser, which needs to turn a
/// rendered edge label back into the nucleotide `getOutgoing` looks up by.
pub(crate) fn char_to_nucl(c: char) -> Result<Nucl, ParseError> {
    match c {
        'A' | 'a' => Ok(0),
        'C' | 'c' => Ok(1),
        'G' | 'g' => Ok(2),
        'T' | 't' => Ok(3),
        _ => Err(ParseError::BadNucleotide(c)),
    }
}

/// A finite ordered string over `{A,C,G,T}`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    nucls: Vec<Nucl>,
}

impl Sequence {
    pub fn new(nucls: Vec<Nucl>) -> Sequence {
        debug_assert!(nucls.iter().all(|&n| n < 4));
        Sequence { nucls }
    }

    pub fn empty() -> Sequence {
        Sequence { nucls: Vec::new() }
    }

    pub fn size(&self) -> usize {
        self.nucls.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.nucls.is_empty()
    }

    pub fn at(&self, i: usize) -> Nucl {
        self.nucls[i]
    }

    pub fn first(&self) -> Option<Nucl> {
        self.nucls.first().copied()
    }

    pub fn last(&self) -> Option<Nucl> {
        self.nucls.last().copied()
    }

    /// Half-open slice `[l, r)`.
    pub fn subseq(&self, l: usize, r: usize) -> Sequence {
        debug_assert!(l <= r && r <= self.size());
        Sequence::new(self.nucls[l..r].to_vec())
    }

    pub fn prefix(&self, k: usize) -> Sequence {
        self.subseq(0, k)
    }

    pub fn suffix(&self, k: usize) -> Sequence {
        self.subseq(self.size() - k, self.size())
    }

    pub fn concat(&self, other: &Sequence) -> Sequence {
        let mut nucls = Vec::with_capacity(self.size() + other.size());
        nucls.extend_from_slice(&self.nucls);
        nucls.extend_from_slice(&other.nucls);
        Sequence::new(nucls)
    }

    /// Reverse-complement: reverse order and map `x -> 3 - x`.
    pub fn rc(&self) -> Sequence {
        Sequence::new(self.nucls.iter().rev().map(|&n| complement(n)).collect())
    }
}

/// Accumulates `Sequence`/slice fragments without the quadratic cost of
/// repeated `concat`. Mirrors the `SequenceBuilder` this crate's projection
/// code (`GraphPath::seq`, `GraphPath::trunc_seq`) builds its result with.
#[derive(Default)]
pub struct SequenceBuilder {
    nucls: Vec<Nucl>,
}

impl SequenceBuilder {
    pub fn new() -> SequenceBuilder {
        SequenceBuilder::default()
    }

    pub fn append(&mut self, seq: Sequence) -> &mut Self {
        self.nucls.extend(seq.nucls);
        self
    }

    pub fn build(self) -> Sequence {
        Sequence::new(self.nucls)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence({})", self)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &n in &self.nucls {
            write!(f, "{}", nucl_to_char(n))?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Sequence, ParseError> {
        s.chars().map(char_to_nucl).collect::<Result<Vec<_>, _>>().map(Sequence::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_is_an_involution() {
        let s: Sequence = "AATTCCGG".parse().unwrap();
        assert_eq!(s.rc().rc(), s);
    }

    #[test]
    fn rc_reverses_and_complements() {
        let s: Sequence = "AACG".parse().unwrap();
        assert_eq!(s.rc().to_string(), "CGTT");
    }

    #[test]
    fn rc_of_concat_is_swapped_rcs() {
        let a: Sequence = "AAT".parse().unwrap();
        let b: Sequence = "CCG".parse().unwrap();
        assert_eq!(a.concat(&b).rc(), b.rc().concat(&a.rc()));
    }

    #[test]
    fn subseq_prefix_suffix() {
        let s: Sequence = "ACGTACGT".parse().unwrap();
        assert_eq!(s.subseq(2, 5).to_string(), "GTA");
        assert_eq!(s.prefix(3).to_string(), "ACG");
        assert_eq!(s.suffix(3).to_string(), "CGT");
    }

    #[test]
    fn rejects_non_dna_characters() {
        assert!("ACGN".parse::<Sequence>().is_err());
    }
}
