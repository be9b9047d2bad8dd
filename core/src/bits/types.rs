use std::fmt;

/// Ordered binary digits. One `bool` per bit, in transmission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { bits: Vec::with_capacity(bits) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append one byte, most significant bit first.
    #[inline]
    pub fn push_octet(&mut self, value: u8) {
        for shift in (0..8).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    pub fn append(&mut self, other: &mut BitSequence) {
        self.bits.append(&mut other.bits);
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, bool> {
        self.bits.iter()
    }
}

impl From<Vec<bool>> for BitSequence {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl Extend<bool> for BitSequence {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = &'a bool;
    type IntoIter = std::slice::Iter<'a, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

/// Renders as a `0`/`1` string, which keeps test failures readable.
impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum BitsError {
    /// A text character does not fit in one 8-bit code point.
    NotOctet { ch: char, index: usize },
}

impl fmt::Display for BitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitsError::NotOctet { ch, index } => {
                write!(f, "character {:?} at index {} is not an 8-bit code point", ch, index)
            }
        }
    }
}

impl std::error::Error for BitsError {}
