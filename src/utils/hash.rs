//! Hashing utilities using FxHash.
//!
//! Uses `rustc_hash::FxHasher` for fast, deterministic hashing of small
//! data. Content directory signatures are built by feeding file names and
//! metadata into one hasher.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

/// Incremental hasher for multi-part signatures.
#[derive(Default)]
pub struct Signature {
    hasher: FxHasher,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push_bytes(&mut self, data: impl AsRef<[u8]>) {
        self.hasher.write(data.as_ref());
    }

    #[inline]
    pub fn push_u64(&mut self, value: u64) {
        self.hasher.write_u64(value);
    }

    #[inline]
    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_deterministic() {
        assert_eq!(compute("hello"), compute("hello"));
        assert_ne!(compute("hello"), compute("world"));
    }

    #[test]
    fn test_signature_order_sensitive() {
        let mut a = Signature::new();
        a.push_bytes("one");
        a.push_u64(7);

        let mut b = Signature::new();
        b.push_u64(7);
        b.push_bytes("one");

        assert_ne!(a.finish(), b.finish());
    }
}
