//! Name hashing shared with the catalog generator.
//!
//! The bucket keys stored in a catalog document were produced by the
//! generator with exactly this function, so any change here breaks
//! lookups against existing documents.

/// Number of buckets in every [`HashTable`](crate::HashTable).
pub const HASH_SIZE: usize = 2100;

/// Modulus of the rolling name hash. Every hash code is below this value.
pub const HASH_PRIME: u32 = 1777;

/// Hash a name into `[0, HASH_PRIME)`.
///
/// Operates on the UTF-8 bytes of `name` as unsigned values: the first byte
/// seeds the accumulator, every following byte is folded in with
/// `h = 2h + b`, reduced by repeated subtraction of [`HASH_PRIME`].
///
/// Returns `None` for the empty string, which has no hash code.
pub fn hash_name(name: &str) -> Option<u32> {
    let (&first, rest) = name.as_bytes().split_first()?;
    let mut h = u32::from(first);
    for &byte in rest {
        h = h + h + u32::from(byte);
        while h >= HASH_PRIME {
            h -= HASH_PRIME;
        }
    }
    Some(h)
}
