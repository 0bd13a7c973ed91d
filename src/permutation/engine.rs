//! Shuffle and unshuffle of a single word.
//!
//! Words are handled as sequences of `char`, so a permutation index always
//! names a whole Unicode scalar value and never splits a multi-byte sequence.

use crate::permutation::PermutationError;
use rand::Rng;

/// A shuffled word together with the permutation that produced it.
///
/// `word[i] == original[permutation[i]]` for every character position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shuffled {
    pub word: String,
    pub permutation: Vec<usize>,
}

/// Shuffle the characters of `word` with a Fisher–Yates pass driven by `rng`.
pub fn generate<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Shuffled {
    let chars: Vec<char> = word.chars().collect();
    let mut permutation: Vec<usize> = (0..chars.len()).collect();

    for i in (1..chars.len()).rev() {
        let j = rng.random_range(0..=i);
        permutation.swap(i, j);
    }

    let word = permutation.iter().map(|&p| chars[p]).collect();
    Shuffled { word, permutation }
}

/// Recover the original word from a shuffled word and its permutation.
///
/// The permutation must be a bijection on the word's character positions;
/// anything else is rejected before a single character is placed.
pub fn invert(permuted: &str, permutation: &[usize]) -> Result<String, PermutationError> {
    let chars: Vec<char> = permuted.chars().collect();
    validate(permutation, chars.len())?;

    let mut original = vec!['\0'; chars.len()];
    for (&target, &c) in permutation.iter().zip(&chars) {
        original[target] = c;
    }

    Ok(original.into_iter().collect())
}

/// Check that `permutation` is a bijection on `[0, len)`.
pub fn validate(permutation: &[usize], len: usize) -> Result<(), PermutationError> {
    if permutation.len() != len {
        return Err(PermutationError::LengthMismatch {
            expected: len,
            actual: permutation.len(),
        });
    }

    let mut seen = vec![false; len];
    for (position, &index) in permutation.iter().enumerate() {
        if index >= len {
            return Err(PermutationError::OutOfRange {
                position,
                index,
                len,
            });
        }
        if seen[index] {
            return Err(PermutationError::Duplicate { index });
        }
        seen[index] = true;
    }

    Ok(())
}
