//! Short, pronounceable lookup keys such as `bazumo` or `tekil`.

const CONSONANTS: &[u8] = b"bcdfghjklmnprstvz";
const VOWELS: &[u8] = b"aeiou";

pub const MIN_KEY_LEN: usize = 5;
pub const MAX_KEY_LEN: usize = 6;

/// A random key of 5 or 6 lowercase letters, consonant first, alternating
/// consonant and vowel.
pub fn generate_key() -> String {
    generate_key_with(&mut fastrand::Rng::new())
}

pub fn generate_key_with(rng: &mut fastrand::Rng) -> String {
    let len = rng.usize(MIN_KEY_LEN..=MAX_KEY_LEN);
    (0..len)
        .map(|i| {
            let alphabet = if i % 2 == 0 { CONSONANTS } else { VOWELS };
            alphabet[rng.usize(..alphabet.len())] as char
        })
        .collect()
}

/// Whether `key` has the shape `generate_key` produces.
pub fn is_well_formed(key: &str) -> bool {
    (MIN_KEY_LEN..=MAX_KEY_LEN).contains(&key.len())
        && key.bytes().enumerate().all(|(i, b)| {
            let alphabet = if i % 2 == 0 { CONSONANTS } else { VOWELS };
            alphabet.contains(&b)
        })
}
