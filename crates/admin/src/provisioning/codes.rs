//! Bulk discount code generation.

use std::collections::HashSet;

use rand::Rng;

/// Smallest generated suffix.
pub const MIN_SUFFIX: u16 = 1000;
/// Largest generated suffix.
pub const MAX_SUFFIX: u16 = 9999;

const SUFFIX_SPACE: usize = (MAX_SUFFIX - MIN_SUFFIX + 1) as usize;

/// Generate a code of the form `{prefix}-DDDD`.
///
/// Not cryptographically secure; codes are guessable and only unique by
/// chance.
#[must_use]
pub fn generate_code(prefix: &str) -> String {
    let suffix: u16 = rand::rng().random_range(MIN_SUFFIX..=MAX_SUFFIX);
    format!("{prefix}-{suffix}")
}

/// Issues codes for one bulk batch without repeating a suffix.
///
/// Once all 9000 suffixes are used, further codes are drawn at random and
/// may repeat. Codes already present in the store are not checked.
#[derive(Debug)]
pub struct CodeBatch<'a> {
    prefix: &'a str,
    issued: HashSet<String>,
}

impl<'a> CodeBatch<'a> {
    /// Start a batch for `prefix`.
    #[must_use]
    pub fn new(prefix: &'a str) -> Self {
        Self {
            prefix,
            issued: HashSet::new(),
        }
    }

    /// Next code in the batch.
    pub fn next_code(&mut self) -> String {
        if self.issued.len() >= SUFFIX_SPACE {
            return generate_code(self.prefix);
        }
        loop {
            let code = generate_code(self.prefix);
            if self.issued.insert(code.clone()) {
                return code;
            }
        }
    }

    /// Generate `quantity` codes.
    pub fn take(&mut self, quantity: usize) -> Vec<String> {
        (0..quantity).map(|_| self.next_code()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn suffix_of(code: &str) -> u16 {
        code.rsplit_once('-').unwrap().1.parse().unwrap()
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..200 {
            let code = generate_code("SAVE");
            assert!(code.starts_with("SAVE-"));
            assert_eq!(code.len(), "SAVE-".len() + 4);
            let suffix = suffix_of(&code);
            assert!((MIN_SUFFIX..=MAX_SUFFIX).contains(&suffix));
        }
    }

    #[test]
    fn test_prefix_is_kept_verbatim() {
        let code = generate_code("SPRING-SALE");
        assert!(code.starts_with("SPRING-SALE-"));
    }

    #[test]
    fn test_batch_codes_match_generated_format() {
        let mut batch = CodeBatch::new("SAVE");
        for code in batch.take(50) {
            assert!(code.starts_with("SAVE-"));
            assert_eq!(code.len(), generate_code("SAVE").len());
            assert!((MIN_SUFFIX..=MAX_SUFFIX).contains(&suffix_of(&code)));
        }
    }

    #[test]
    fn test_batch_codes_are_distinct() {
        let mut batch = CodeBatch::new("BULK");
        let codes = batch.take(500);
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), 500);
    }

    #[test]
    fn test_batch_covers_whole_suffix_space() {
        let mut batch = CodeBatch::new("X");
        let suffixes: HashSet<u16> = batch.take(SUFFIX_SPACE).iter().map(|c| suffix_of(c)).collect();
        assert_eq!(suffixes.len(), SUFFIX_SPACE);

        // Exhausted: still yields well-formed codes.
        let extra = batch.next_code();
        assert!((MIN_SUFFIX..=MAX_SUFFIX).contains(&suffix_of(&extra)));
    }
}
