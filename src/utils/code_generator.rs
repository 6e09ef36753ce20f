//! Short identifier generation.
//!
//! Identifiers are drawn from the OS CSPRNG and encoded as URL-safe base64
//! without padding, so every character carries 6 bits of entropy. The default
//! 12-character identifier holds 72 random bits.

use base64::Engine as _;

/// Default identifier length in characters.
pub const DEFAULT_CODE_LENGTH: usize = 12;

/// Shortest identifier that may be configured.
pub const MIN_CODE_LENGTH: usize = 12;

/// Longest identifier that may be configured.
pub const MAX_CODE_LENGTH: usize = 64;

/// Source of fresh short identifiers.
///
/// Implementations are pure generators; the repository is responsible for
/// rejecting the (improbable) collision with an existing identifier.
pub trait ShortIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Cryptographically random generator of fixed-length identifiers.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator producing `length` characters, clamped to
    /// [`MIN_CODE_LENGTH`]..=[`MAX_CODE_LENGTH`].
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl ShortIdGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code_with_length(self.length)
    }
}

/// Generates a random identifier of exactly `length` characters from the
/// URL-safe base64 alphabet (`A-Z a-z 0-9 - _`).
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
fn generate_code_with_length(length: usize) -> String {
    let mut buffer = vec![0u8; length.div_ceil(4) * 3];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
    code.truncate(length);
    code
}
