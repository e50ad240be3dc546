//! Constants for hash functions

/// Output size of SM3 in bytes
pub const SM3_OUTPUT_SIZE: usize = 32;

/// Internal block size of SM3 in bytes
pub const SM3_BLOCK_SIZE: usize = 64;

/// Number of 32-bit words in the SM3 chaining state
pub const SM3_STATE_WORDS: usize = 8;

/// Number of compression rounds per SM3 block
pub const SM3_ROUNDS: usize = 64;
