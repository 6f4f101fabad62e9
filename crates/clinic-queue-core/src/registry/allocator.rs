//! Queue token allocation.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{ClinicError, ClinicResult};
use crate::models::Token;

/// Issues strictly increasing tokens. Values are never reused.
///
/// The counter never wraps: once the next value would pass `u32::MAX`,
/// [`TokenAllocator::next`] returns [`ClinicError::TokensExhausted`].
#[derive(Debug)]
pub struct TokenAllocator {
    next: AtomicU32,
}

impl TokenAllocator {
    /// Create an allocator whose first token is `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            next: AtomicU32::new(seed),
        }
    }

    /// Take the next token.
    pub fn next(&self) -> ClinicResult<Token> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map(Token::new)
            .map_err(|_| ClinicError::TokensExhausted)
    }

    /// The token the next call to [`TokenAllocator::next`] will return.
    pub fn peek(&self) -> Token {
        Token::new(self.next.load(Ordering::SeqCst))
    }
}
