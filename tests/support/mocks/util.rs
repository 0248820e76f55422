// tests/support/mocks/util.rs
use std::sync::atomic::{AtomicUsize, Ordering};

use recipe_box::application::ports::util::TokenGenerator;

#[derive(Clone)]
pub struct FixedToken(pub &'static str);

impl TokenGenerator for FixedToken {
    fn unique_token(&self) -> String {
        self.0.to_string()
    }
}

/// Deterministic but never repeating: `t1`, `t2`, ...
#[derive(Default)]
pub struct SequentialTokens {
    next: AtomicUsize,
}

impl TokenGenerator for SequentialTokens {
    fn unique_token(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("t{n}")
    }
}
