//! HTML stripping for server-rendered post content
//!
//! The server returns post content as rendered HTML. Before that content
//! is stored it goes through a single stripping policy: every tag is
//! removed, text is kept. Create, Read and Update all use this same policy
//! so stored state matches what a later read would produce.

use std::collections::HashSet;

/// Strip all HTML markup, keeping text content.
///
/// Idempotent: `strip_html(strip_html(x)) == strip_html(x)`.
pub fn strip_html(input: &str) -> String {
    let mut policy = ammonia::Builder::default();
    policy.tags(HashSet::new());
    policy.clean(input).to_string()
}
