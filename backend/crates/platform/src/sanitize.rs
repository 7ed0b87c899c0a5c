//! HTML sanitization for user-authored text
//!
//! The policy is built once at startup and shared immutably; callers depend on
//! the [`Sanitize`] trait so tests can swap in another policy.

use ammonia::Builder;

/// Free-text sanitizer
pub trait Sanitize: Send + Sync {
    fn sanitize(&self, input: &str) -> String;
}

/// User-generated-content policy built on `ammonia`
///
/// Keeps formatting markup (paragraphs, lists, emphasis, links, code) and
/// strips scripts, event handlers and dangerous URL schemes. Links get
/// `rel="noopener noreferrer nofollow"`.
pub struct HtmlSanitizer {
    policy: Builder<'static>,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        let mut policy = Builder::default();
        policy.link_rel(Some("noopener noreferrer nofollow"));
        Self { policy }
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitize for HtmlSanitizer {
    fn sanitize(&self, input: &str) -> String {
        self.policy.clean(input).to_string()
    }
}

/// Passes text through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSanitizer;

impl Sanitize for NoopSanitizer {
    fn sanitize(&self, input: &str) -> String {
        input.to_string()
    }
}
