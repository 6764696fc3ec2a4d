//! Public URL extraction from tunnel log output.
//!
//! The tunnel reports its public address somewhere inside free-form log
//! text. [`UrlMatcher`] scans the whole log content and returns the first
//! well-formed `https://<token>.<domain>` occurrence.

use std::fmt;

use regex::Regex;

/// Domain used by anonymous cloudflared quick tunnels.
pub const DEFAULT_TUNNEL_DOMAIN: &str = "trycloudflare.com";

/// A public URL found in the tunnel log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch(String);

impl UrlMatch {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UrlMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compiled URL pattern.
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    pattern: Regex,
}

impl UrlMatcher {
    /// Matcher for `https://<token>.<domain>`, where the token is a single
    /// DNS label. The trailing word boundary keeps a half-written domain
    /// (e.g. `.co` of `.com`) or a longer label (`.community`) from matching.
    pub fn for_domain(domain: &str) -> Result<Self, regex::Error> {
        let pattern = format!(r"https://[A-Za-z0-9-]+\.{}\b", regex::escape(domain));
        Self::from_pattern(&pattern)
    }

    /// Matcher from a caller-supplied regular expression.
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// The source pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// First match in `content` that also parses as an absolute URL.
    #[must_use]
    pub fn find(&self, content: &str) -> Option<UrlMatch> {
        self.pattern
            .find_iter(content)
            .map(|m| m.as_str())
            .find(|candidate| url::Url::parse(candidate).is_ok())
            .map(|candidate| UrlMatch(candidate.to_string()))
    }
}
