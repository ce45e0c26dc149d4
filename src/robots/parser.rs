//! Robots.txt parser implementation
//!
//! This module provides functionality for evaluating robots.txt content using
//! the robotstxt crate, plus extraction of `Sitemap:` directives.

use robotstxt::DefaultMatcher;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rules {
    AllowAll,
    DenyAll,
    Content(String),
}

/// Parsed robots.txt data
///
/// Either a real robots.txt body, or one of the two blanket policies used
/// when no usable file exists (missing file, access refused, fetch failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRobots {
    rules: Rules,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            rules: Rules::Content(content.to_string()),
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// Used when the site publishes no robots.txt.
    pub fn allow_all() -> Self {
        Self {
            rules: Rules::AllowAll,
        }
    }

    /// Creates a ParsedRobots that denies everything
    ///
    /// Used when robots.txt access is refused or cannot be retrieved.
    pub fn deny_all() -> Self {
        Self {
            rules: Rules::DenyAll,
        }
    }

    /// Returns the raw robots.txt content, if this came from a real file
    pub fn content(&self) -> Option<&str> {
        match &self.rules {
            Rules::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The user agent token (`*` for the generic group)
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match &self.rules {
            Rules::AllowAll => true,
            Rules::DenyAll => false,
            Rules::Content(content) if content.trim().is_empty() => true,
            Rules::Content(content) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, user_agent, url)
            }
        }
    }

    /// Returns the sitemap URLs declared with `Sitemap:` directives
    ///
    /// Directive names are case-insensitive; values are trimmed and empty
    /// values skipped. Declaration order is preserved.
    pub fn sitemaps(&self) -> Vec<String> {
        let Some(content) = self.content() else {
            return Vec::new();
        };

        content
            .lines()
            .filter_map(|line| {
                let (key, value) = line.trim().split_once(':')?;
                if !key.trim().eq_ignore_ascii_case("sitemap") {
                    return None;
                }
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            })
            .collect()
    }
}
