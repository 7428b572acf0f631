// src/resolve/directive.rs

use regex::Regex;

/// The version placeholder. Literal, case-sensitive, no arguments.
pub const VERSION_TOKEN: &str = "@version";

/// One `@include{...}` occurrence inside a source text.
///
/// `start..end` is the byte range of the whole directive (including the
/// `@include{` prefix and closing brace); `path` is the argument between the
/// braces, to be joined against the directory of the containing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub path: &'t str,
}

/// Compiled matcher for the directive syntax.
///
/// Matching is purely textual: a directive inside a comment or string
/// literal of the underlying content is still a directive. The include
/// argument is matched non-greedily up to the first `}`, so paths containing
/// a closing brace are not supported.
#[derive(Debug, Clone)]
pub struct DirectiveScanner {
    include: Regex,
}

impl DirectiveScanner {
    pub fn new() -> Self {
        Self {
            include: Regex::new(r"@include\{(.+?)\}").expect("include regex is valid"),
        }
    }

    /// Iterate over `@include{...}` occurrences in `text`, left to right.
    pub fn includes<'t>(&'t self, text: &'t str) -> impl Iterator<Item = IncludeMatch<'t>> + 't {
        self.include.captures_iter(text).map(|caps| {
            let full = caps.get(0).expect("match always has group 0");
            let arg = caps.get(1).expect("include regex has one capture group");
            IncludeMatch {
                start: full.start(),
                end: full.end(),
                path: arg.as_str(),
            }
        })
    }

    /// Replace every `@version` occurrence in `text` with `version`.
    pub fn substitute_version(&self, text: &str, version: &str) -> String {
        text.replace(VERSION_TOKEN, version)
    }
}

impl Default for DirectiveScanner {
    fn default() -> Self {
        Self::new()
    }
}
