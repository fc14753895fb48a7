//! Shorthand symbol expansion for query strings.
//!
//! Rewrites the shorthand tokens accepted in user-written queries into the
//! canonical syntax of the query evaluator:
//!
//! - `this` / `self` -> ` $ ` (the current context node)
//! - `:name`, `:key`, `:value` -> `.name`, `.key`, `.value`
//! - `:root` -> `$`
//! - `:match`, `:text` -> `match` / `text` when already attached to an
//!   accessor (`(`, `[` or `.` right before the colon), `.match` / `.text`
//!   otherwise
//!
//! # Examples
//!
//! ```
//! use query_symbols::core::symbols::transform;
//!
//! assert_eq!(transform("self:key"), " $ .key");
//! assert_eq!(transform("foo(:match)"), "foo(match)");
//! assert_eq!(transform("foo :match"), "foo .match");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-word `this` / `self`. Word characters are ASCII only, so a
/// non-ASCII letter next to the keyword still counts as a break.
static CONTEXT_REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)(?:this|self)(?-u:\b)").expect("Valid regex pattern")
});

/// Canonical context node, padded on both sides.
const CONTEXT_NODE: &str = " $ ";

/// Plain one-for-one substitutions, in application order.
const LITERAL_RULES: [(&str, &str); 4] = [
    (":name", ".name"),
    (":key", ".key"),
    (":value", ".value"),
    (":root", "$"),
];

/// Selectors whose separator depends on what precedes the colon.
const CONTEXTUAL_SELECTORS: [&str; 2] = ["match", "text"];

/// A shorthand token and the canonical form it expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShorthandSymbol {
    pub shorthand: &'static str,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Every shorthand understood by [`transform`], in rule order.
pub const SHORTHAND_SYMBOLS: &[ShorthandSymbol] = &[
    ShorthandSymbol {
        shorthand: "this",
        canonical: " $ ",
        description: "reference to the current context node",
    },
    ShorthandSymbol {
        shorthand: "self",
        canonical: " $ ",
        description: "reference to the current context node",
    },
    ShorthandSymbol {
        shorthand: ":name",
        canonical: ".name",
        description: "name of the current node",
    },
    ShorthandSymbol {
        shorthand: ":key",
        canonical: ".key",
        description: "the 'key' property",
    },
    ShorthandSymbol {
        shorthand: ":value",
        canonical: ".value",
        description: "the 'value' property",
    },
    ShorthandSymbol {
        shorthand: ":root",
        canonical: "$",
        description: "the current root",
    },
    ShorthandSymbol {
        shorthand: ":match",
        canonical: "match | .match",
        description: "match captured by a regular expression",
    },
    ShorthandSymbol {
        shorthand: ":text",
        canonical: "text | .text",
        description: "body text of the node",
    },
];

/// Expand every shorthand symbol in `input`.
///
/// The input is trimmed first. Everything that is not a recognised shorthand
/// is copied through verbatim; the query itself is never validated.
pub fn transform(input: &str) -> String {
    let trimmed = trim_query(input);

    let mut query = CONTEXT_REFERENCE_REGEX
        .replace_all(trimmed, CONTEXT_NODE)
        .into_owned();

    for (shorthand, canonical) in LITERAL_RULES {
        query = query.replace(shorthand, canonical);
    }

    for selector in CONTEXTUAL_SELECTORS {
        query = expand_contextual_selector(&query, selector);
    }

    query
}

/// Strip surrounding whitespace, including a byte order mark.
pub fn trim_query(input: &str) -> &str {
    input.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Rewrite every `:<selector>`, looking one character back from the colon.
///
/// Offsets come from the string as it was when this pass started, so
/// replacements made earlier in the same pass never shift the lookback.
fn expand_contextual_selector(query: &str, selector: &str) -> String {
    let token = format!(":{}", selector);
    let mut result = String::with_capacity(query.len());
    let mut copied_up_to = 0;

    for (offset, _) in query.match_indices(&token) {
        result.push_str(&query[copied_up_to..offset]);
        if !is_attached_to_accessor(query, offset) {
            result.push('.');
        }
        result.push_str(selector);
        copied_up_to = offset + token.len();
    }

    result.push_str(&query[copied_up_to..]);
    result
}

/// True when the character right before `colon_offset` opens a call or index,
/// or is itself a member accessor. A colon at the start has nothing to attach to.
fn is_attached_to_accessor(query: &str, colon_offset: usize) -> bool {
    query[..colon_offset]
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c, '(' | '[' | '.'))
}
