use std::collections::BTreeSet;

use serde::Serialize;

/// One classified configuration token.
///
/// Configuration arrives as a free-form set of strings; classification into
/// this closed set happens once, independent of any AST concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionToken {
    /// Select the largest candidate.
    Max,

    /// Select the smallest candidate.
    Min,

    /// Select the middle candidate.
    Median,

    /// Select the closest candidate below the original.
    CloseLess,

    /// Select the closest candidate above the original.
    CloseMore,

    /// `part N1 N2 ...` directive; only the valid indices survive parsing.
    Partitions(Vec<u8>),

    /// Anything else: a literal value for the explicit allow-list.
    Value(String),
}

/// Classify one raw configuration token.
///
/// Keywords match case-insensitively. Malformed numbers inside a `part`
/// directive are reported to stderr and skipped; the directive itself is
/// still consumed.
pub fn classify_option(raw: &str) -> OptionToken {
    let t = raw.trim();

    if t.eq_ignore_ascii_case("MAX") {
        return OptionToken::Max;
    }
    if t.eq_ignore_ascii_case("MIN") {
        return OptionToken::Min;
    }
    if t.eq_ignore_ascii_case("MEDIAN") {
        return OptionToken::Median;
    }
    if t.eq_ignore_ascii_case("CLOSE_LESS") {
        return OptionToken::CloseLess;
    }
    if t.eq_ignore_ascii_case("CLOSE_MORE") {
        return OptionToken::CloseMore;
    }

    if let Some(parts) = parse_partition_directive(t) {
        return OptionToken::Partitions(parts);
    }

    OptionToken::Value(raw.to_string())
}

/// Parse a `part N1 N2 ...` directive.
///
/// Returns `None` when the token is not a partition directive at all (wrong
/// keyword, or no numbers follow), so it falls through to the allow-list.
fn parse_partition_directive(token: &str) -> Option<Vec<u8>> {
    let mut words = token.split_whitespace();

    let keyword = words.next()?;
    if !keyword.eq_ignore_ascii_case("part") {
        return None;
    }

    let numbers: Vec<&str> = words.collect();
    if numbers.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    for word in numbers {
        match word.parse::<i64>() {
            Ok(n) if (1..=10).contains(&n) => parts.push(n as u8),
            Ok(n) => {
                eprintln!("no partition number {n}, skipping; there are only 10 partitions");
            }
            Err(_) => {
                eprintln!("cannot convert {word:?} to an integer, skipping");
            }
        }
    }

    Some(parts)
}

/// Immutable selection policy built once at configuration time.
///
/// Passed by reference into every candidate computation; nothing reads
/// mutable operator state during selection.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SelectionPolicy {
    /// Emit the largest candidate.
    pub choose_max: bool,

    /// Emit the smallest candidate.
    pub choose_min: bool,

    /// Emit the middle candidate.
    pub choose_median: bool,

    /// Emit the closest candidate below the original value.
    pub close_less: bool,

    /// Emit the closest candidate above the original value.
    pub close_more: bool,

    /// Decile buckets to emit, always within 1..=10.
    pub partitions: BTreeSet<u8>,

    /// When non-empty, only candidates whose normalized or raw text appears
    /// here survive (applied before any selection flag).
    pub value_allow_list: BTreeSet<String>,

    /// When non-empty, only literals whose source token appears here are
    /// eligible for mutation at all.
    pub domain_allow_list: BTreeSet<String>,
}

impl SelectionPolicy {
    /// Build a policy from raw option tokens.
    ///
    /// Every recognized keyword and partition directive is consumed; all
    /// remaining tokens become the explicit value allow-list. The domain
    /// allow-list comes from a separate configuration surface and starts
    /// empty.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = SelectionPolicy::default();

        for raw in tokens {
            match classify_option(raw.as_ref()) {
                OptionToken::Max => policy.choose_max = true,
                OptionToken::Min => policy.choose_min = true,
                OptionToken::Median => policy.choose_median = true,
                OptionToken::CloseLess => policy.close_less = true,
                OptionToken::CloseMore => policy.close_more = true,
                OptionToken::Partitions(parts) => policy.partitions.extend(parts),
                OptionToken::Value(v) => {
                    policy.value_allow_list.insert(v);
                }
            }
        }

        policy
    }

    /// True when any selection flag or partition bucket is set.
    ///
    /// Without one, the operator returns the filtered pool unchanged.
    pub fn has_selection(&self) -> bool {
        self.choose_max
            || self.choose_min
            || self.choose_median
            || self.close_less
            || self.close_more
            || !self.partitions.is_empty()
    }
}
