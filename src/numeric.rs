use std::cmp::Ordering;

use crate::node::{ExprKind, ExpressionNode};
use crate::policy::SelectionPolicy;

/// Number of decile buckets used by partition selection.
pub const PARTITION_BUCKETS: usize = 10;

/// Numeric value of a candidate, tagged by its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateValue {
    /// Value that came from an integer or character literal.
    Int(i64),

    /// Value that came from a floating-point literal.
    Float(f64),
}

impl CandidateValue {
    fn as_f64(self) -> f64 {
        match self {
            CandidateValue::Int(v) => v as f64,
            CandidateValue::Float(v) => v,
        }
    }

    /// Total order over mixed candidates.
    ///
    /// Int/Int compares exactly; any comparison involving a float goes
    /// through f64. NaN never enters a pool (parse rejects it), so ties on
    /// incomparable values collapse to Equal.
    pub fn compare(self, other: CandidateValue) -> Ordering {
        match (self, other) {
            (CandidateValue::Int(a), CandidateValue::Int(b)) => a.cmp(&b),
            _ => self
                .as_f64()
                .partial_cmp(&other.as_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// One replacement candidate: numeric value plus the normalized text that
/// will be emitted if it is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    pub text: String,
    pub value: CandidateValue,
}

/// Parse an integer or character literal to its i64 value.
///
/// Accepts decimal, hex (`0x`), binary (`0b`) and octal (leading `0`)
/// spellings, an optional leading sign, and the usual `u`/`l` suffixes.
/// Character literals evaluate to their code point.
pub fn parse_int_token(token: &str) -> Option<i64> {
    let t = token.trim();

    if t.starts_with('\'') {
        return parse_char_literal(t);
    }

    let (negative, t) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t),
    };

    let t = t.trim_end_matches(['u', 'U', 'l', 'L']);
    if t.is_empty() {
        return None;
    }

    let value = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()?
    } else if t.len() > 1 && t.starts_with('0') {
        i64::from_str_radix(&t[1..], 8).ok()?
    } else {
        t.parse::<i64>().ok()?
    };

    Some(if negative { -value } else { value })
}

fn parse_char_literal(token: &str) -> Option<i64> {
    let body = token.strip_prefix('\'')?.strip_suffix('\'')?;

    let mut chars = body.chars();
    let value = match chars.next()? {
        '\\' => match chars.next()? {
            'n' => 10,
            't' => 9,
            'r' => 13,
            '0' => 0,
            '\\' => 92,
            '\'' => 39,
            '"' => 34,
            _ => return None,
        },
        c => c as i64,
    };

    // Multi-character literals are implementation-defined; reject them.
    if chars.next().is_some() {
        return None;
    }

    Some(value)
}

/// Parse a floating-point literal to its f64 value.
///
/// Strips the `f`/`l` suffix and rejects non-finite results so NaN and
/// infinities never enter a candidate pool.
pub fn parse_float_token(token: &str) -> Option<f64> {
    let t = token.trim().trim_end_matches(['f', 'F', 'l', 'L']);
    if t.is_empty() {
        return None;
    }

    let value = t.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(value)
}

/// Normalized textual form of a numeric literal.
///
/// Integers and characters normalize to their decimal value, floats to the
/// shortest `f64` rendering. Normalization is idempotent: feeding the output
/// back in yields the same string.
pub fn normalize_numeric_token(token: &str, kind: ExprKind) -> Option<String> {
    match kind {
        ExprKind::Floating => parse_float_token(token).map(render_float),
        _ => parse_int_token(token).map(|v| v.to_string()),
    }
}

/// Normalized form of a literal node's spelling.
pub fn normalize_node(node: &ExpressionNode) -> Option<String> {
    normalize_numeric_token(&node.spelling, node.kind)
}

fn render_float(value: f64) -> String {
    format!("{value}")
}

/// Pool of replacement candidates split by numeric kind.
///
/// Candidates are accumulated unsorted; every selection routine works on a
/// freshly sorted view so the pool itself stays append-only.
#[derive(Debug, Default)]
pub struct NumericCandidatePool {
    ints: Vec<PoolEntry>,
    floats: Vec<PoolEntry>,
}

impl NumericCandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_int(&mut self, text: String, value: i64) {
        self.ints.push(PoolEntry {
            text,
            value: CandidateValue::Int(value),
        });
    }

    pub fn push_float(&mut self, text: String, value: f64) {
        self.floats.push(PoolEntry {
            text,
            value: CandidateValue::Float(value),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty() && self.floats.is_empty()
    }

    pub fn has_floats(&self) -> bool {
        !self.floats.is_empty()
    }

    fn sorted(entries: &[PoolEntry]) -> Vec<PoolEntry> {
        let mut v = entries.to_vec();
        v.sort_by(|a, b| a.value.compare(b.value));
        v
    }

    /// Ascending interleave of the sorted integer and float candidates.
    ///
    /// On an exact numeric tie the integer-origin element comes first.
    pub fn merged(&self) -> Vec<PoolEntry> {
        let ints = Self::sorted(&self.ints);
        let floats = Self::sorted(&self.floats);

        let mut out = Vec::with_capacity(ints.len() + floats.len());
        let mut i = 0;
        let mut f = 0;

        while i < ints.len() && f < floats.len() {
            if ints[i].value.compare(floats[f].value) == Ordering::Greater {
                out.push(floats[f].clone());
                f += 1;
            } else {
                out.push(ints[i].clone());
                i += 1;
            }
        }

        out.extend_from_slice(&ints[i..]);
        out.extend_from_slice(&floats[f..]);
        out
    }

    /// Sorted view over the integer candidates only.
    pub fn sorted_ints(&self) -> Vec<PoolEntry> {
        Self::sorted(&self.ints)
    }

    /// Apply the policy's selection flags over this pool.
    ///
    /// `mixed` chooses between the merged int+float sequence and the
    /// integer-only sequence. `original` is the literal's own value; the
    /// close scans are silently skipped when it is unavailable. Emission
    /// order is max, min, median, close-less, close-more, then partitions
    /// in ascending order.
    pub fn select(
        &self,
        policy: &SelectionPolicy,
        original: Option<CandidateValue>,
        mixed: bool,
    ) -> Vec<String> {
        let entries = if mixed {
            self.merged()
        } else {
            self.sorted_ints()
        };

        let mut out = Vec::new();
        if entries.is_empty() {
            return out;
        }

        if policy.choose_max {
            out.push(entries[entries.len() - 1].text.clone());
        }

        if policy.choose_min {
            out.push(entries[0].text.clone());
        }

        if policy.choose_median {
            out.push(entries[entries.len() / 2].text.clone());
        }

        if policy.close_less {
            if let Some(orig) = original {
                if let Some(entry) = close_less(&entries, orig) {
                    out.push(entry.text.clone());
                }
            }
        }

        if policy.close_more {
            if let Some(orig) = original {
                if let Some(entry) = close_more(&entries, orig) {
                    out.push(entry.text.clone());
                }
            }
        }

        for &part in &policy.partitions {
            partition(&entries, part as usize, &mut out);
        }

        out
    }
}

/// Closest candidate strictly below the original.
///
/// Applies only when the original exceeds the smallest candidate: scan
/// ascending for the first candidate above the original and take its
/// predecessor.
fn close_less(entries: &[PoolEntry], original: CandidateValue) -> Option<&PoolEntry> {
    if original.compare(entries[0].value) != Ordering::Greater {
        return None;
    }

    let above = entries
        .iter()
        .position(|e| e.value.compare(original) == Ordering::Greater)
        .unwrap_or(entries.len());

    Some(&entries[above - 1])
}

/// Closest candidate strictly above the original.
///
/// Applies only when the original is below the largest candidate: scan
/// descending for the first candidate below the original and take its
/// successor.
fn close_more(entries: &[PoolEntry], original: CandidateValue) -> Option<&PoolEntry> {
    if original.compare(entries[entries.len() - 1].value) != Ordering::Less {
        return None;
    }

    let below = entries
        .iter()
        .rposition(|e| e.value.compare(original) == Ordering::Less);

    match below {
        Some(idx) => Some(&entries[idx + 1]),
        None => Some(&entries[0]),
    }
}

/// Emit partition bucket `part` (1-based) of the sorted sequence.
///
/// Below the bucket threshold `part` indexes the sequence directly; at or
/// above it the sequence is tiled into 10 buckets of `len / 10` elements,
/// the tenth absorbing the remainder.
fn partition(entries: &[PoolEntry], part: usize, out: &mut Vec<String>) {
    let len = entries.len();

    if part > len {
        eprintln!("there are only {len} candidates to mutate to, no partition {part}");
        return;
    }

    if len < PARTITION_BUCKETS {
        out.push(entries[part - 1].text.clone());
        return;
    }

    let width = len / PARTITION_BUCKETS;
    let start = width * (part - 1);
    let end = if part == PARTITION_BUCKETS {
        len
    } else {
        width * part
    };

    for entry in &entries[start..end] {
        out.push(entry.text.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_pool(values: &[i64]) -> NumericCandidatePool {
        let mut pool = NumericCandidatePool::new();
        for &v in values {
            pool.push_int(v.to_string(), v);
        }
        pool
    }

    fn policy_with(f: impl FnOnce(&mut SelectionPolicy)) -> SelectionPolicy {
        let mut p = SelectionPolicy::default();
        f(&mut p);
        p
    }

    #[test]
    fn parse_int_spellings() {
        assert_eq!(parse_int_token("42"), Some(42));
        assert_eq!(parse_int_token("-7"), Some(-7));
        assert_eq!(parse_int_token("0x10"), Some(16));
        assert_eq!(parse_int_token("0b101"), Some(5));
        assert_eq!(parse_int_token("010"), Some(8));
        assert_eq!(parse_int_token("42u"), Some(42));
        assert_eq!(parse_int_token("42UL"), Some(42));
        assert_eq!(parse_int_token("abc"), None);
        assert_eq!(parse_int_token(""), None);
    }

    #[test]
    fn parse_char_spellings() {
        assert_eq!(parse_int_token("'a'"), Some(97));
        assert_eq!(parse_int_token("'\\n'"), Some(10));
        assert_eq!(parse_int_token("'\\0'"), Some(0));
        assert_eq!(parse_int_token("'ab'"), None);
    }

    #[test]
    fn parse_float_spellings() {
        assert_eq!(parse_float_token("2.5"), Some(2.5));
        assert_eq!(parse_float_token("2.5f"), Some(2.5));
        assert_eq!(parse_float_token("1e3"), Some(1000.0));
        assert_eq!(parse_float_token("inf"), None);
        assert_eq!(parse_float_token("nan"), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        for (token, kind) in [
            ("0x10", ExprKind::Integer),
            ("'a'", ExprKind::Character),
            ("3.50", ExprKind::Floating),
            ("1e2", ExprKind::Floating),
            ("-12L", ExprKind::Integer),
        ] {
            let once = normalize_numeric_token(token, kind).unwrap();
            let twice = normalize_numeric_token(&once, kind).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {token:?}");
        }
    }

    #[test]
    fn float_normalization_drops_redundant_digits() {
        assert_eq!(
            normalize_numeric_token("7.50", ExprKind::Floating).unwrap(),
            "7.5"
        );
        assert_eq!(
            normalize_numeric_token("3.0", ExprKind::Floating).unwrap(),
            "3"
        );
    }

    #[test]
    fn merge_interleaves_by_value_int_first_on_ties() {
        let mut pool = NumericCandidatePool::new();
        pool.push_int("3".to_string(), 3);
        pool.push_int("1".to_string(), 1);
        pool.push_float("2.5".to_string(), 2.5);
        pool.push_float("3".to_string(), 3.0);

        let merged = pool.merged();
        let texts: Vec<&str> = merged.iter().map(|e| e.text.as_str()).collect();

        // The float 3.0 ties with the int 3; the int comes first.
        assert_eq!(texts, ["1", "2.5", "3", "3"]);
        assert_eq!(
            pool.merged()[2].value,
            CandidateValue::Int(3),
            "integer-origin element must win the tie"
        );
    }

    #[test]
    fn max_min_median_over_merged_sequence() {
        let mut pool = NumericCandidatePool::new();
        pool.push_int("1".to_string(), 1);
        pool.push_int("3".to_string(), 3);
        pool.push_float("2.5".to_string(), 2.5);
        pool.push_float("7.5".to_string(), 7.5);

        let policy = policy_with(|p| {
            p.choose_max = true;
            p.choose_min = true;
            p.choose_median = true;
        });

        // Merged ascending: [1, 2.5, 3, 7.5]; median index 4/2 = 2.
        let selected = pool.select(&policy, Some(CandidateValue::Int(2)), true);
        assert_eq!(selected, ["7.5", "1", "3"]);
    }

    #[test]
    fn close_scans_match_reference_example() {
        let pool = int_pool(&[1, 3, 5, 9]);
        let policy = policy_with(|p| {
            p.close_less = true;
            p.close_more = true;
        });

        let selected = pool.select(&policy, Some(CandidateValue::Int(4)), false);
        assert_eq!(selected, ["3", "5"]);
    }

    #[test]
    fn close_less_needs_a_smaller_candidate() {
        let pool = int_pool(&[1, 3, 5, 9]);
        let policy = policy_with(|p| p.close_less = true);

        let selected = pool.select(&policy, Some(CandidateValue::Int(0)), false);
        assert!(selected.is_empty());
    }

    #[test]
    fn close_more_needs_a_larger_candidate() {
        let pool = int_pool(&[1, 3, 5, 9]);
        let policy = policy_with(|p| p.close_more = true);

        let selected = pool.select(&policy, Some(CandidateValue::Int(10)), false);
        assert!(selected.is_empty());
    }

    #[test]
    fn close_scans_skip_without_original_value() {
        let pool = int_pool(&[1, 3, 5]);
        let policy = policy_with(|p| {
            p.close_less = true;
            p.close_more = true;
        });

        assert!(pool.select(&policy, None, false).is_empty());
    }

    #[test]
    fn partition_tiles_without_gaps_or_overlap() {
        let values: Vec<i64> = (0..23).collect();
        let pool = int_pool(&values);

        let mut policy = SelectionPolicy::default();
        policy.partitions = (1u8..=10).collect();

        let selected = pool.select(&policy, None, false);

        // Buckets 1..=9 hold 23/10 = 2 elements each, bucket 10 the rest.
        let expected: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(selected, expected);

        let mut only_fifth = SelectionPolicy::default();
        only_fifth.partitions = [5u8].into_iter().collect();
        assert_eq!(pool.select(&only_fifth, None, false), ["8", "9"]);

        let mut only_tenth = SelectionPolicy::default();
        only_tenth.partitions = [10u8].into_iter().collect();
        assert_eq!(pool.select(&only_tenth, None, false), ["18", "19", "20", "21", "22"]);
    }

    #[test]
    fn partition_indexes_directly_below_threshold() {
        let pool = int_pool(&[10, 20, 30]);

        let mut policy = SelectionPolicy::default();
        policy.partitions = [2u8].into_iter().collect();

        assert_eq!(pool.select(&policy, None, false), ["20"]);
    }

    #[test]
    fn partition_beyond_pool_size_is_skipped() {
        let pool = int_pool(&[10, 20, 30]);

        let mut policy = SelectionPolicy::default();
        policy.partitions = [2u8, 7].into_iter().collect();

        // Partition 7 exceeds the 3 available candidates and is dropped.
        assert_eq!(pool.select(&policy, None, false), ["20"]);
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let pool = NumericCandidatePool::new();
        let policy = policy_with(|p| p.choose_max = true);

        assert!(pool.select(&policy, None, false).is_empty());
    }
}
