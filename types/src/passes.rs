use std::sync::LazyLock;

use regex::Regex;

use crate::pair::{NamePair, PairList};

// ── Regex patterns ─────────────────────────────────────────────────
//
// Real data examples:
//   沈宜嘉=Thẩm Nghi Gia              (bare)
//   “萧漾” = “Tiêu Dạng”              (quoted)
//   安康王 An Khang Vương              (adjacent, no separator)
//
// `\p{L}` includes Han, so a name run can swallow the Han token of the
// following line. That over-collection is kept; pruning is manual.

// Whitespace as browser regex `\s` and `String.prototype.trim` see it:
// Unicode White_Space plus U+FEFF, without U+0085. Substituted for every `\s`
// in the patterns below; nesting inside `[...]` is a class union.
const SPACE_CLASS: &str = r"[\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

pub(crate) fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t'
            | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn compile(pattern: &str) -> Regex {
    Regex::new(&pattern.replace(r"\s", SPACE_CLASS)).unwrap()
}

// Pass 1: {Han}=={Name}
static RE_BARE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\p{Han}{1,5})\s*=\s*([\p{L}\s]{2,30})"));

// Pass 2: "{Han}" = "{Name}", straight or curly quotes
static RE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"["“](\p{Han}{1,5})["”]\s*=\s*["“]([\p{L}\s]{2,30})["”]"#)
});

// Pass 3: {Han}{Name} with only optional whitespace between
static RE_ADJACENT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\p{Han}{1,5})\s*([\p{L}\s]{2,30})"));

// ── Passes ─────────────────────────────────────────────────────────

/// Which rule produced a pair. Declaration order is run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pass {
    /// 漢 = Name
    Bare,
    /// “漢” = “Name”
    Quoted,
    /// 漢 Name, no separator; the noisiest rule
    Adjacent,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::Bare, Pass::Quoted, Pass::Adjacent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bare => "bare",
            Self::Quoted => "quoted",
            Self::Adjacent => "adjacent",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Self::Bare => &RE_BARE,
            Self::Quoted => &RE_QUOTED,
            Self::Adjacent => &RE_ADJACENT,
        }
    }

    /// Run this rule alone over the whole text, left to right, non-overlapping.
    pub fn scan(&self, text: &str) -> Vec<NamePair> {
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let han = caps.get(1)?.as_str();
                let name = caps.get(2)?.as_str();
                Some(NamePair::from_captures(han, name))
            })
            .collect()
    }
}

/// A pair together with the rule that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub pass: Pass,
    pub pair: NamePair,
}

// ── Extraction ─────────────────────────────────────────────────────

/// Run every pass in order and keep every match, tagged with its pass.
pub fn extract_tagged(text: &str) -> Vec<Match> {
    Pass::ALL
        .iter()
        .flat_map(|&pass| {
            pass.scan(text)
                .into_iter()
                .map(move |pair| Match { pass, pair })
        })
        .collect()
}

/// Run every pass in order and concatenate the results.
///
/// Passes don't exclude each other's spans, so the same text can show up
/// more than once. Empty input gives an empty list.
pub fn extract(text: &str) -> PairList {
    extract_tagged(text).into_iter().map(|m| m.pair).collect()
}

/// Count matches per pass, in run order. Passes with no hits are included.
pub fn count_by_pass(matches: &[Match]) -> Vec<(Pass, usize)> {
    Pass::ALL
        .iter()
        .map(|&pass| (pass, matches.iter().filter(|m| m.pass == pass).count()))
        .collect()
}
