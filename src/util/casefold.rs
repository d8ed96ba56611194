use serde::{Deserialize, Serialize};

const COMBINING_DOT_ABOVE: char = '\u{0307}';

/// Lowercasing rule applied to both sides of a search comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldRule {
    /// Turkish/Azeri casing: dotted and dotless I are distinct letters.
    #[default]
    Turkish,
    /// Unicode default lowercase mapping.
    Default,
}

impl FoldRule {
    pub fn fold(self, s: &str) -> String {
        match self {
            FoldRule::Turkish => fold_turkish(s),
            FoldRule::Default => s.to_lowercase(),
        }
    }
}

/// Lowercase with Turkish rules:
///
/// - `I` → `ı` (dotless)
/// - `İ` → `i`
/// - `I` followed by U+0307 → `i` (the dot is absorbed)
///
/// Everything else takes the default Unicode mapping.
pub fn fold_turkish(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'I' => {
                if chars.peek() == Some(&COMBINING_DOT_ABOVE) {
                    chars.next();
                    out.push('i');
                } else {
                    out.push('ı');
                }
            }
            'İ' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}
