//! Resin code inference from recognized text.
//!
//! Strategies are an ordered rule list. Each one sees the uppercased text and a
//! whitespace-stripped copy; the first strategy that yields a code wins and the
//! rest are not consulted. Within a strategy the first match in the text wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::ResinCode;

/// One inference rule, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// A lone digit 1-7 delimited by ASCII word boundaries.
    IsolatedDigit,
    /// A digit next to the recycling glyph, a resin/plastic keyword or its abbreviation.
    ContextualPattern,
    /// An abbreviation (PET, HDPE, ...) on its own, without any digit.
    BareAbbreviation,
    /// Any digit 1-7 anywhere. Low precision: prices, addresses and dates all trigger it.
    LooseDigit,
}

impl Strategy {
    pub const ORDERED: [Strategy; 4] = [
        Self::IsolatedDigit,
        Self::ContextualPattern,
        Self::BareAbbreviation,
        Self::LooseDigit,
    ];

    fn apply(&self, text: &ScanText) -> Option<ResinCode> {
        match self {
            Self::IsolatedDigit => first_code_capture(&ISOLATED_DIGIT, &text.upper),
            Self::ContextualPattern => CONTEXT_PATTERNS
                .iter()
                .find_map(|re| first_code_capture(re, &text.upper)),
            Self::BareAbbreviation => ABBREVIATION_PATTERNS
                .iter()
                .find(|(re, _)| re.is_match(&text.compact))
                .map(|(_, code)| *code),
            Self::LooseDigit => text.compact.chars().find_map(ResinCode::from_char),
        }
    }
}

/// Abbreviations in lookup order. PETE and OTHERS are label variants.
pub const ABBREVIATIONS: [(&str, ResinCode); 9] = [
    ("PET", ResinCode::Pet),
    ("PETE", ResinCode::Pet),
    ("HDPE", ResinCode::Hdpe),
    ("PVC", ResinCode::Pvc),
    ("LDPE", ResinCode::Ldpe),
    ("PP", ResinCode::Pp),
    ("PS", ResinCode::Ps),
    ("OTHER", ResinCode::Other),
    ("OTHERS", ResinCode::Other),
];

// Word boundaries and word characters are ASCII-only throughout: a digit glued to
// a non-ASCII letter ("5号", "MÜ1") still counts as a standalone token.
static ISOLATED_DIGIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)([1-7])(?-u:\b)").expect("Invalid isolated digit regex")
});

static CONTEXT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Glyph, optionally in its emoji presentation (U+FE0F), before or after the digit
        r"♻\x{FE0F}?\s*([1-7])",
        r"([1-7])\s*♻\x{FE0F}?",
        r"RESIN\s*(?:ID|CODE)?\s*([1-7])",
        r"PLASTIC\s*(?:TYPE|CODE)?\s*([1-7])",
        r"PET(?:E)?\s*[^0-9A-Za-z_]*(1)|(1)[^0-9A-Za-z_]*PET(?:E)?",
        r"HDPE\s*[^0-9A-Za-z_]*(2)|(2)[^0-9A-Za-z_]*HDPE",
        r"PVC\s*[^0-9A-Za-z_]*(3)|(3)[^0-9A-Za-z_]*PVC",
        r"LDPE\s*[^0-9A-Za-z_]*(4)|(4)[^0-9A-Za-z_]*LDPE",
        r"PP\s*[^0-9A-Za-z_]*(5)|(5)[^0-9A-Za-z_]*PP",
        r"PS\s*[^0-9A-Za-z_]*(6)|(6)[^0-9A-Za-z_]*PS",
        r"OTHER\s*[^0-9A-Za-z_]*(7)|(7)[^0-9A-Za-z_]*OTHER",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("Invalid contextual resin regex"))
    .collect()
});

static ABBREVIATION_PATTERNS: LazyLock<Vec<(Regex, ResinCode)>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|(abbr, code)| {
            let re = Regex::new(&format!(r"(?-u:\b){abbr}(?-u:\b)")).expect("Invalid abbreviation regex");
            (re, *code)
        })
        .collect()
});

/// The two views of the input every strategy works on.
struct ScanText {
    upper: String,
    compact: String,
}

impl ScanText {
    fn new(text: &str) -> Self {
        let upper = text.to_uppercase();
        let compact = upper.chars().filter(|c| !c.is_whitespace()).collect();
        Self { upper, compact }
    }
}

/// First capture group (of any alternative) holding a valid resin digit.
fn first_code_capture(re: &Regex, haystack: &str) -> Option<ResinCode> {
    let caps = re.captures(haystack)?;
    caps.iter()
        .skip(1)
        .flatten()
        .find_map(|m| m.as_str().parse::<ResinCode>().ok())
}

/// Infer the resin code shown in a photo from its recognized text.
pub fn infer(text: &str) -> Option<ResinCode> {
    infer_with_strategy(text).map(|(code, _)| code)
}

/// Like [`infer`], also reporting which strategy produced the code.
pub fn infer_with_strategy(text: &str) -> Option<(ResinCode, Strategy)> {
    if text.trim().is_empty() {
        tracing::debug!("No text to infer a resin code from");
        return None;
    }

    let scan_text = ScanText::new(text);
    let found = Strategy::ORDERED
        .iter()
        .find_map(|s| s.apply(&scan_text).map(|code| (code, *s)));

    match found {
        Some((code, strategy)) => {
            if strategy == Strategy::LooseDigit {
                tracing::debug!(code = %code, "Resin code from a loose digit (low precision)");
            } else {
                tracing::debug!(code = %code, strategy = ?strategy, "Resin code inferred");
            }
        }
        None => tracing::debug!(text_len = text.len(), "No resin code found in text"),
    }

    found
}
