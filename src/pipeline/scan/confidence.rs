use std::sync::LazyLock;

use regex::Regex;

use super::types::RecognitionResult;
use crate::models::ResinCode;

/// Confidence scores and thresholds, in percent.
pub mod thresholds {
    /// Starting score for any inferred code.
    pub const BASE: i32 = 70;

    /// Detections are never reported below this.
    pub const FLOOR: u8 = 65;

    /// Detections are never reported above this.
    pub const CEILING: u8 = 95;

    /// At or below this, the scan result carries a guidance tip.
    pub const GUIDANCE_CEILING: u8 = 75;

    /// Flat confidence of a simulated (fallback) hit, below every primary-path score.
    pub const FALLBACK: u8 = 60;
}

const BLOCKS_BONUS: i32 = 10;
const KEYWORD_BONUS: i32 = 8;
const ISOLATED_DIGIT_BONUS: i32 = 15;
const SHORT_TEXT_BONUS: i32 = 10;
const LONG_TEXT_PENALTY: i32 = 15;
const MEDIUM_TEXT_PENALTY: i32 = 8;

/// Recycling vocabulary that suggests the photo really shows a resin label.
pub const RECYCLING_KEYWORDS: [&str; 10] = [
    "♻", "PET", "HDPE", "PVC", "LDPE", "PP", "PS", "OTHER", "RESIN", "PLASTIC",
];

static ISOLATED_DIGIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[1-7](?-u:\b)").expect("Invalid isolated digit regex")
});

/// Score an inferred code against the recognition result it came from.
///
/// 0 when there is no code, otherwise clamped to
/// [`thresholds::FLOOR`]..=[`thresholds::CEILING`].
pub fn estimate(result: &RecognitionResult, code: Option<ResinCode>) -> u8 {
    if code.is_none() {
        return 0;
    }
    let raw = estimate_unclamped(result, code);
    raw.clamp(i32::from(thresholds::FLOOR), i32::from(thresholds::CEILING)) as u8
}

/// Score before clamping. Each signal adds or subtracts independently:
///
/// - structured blocks present: +10
/// - any recycling keyword in the text: +8 (once)
/// - the code's digit stands alone in the text: +15
/// - over 100 UTF-16 units: -15, over 50: -8
/// - under 20 UTF-16 units: +10
pub fn estimate_unclamped(result: &RecognitionResult, code: Option<ResinCode>) -> i32 {
    let Some(code) = code else {
        return 0;
    };

    let text = result.text.as_str();
    let mut score = thresholds::BASE;

    if result.has_blocks() {
        score += BLOCKS_BONUS;
    }

    let upper = text.to_uppercase();
    if RECYCLING_KEYWORDS.iter().any(|k| upper.contains(k)) {
        score += KEYWORD_BONUS;
    }

    if has_isolated_digit(text, code) {
        score += ISOLATED_DIGIT_BONUS;
    }

    // UTF-16 units, the length the recognizer host reports
    let len = text.encode_utf16().count();
    if len > 100 {
        score -= LONG_TEXT_PENALTY;
    } else if len > 50 {
        score -= MEDIUM_TEXT_PENALTY;
    }
    if len < 20 {
        score += SHORT_TEXT_BONUS;
    }

    score
}

/// Whether the code's digit appears as its own token, regardless of which
/// strategy produced the code.
fn has_isolated_digit(text: &str, code: ResinCode) -> bool {
    ISOLATED_DIGIT
        .find_iter(text)
        .any(|m| m.as_str() == code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::scan::types::TextBlock;

    fn plain(text: &str) -> RecognitionResult {
        RecognitionResult::new(text)
    }

    fn with_blocks(text: &str) -> RecognitionResult {
        RecognitionResult::new(text).with_blocks(vec![TextBlock::new(text)])
    }

    #[test]
    fn no_code_is_zero() {
        assert_eq!(estimate(&plain("PET 1"), None), 0);
        assert_eq!(estimate(&plain(""), None), 0);
        assert_eq!(estimate_unclamped(&with_blocks("PET 1"), None), 0);
    }

    #[test]
    fn labelled_sentence_clamps_to_ceiling() {
        let result = with_blocks("Recycling symbol: PET #1 bottle");
        // 70 + 10 blocks + 8 keyword + 15 isolated digit, 31 chars: no length adjustment
        assert_eq!(estimate_unclamped(&result, Some(ResinCode::Pet)), 103);
        assert_eq!(estimate(&result, Some(ResinCode::Pet)), 95);
    }

    #[test]
    fn bare_text_short_no_signals() {
        // "ab3cd": no blocks, no keyword, 3 not isolated, short → 70 + 10
        assert_eq!(estimate_unclamped(&plain("ab3cd"), Some(ResinCode::Pvc)), 80);
        assert_eq!(estimate(&plain("ab3cd"), Some(ResinCode::Pvc)), 80);
    }

    #[test]
    fn long_noisy_text_clamps_to_floor() {
        let text = format!("Invoice 4471 {}", "lorem dolor sit amet ".repeat(6));
        assert!(text.chars().count() > 100);
        // 70 - 15, no other signal
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Ldpe)), 55);
        assert_eq!(estimate(&plain(&text), Some(ResinCode::Ldpe)), 65);
    }

    #[test]
    fn medium_text_penalty() {
        let text = "a".repeat(51) + "5";
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pp)), 62);
        let text = "a".repeat(100);
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pp)), 62);
        let text = "a".repeat(101);
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pp)), 55);
    }

    #[test]
    fn length_boundaries_neutral_zone() {
        // 20..=50 chars gets neither bonus nor penalty
        let text = "x".repeat(20);
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pet)), 70);
        let text = "x".repeat(50);
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pet)), 70);
        let text = "x".repeat(19);
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pet)), 80);
    }

    #[test]
    fn keyword_bonus_applied_once() {
        let one = plain("PET xxxxxxxxxxxxxxxxxxxxxx");
        let many = plain("PET HDPE PVC RESIN PLASTIC");
        assert_eq!(one.text.chars().count(), many.text.chars().count());
        assert_eq!(
            estimate_unclamped(&one, Some(ResinCode::Pet)),
            estimate_unclamped(&many, Some(ResinCode::Pet))
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive_and_covers_glyph() {
        let base = estimate_unclamped(&plain("zzzz 9"), Some(ResinCode::Pp));
        assert_eq!(estimate_unclamped(&plain("hdpe 9"), Some(ResinCode::Pp)), base + 8);
        assert_eq!(estimate_unclamped(&plain("♻zzz 9"), Some(ResinCode::Pp)), base + 8);
    }

    #[test]
    fn isolated_digit_must_match_code() {
        // A lone 2 does not confirm code 5
        let text = plain("zz 2 zz");
        assert_eq!(estimate_unclamped(&text, Some(ResinCode::Pp)), 80);
        assert_eq!(estimate_unclamped(&text, Some(ResinCode::Hdpe)), 95);
    }

    #[test]
    fn isolated_digit_confirmation_independent_of_strategy() {
        // Code may come from an abbreviation; a matching lone digit elsewhere still counts
        let text = plain("zzzz, 4");
        assert_eq!(estimate_unclamped(&text, Some(ResinCode::Ldpe)), 95);
    }

    #[test]
    fn digit_next_to_cjk_counts_as_isolated() {
        // 70 + 15 isolated digit + 10 short
        assert_eq!(estimate_unclamped(&plain("5号塑料"), Some(ResinCode::Pp)), 95);
    }

    #[test]
    fn length_counts_utf16_units() {
        // 10 emoji are 20 UTF-16 units: no short-text bonus
        let text = format!("{}5", "🙂".repeat(10));
        assert_eq!(text.chars().count(), 11);
        // 70 + 15 isolated digit
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pp)), 85);

        let text = format!("{}5", "🙂".repeat(9));
        assert_eq!(estimate_unclamped(&plain(&text), Some(ResinCode::Pp)), 95);
    }

    #[test]
    fn adding_signals_never_lowers_score() {
        let code = Some(ResinCode::Hdpe);
        let base = plain("zzzz zzzz");
        let blocks = with_blocks("zzzz zzzz");
        let keyword = plain("HDPE zzzz");
        let digit = plain("zzzz 2 zz");

        let b = estimate_unclamped(&base, code);
        assert!(estimate_unclamped(&blocks, code) >= b);
        assert!(estimate_unclamped(&keyword, code) >= b);
        assert!(estimate_unclamped(&digit, code) >= b);
    }

    #[test]
    fn clamped_score_always_in_range() {
        let samples = [
            "",
            "1",
            "HDPE 2",
            "Recycling symbol: PET #1 bottle",
            "a long receipt line with numbers 12 34 56 and more text to push it past one hundred characters total",
        ];
        for text in samples {
            for code in ResinCode::ALL {
                for result in [plain(text), with_blocks(text)] {
                    let c = estimate(&result, Some(code));
                    assert!((65..=95).contains(&c), "{text:?} {code}: {c}");
                }
            }
        }
    }

    #[test]
    fn estimate_is_repeatable() {
        let result = with_blocks("♻ 5 PP");
        assert_eq!(
            estimate(&result, Some(ResinCode::Pp)),
            estimate(&result, Some(ResinCode::Pp))
        );
    }

    #[test]
    fn threshold_constants_are_ordered() {
        assert!(thresholds::FALLBACK < thresholds::FLOOR);
        assert!(thresholds::FLOOR <= thresholds::GUIDANCE_CEILING);
        assert!(thresholds::GUIDANCE_CEILING < thresholds::CEILING);
    }
}
