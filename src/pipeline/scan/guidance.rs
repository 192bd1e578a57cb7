use rand::seq::SliceRandom;
use rand::Rng;

use super::confidence::thresholds;
use super::types::DetectionResult;

/// Attached to detections that kept their code but scored low.
pub const LOW_CONFIDENCE_TIP: &str =
    "Symbol detected but confidence is low. Try better lighting or move closer to the symbol.";

/// Photography tips for scans that recognized no text at all.
pub const GENERIC_TIPS: [&str; 6] = [
    "Look for the triangular ♻️ symbol with a number inside",
    "Check the bottom of plastic containers",
    "Ensure good lighting on the recycling symbol",
    "Move closer to make the symbol larger in the frame",
    "Clean the surface if the symbol appears dirty or scratched",
    "Try a different angle to reduce glare on the symbol",
];

const REPOSITION_TIP: &str = "Center the recycling symbol in the frame and try again.";

/// When to attach a tip and how much recognized text to quote.
#[derive(Debug, Clone, Copy)]
pub struct GuidancePolicy {
    /// Detections at or below this confidence get [`LOW_CONFIDENCE_TIP`].
    pub ceiling: u8,
    /// Quoted recognized text is cut to this many characters.
    pub text_limit: usize,
}

impl Default for GuidancePolicy {
    fn default() -> Self {
        Self {
            ceiling: thresholds::GUIDANCE_CEILING,
            text_limit: 100,
        }
    }
}

/// Tip for a scan result using the default policy.
pub fn tip_for(result: &DetectionResult) -> Option<String> {
    tip_for_with(result, &GuidancePolicy::default(), &mut rand::thread_rng())
}

/// Tip for a scan result. Always `Some` (and non-empty) when no code was found;
/// `None` only for confident detections.
pub fn tip_for_with<R: Rng + ?Sized>(
    result: &DetectionResult,
    policy: &GuidancePolicy,
    rng: &mut R,
) -> Option<String> {
    match result.code {
        Some(_) if result.confidence > policy.ceiling => None,
        Some(_) => Some(LOW_CONFIDENCE_TIP.to_string()),
        None => {
            let raw = result.raw_text.trim();
            if raw.is_empty() {
                Some(random_generic_tip(rng).to_string())
            } else {
                Some(format!(
                    "No recycling number found in \"{}\". {REPOSITION_TIP}",
                    truncate_chars(&flatten(raw), policy.text_limit)
                ))
            }
        }
    }
}

fn random_generic_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GENERIC_TIPS.choose(rng).copied().unwrap_or(REPOSITION_TIP)
}

/// Recognized text spans several lines; quote it on one.
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
