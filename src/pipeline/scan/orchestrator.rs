use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rand::Rng;

use super::confidence::estimate;
use super::fallback::simulate_with;
use super::guidance::tip_for_with;
use super::symbol::infer_with_strategy;
use super::types::{DetectionResult, ImageRef, RecognitionResult, TextRecognizer};
use super::ScanError;
use crate::models::DetectionMethod;
use crate::scan_config::ScanConfig;

/// Scan-and-classify entry point for one photograph.
///
/// The recognizer is injected, so tests and demo builds can run without the
/// native ML Kit bridge. Scanning never fails: recognizer errors (or no
/// recognizer at all) degrade to the fallback simulation.
pub struct SymbolScanner {
    recognizer: Option<Box<dyn TextRecognizer + Send + Sync>>,
    config: ScanConfig,
}

impl SymbolScanner {
    pub fn new(recognizer: Box<dyn TextRecognizer + Send + Sync>) -> Self {
        Self {
            recognizer: Some(recognizer),
            config: ScanConfig::default(),
        }
    }

    /// Scanner for builds where text recognition is not linked.
    pub fn without_recognizer() -> Self {
        Self {
            recognizer: None,
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn scan(&self, image: &ImageRef) -> DetectionResult {
        self.scan_with_rng(image, &mut rand::thread_rng())
    }

    /// [`scan`](Self::scan) with an explicit RNG for the fallback and tip rotation.
    pub fn scan_with_rng<R: Rng + ?Sized>(&self, image: &ImageRef, rng: &mut R) -> DetectionResult {
        let _span = tracing::info_span!("symbol_scan", image = %image.uri()).entered();

        let Some(recognizer) = &self.recognizer else {
            tracing::info!("No text recognizer available, using fallback simulation");
            return self.fallback_with_rng(rng);
        };

        match recognize_guarded(recognizer.as_ref(), image) {
            Ok(result) => self.classify_with_rng(result, rng),
            Err(e) => {
                tracing::warn!(error = %e, "Text recognition failed, using fallback simulation");
                self.fallback_with_rng(rng)
            }
        }
    }

    /// Run inference and scoring on an existing recognition result.
    pub fn classify(&self, result: RecognitionResult) -> DetectionResult {
        self.classify_with_rng(result, &mut rand::thread_rng())
    }

    fn classify_with_rng<R: Rng + ?Sized>(
        &self,
        result: RecognitionResult,
        rng: &mut R,
    ) -> DetectionResult {
        let inferred = infer_with_strategy(&result.text);
        let code = inferred.map(|(code, _)| code);
        let confidence = estimate(&result, code);

        tracing::info!(
            code = ?code.map(|c| c.digit()),
            strategy = ?inferred.map(|(_, s)| s),
            confidence,
            blocks = result.blocks.len(),
            text_len = result.text.len(),
            "Symbol scan classified"
        );

        let detection = DetectionResult::new(
            code,
            confidence,
            result.text,
            DetectionMethod::TextRecognition,
        );
        self.with_guidance(detection, rng)
    }

    /// Result for a scan that could not use text recognition.
    pub fn fallback(&self) -> DetectionResult {
        self.fallback_with_rng(&mut rand::thread_rng())
    }

    fn fallback_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> DetectionResult {
        let (code, confidence) = simulate_with(rng);
        tracing::info!(
            code = ?code.map(|c| c.digit()),
            confidence,
            "Symbol scan simulated"
        );

        let detection = DetectionResult::new(
            code,
            confidence,
            String::new(),
            DetectionMethod::FallbackSimulation,
        );
        self.with_guidance(detection, rng)
    }

    fn with_guidance<R: Rng + ?Sized>(&self, detection: DetectionResult, rng: &mut R) -> DetectionResult {
        let tip = tip_for_with(&detection, &self.config.guidance_policy(), rng);
        detection.with_tip(tip)
    }
}

/// A panicking recognizer counts as a failed one.
fn recognize_guarded(
    recognizer: &(dyn TextRecognizer + Send + Sync),
    image: &ImageRef,
) -> Result<RecognitionResult, ScanError> {
    panic::catch_unwind(AssertUnwindSafe(|| recognizer.recognize(image))).unwrap_or_else(|_| {
        Err(ScanError::Recognition("text recognizer panicked".into()))
    })
}

/// Run a scan on the blocking pool so the async caller only awaits once.
///
/// If the blocking task is lost (runtime shutdown), the caller still gets a
/// fallback result.
pub async fn scan_in_background(scanner: Arc<SymbolScanner>, image: ImageRef) -> DetectionResult {
    let worker = Arc::clone(&scanner);
    match tokio::task::spawn_blocking(move || worker.scan(&image)).await {
        Ok(detection) => detection,
        Err(e) => {
            tracing::error!(error = %e, "Background scan task failed, using fallback simulation");
            scanner.fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResinCode;
    use crate::pipeline::scan::confidence::thresholds;
    use crate::pipeline::scan::guidance::{GENERIC_TIPS, LOW_CONFIDENCE_TIP};
    use crate::pipeline::scan::recognizer::{FailingRecognizer, MockRecognizer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct PanickingRecognizer;

    impl TextRecognizer for PanickingRecognizer {
        fn recognize(&self, _image: &ImageRef) -> Result<RecognitionResult, ScanError> {
            panic!("native bridge crashed");
        }
    }

    fn image() -> ImageRef {
        ImageRef::new("file:///photos/scan.jpg")
    }

    fn scanner_for(text: &str) -> SymbolScanner {
        SymbolScanner::new(Box::new(MockRecognizer::new(text).with_line_blocks()))
    }

    fn assert_well_formed(r: &DetectionResult) {
        assert!(r.confidence <= 100);
        if r.code.is_none() {
            assert_eq!(r.confidence, 0);
            assert!(r.tip.as_deref().is_some_and(|t| !t.is_empty()));
        }
    }

    #[test]
    fn confident_detection_returned_as_is() {
        let r = scanner_for("PET 1").scan(&image());
        assert_eq!(r.code, Some(ResinCode::Pet));
        assert_eq!(r.confidence, 95);
        assert_eq!(r.method, DetectionMethod::TextRecognition);
        assert_eq!(r.raw_text, "PET 1");
        assert!(r.tip.is_none());
    }

    #[test]
    fn low_confidence_detection_keeps_code_with_tip() {
        let text = format!("Invoice 4471 {}", "lorem dolor sit amet ".repeat(6));
        let r = SymbolScanner::new(Box::new(MockRecognizer::new(&text))).scan(&image());
        assert_eq!(r.code, Some(ResinCode::Ldpe));
        assert_eq!(r.confidence, thresholds::FLOOR);
        assert_eq!(r.tip.as_deref(), Some(LOW_CONFIDENCE_TIP));
        assert_eq!(r.method, DetectionMethod::TextRecognition);
    }

    #[test]
    fn loose_digit_in_address_is_low_confidence() {
        // Known weak spot: a street number still yields a code, but with a tip
        let r = SymbolScanner::new(Box::new(MockRecognizer::new("12345 Main Street Suite 7B")))
            .scan(&image());
        assert_eq!(r.code, Some(ResinCode::Pet));
        assert_eq!(r.confidence, 70);
        assert_eq!(r.tip.as_deref(), Some(LOW_CONFIDENCE_TIP));
    }

    #[test]
    fn unmatched_text_is_quoted_in_tip() {
        let r = scanner_for("Best before: see lid").scan(&image());
        assert_eq!(r.code, None);
        assert_eq!(r.confidence, 0);
        assert_eq!(r.method, DetectionMethod::TextRecognition);
        assert!(r.tip.unwrap().contains("Best before: see lid"));
    }

    #[test]
    fn empty_recognition_gets_generic_tip() {
        let mut rng = StdRng::seed_from_u64(3);
        let r = scanner_for("").scan_with_rng(&image(), &mut rng);
        assert_eq!(r.code, None);
        assert_eq!(r.confidence, 0);
        assert_eq!(r.method, DetectionMethod::TextRecognition);
        assert!(GENERIC_TIPS.contains(&r.tip.as_deref().unwrap()));
    }

    #[test]
    fn failing_recognizer_degrades_to_fallback() {
        let scanner = SymbolScanner::new(Box::new(FailingRecognizer::new("ML Kit unavailable")));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let r = scanner.scan_with_rng(&image(), &mut rng);
            assert_eq!(r.method, DetectionMethod::FallbackSimulation);
            assert!(r.raw_text.is_empty());
            assert_well_formed(&r);
            match r.code {
                Some(_) => {
                    assert_eq!(r.confidence, thresholds::FALLBACK);
                    assert_eq!(r.tip.as_deref(), Some(LOW_CONFIDENCE_TIP));
                }
                None => assert!(GENERIC_TIPS.contains(&r.tip.as_deref().unwrap())),
            }
        }
    }

    #[test]
    fn timed_out_or_unavailable_recognizer_degrades_to_fallback() {
        let mut rng = StdRng::seed_from_u64(5);
        for recognizer in [FailingRecognizer::timeout(), FailingRecognizer::unavailable()] {
            let scanner = SymbolScanner::new(Box::new(recognizer));
            for _ in 0..50 {
                let r = scanner.scan_with_rng(&image(), &mut rng);
                assert_eq!(r.method, DetectionMethod::FallbackSimulation);
                assert!(r.raw_text.is_empty());
                assert_well_formed(&r);
            }
        }
    }

    #[test]
    fn missing_recognizer_degrades_to_fallback() {
        let r = SymbolScanner::without_recognizer().scan(&image());
        assert_eq!(r.method, DetectionMethod::FallbackSimulation);
        assert_well_formed(&r);
    }

    #[test]
    fn panicking_recognizer_degrades_to_fallback() {
        let r = SymbolScanner::new(Box::new(PanickingRecognizer)).scan(&image());
        assert_eq!(r.method, DetectionMethod::FallbackSimulation);
        assert_well_formed(&r);
    }

    #[test]
    fn guidance_ceiling_from_config() {
        let config = ScanConfig {
            guidance_ceiling: 65,
            ..ScanConfig::default()
        };
        let r = SymbolScanner::new(Box::new(MockRecognizer::new("12345 Main Street Suite 7B")))
            .with_config(config)
            .scan(&image());
        assert_eq!(r.confidence, 70);
        assert!(r.tip.is_none());
    }

    #[test]
    fn classify_skips_recognizer() {
        let scanner = SymbolScanner::new(Box::new(FailingRecognizer::new("unused")));
        let r = scanner.classify(RecognitionResult::new("HDPE"));
        assert_eq!(r.code, Some(ResinCode::Hdpe));
        assert_eq!(r.method, DetectionMethod::TextRecognition);
        // 70 + keyword 8 + short 10
        assert_eq!(r.confidence, 88);
    }

    #[test]
    fn scanner_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SymbolScanner>();
    }

    #[tokio::test]
    async fn background_scan_matches_blocking_scan() {
        let scanner = Arc::new(scanner_for("♻ 5 PP"));
        let r = scan_in_background(Arc::clone(&scanner), image()).await;
        assert_eq!(r, scanner.scan(&image()));
        assert_eq!(r.code, Some(ResinCode::Pp));
    }

    #[tokio::test]
    async fn background_scan_with_failing_recognizer() {
        let scanner = Arc::new(SymbolScanner::new(Box::new(FailingRecognizer::new("offline"))));
        let r = scan_in_background(scanner, image()).await;
        assert_eq!(r.method, DetectionMethod::FallbackSimulation);
        assert_well_formed(&r);
    }
}
