#![no_main]
use archscale::cli::ScoreEntry;
use archscale::model::PatternCatalog;
use archscale::scoring::{Candidate, ScoringEngine, TestContext};
use libfuzzer_sys::fuzz_target;

/// Fuzz ranking over candidate files.
///
/// Parses arbitrary input as a score file and ranks whatever resolves,
/// exercising validation of non-finite and out-of-range values.
fuzz_target!(|data: &[u8]| {
    let Ok(entries) = serde_json::from_slice::<Vec<ScoreEntry>>(data) else {
        return;
    };
    let catalog = PatternCatalog::builtin();
    let candidates: Vec<Candidate> = entries
        .into_iter()
        .filter_map(|e| {
            let pattern = catalog.get(&e.pattern)?.clone();
            Some(Candidate::new(pattern, e.metrics))
        })
        .collect();
    let _ = ScoringEngine::default().rank(&candidates, &TestContext::Api);
});
