//! Shared helpers for the integration tests.

use std::sync::{Arc, Mutex};

use hacksim::game::{GameEngine, Pacing, ProgressSink};

/// Progress sink that records every emitted line, in order.
#[derive(Default)]
pub struct RecordingProgress {
    lines: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn emit(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Deterministic engine with zero delays and a recording progress sink.
pub fn engine(seed: u64) -> (GameEngine, Arc<RecordingProgress>) {
    let mut engine = GameEngine::with_seed(seed);
    engine.set_pacing(Pacing::Instant);
    let progress = Arc::new(RecordingProgress::default());
    engine.set_progress_sink(progress.clone());
    (engine, progress)
}

/// Accept the first available mission and return its target address.
pub fn accept_first_mission(engine: &mut GameEngine) -> String {
    let target = engine.board().available()[0].target.clone();
    let id = engine.board().available()[0].id;
    assert_eq!(
        engine.board_mut().accept_mission(id),
        hacksim::game::missions::AcceptOutcome::Accepted
    );
    target
}
