use crate::meshes;
use cleave3d::math::Real;
use cleave3d::transformation::decomposition::{
    Decomposer, DecompositionParameters, ProgressCallback, STAGE_SPLITTING_MESH,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingCallback {
    reports: Mutex<Vec<(String, Real)>>,
    polls: AtomicUsize,
    cancel_after: Option<usize>,
}

impl ProgressCallback for RecordingCallback {
    fn report_progress(&self, stage: &str, fraction: Real) {
        self.reports
            .lock()
            .unwrap()
            .push((stage.to_string(), fraction));
    }

    fn is_cancelled(&self) -> bool {
        let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_after.is_some_and(|n| polls > n)
    }
}

#[test]
fn progress_is_reported_for_each_hull() {
    let (vertices, triangles) = meshes::dumbbell();
    let callback = Arc::new(RecordingCallback::default());
    let params = DecompositionParameters {
        concavity_percent: 10.0,
        max_hulls: 64,
        callback: Some(callback.clone()),
        ..Default::default()
    };

    let result = Decomposer::new()
        .decompose(&vertices, &triangles, &params)
        .unwrap();
    let reports = callback.reports.lock().unwrap();
    let hull_reports: Vec<_> = reports
        .iter()
        .filter(|(stage, _)| stage == STAGE_SPLITTING_MESH)
        .collect();

    assert_eq!(hull_reports.len(), result.len());
    assert!(hull_reports
        .iter()
        .all(|(_, fraction)| *fraction >= 0.0 && *fraction <= 1.0));
    #[cfg(not(feature = "parallel"))]
    assert!(hull_reports.windows(2).all(|w| w[0].1 <= w[1].1));
    assert_eq!(
        callback.polls.load(Ordering::SeqCst),
        result.stats().fragments_evaluated
    );
}

#[test]
fn cancellation_at_first_poll_returns_empty_result() {
    let (vertices, triangles) = meshes::dumbbell();
    let callback = Arc::new(RecordingCallback {
        cancel_after: Some(0),
        ..Default::default()
    });
    let params = DecompositionParameters {
        callback: Some(callback.clone()),
        ..Default::default()
    };

    let result = Decomposer::new()
        .decompose(&vertices, &triangles, &params)
        .unwrap();

    assert!(result.was_cancelled());
    assert!(result.is_empty());
    assert_eq!(result.stats().fragments_evaluated, 0);
    assert_eq!(callback.polls.load(Ordering::SeqCst), 1);
}

#[test]
fn cancellation_keeps_accepted_hulls() {
    let (vertices, triangles) = meshes::dumbbell();
    let full = Decomposer::new()
        .decompose(
            &vertices,
            &triangles,
            &DecompositionParameters {
                concavity_percent: 10.0,
                max_hulls: 64,
                ..Default::default()
            },
        )
        .unwrap();
    let num_fragments = full.stats().fragments_evaluated;
    assert!(num_fragments > 3);

    let callback = Arc::new(RecordingCallback {
        cancel_after: Some(num_fragments - 1),
        ..Default::default()
    });
    let params = DecompositionParameters {
        concavity_percent: 10.0,
        max_hulls: 64,
        callback: Some(callback),
        ..Default::default()
    };

    let partial = Decomposer::new()
        .decompose(&vertices, &triangles, &params)
        .unwrap();

    assert!(partial.was_cancelled());
    assert_eq!(partial.stats().fragments_evaluated, num_fragments - 1);
    assert!(partial.len() <= full.len());
    assert!(partial.hulls().all(|h| h.volume() > 0.0));
}
