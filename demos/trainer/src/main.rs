//! Trainer Demo - Few-Shot Gesture Recognition Session
//!
//! Demonstrates the full recognizer lifecycle on synthetic hand poses:
//! - Generate landmark frames for a few gesture archetypes
//! - Train from 5 jittered examples per gesture
//! - Evaluate held-out jittered frames
//! - Round-trip the learned state through the JSON export format

use anyhow::Result;
use handvec::{GestureRecognizer, Landmark, RecognizerConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const EXAMPLES_PER_GESTURE: usize = 5;
const EVAL_FRAMES_PER_GESTURE: usize = 20;
const JITTER: f32 = 0.006;

fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Handvec Trainer - Few-Shot Gesture Session");
    info!("==========================================");

    let mut rng = StdRng::seed_from_u64(7);
    let gestures: Vec<(&str, Vec<Landmark>)> = vec![
        ("FIST", fist()),
        ("OPEN_PALM", open_hand()),
        ("PEACE", peace()),
    ];

    // -----------------------------------------------------------------------
    // Stage 1: Train from a handful of jittered examples per gesture
    // -----------------------------------------------------------------------
    info!("\nStage 1: Training ({EXAMPLES_PER_GESTURE} examples per gesture)");
    let train_start = std::time::Instant::now();

    let mut rec = GestureRecognizer::with_config(RecognizerConfig::default());
    for (name, pose) in &gestures {
        for _ in 0..EXAMPLES_PER_GESTURE {
            let frame = jitter(pose, JITTER, &mut rng);
            let hv = rec.encode(&frame)?;
            let count = rec.add_example(name, &hv);
            info!("  {name}: example {count}");
        }
    }
    info!("  Classes: {:?}", rec.get_class_names());
    info!("  Training time: {:?}", train_start.elapsed());

    // -----------------------------------------------------------------------
    // Stage 2: Evaluate held-out jittered frames
    // -----------------------------------------------------------------------
    info!("\nStage 2: Evaluation ({EVAL_FRAMES_PER_GESTURE} held-out frames per gesture)");
    let eval_start = std::time::Instant::now();

    let mut correct = 0usize;
    let mut total = 0usize;
    for (name, pose) in &gestures {
        let mut hits = 0usize;
        let mut conf_sum = 0.0f32;
        for _ in 0..EVAL_FRAMES_PER_GESTURE {
            let frame = jitter(pose, JITTER, &mut rng);
            let hv = rec.encode(&frame)?;
            let prediction = rec.predict(&hv);
            if prediction.label.as_deref() == Some(*name) {
                hits += 1;
            }
            conf_sum += prediction.confidence;
        }
        correct += hits;
        total += EVAL_FRAMES_PER_GESTURE;
        info!(
            "  {name}: {hits}/{EVAL_FRAMES_PER_GESTURE} correct, mean confidence {:.3}",
            conf_sum / EVAL_FRAMES_PER_GESTURE as f32
        );
    }
    info!(
        "  Overall accuracy: {:.1}%",
        100.0 * correct as f32 / total as f32
    );
    info!("  Evaluation time: {:?}", eval_start.elapsed());

    // -----------------------------------------------------------------------
    // Stage 3: Export / import round trip
    // -----------------------------------------------------------------------
    info!("\nStage 3: State round trip");

    let json = rec.export_json();
    info!("  Exported state: {} bytes of JSON", json.len());

    let mut restored = GestureRecognizer::new();
    restored.import_json(&json)?;

    let probe = jitter(&peace(), JITTER, &mut rng);
    let hv = rec.encode(&probe)?;
    let hv_restored = restored.encode(&probe)?;
    let before = rec.predict(&hv);
    let after = restored.predict(&hv_restored);
    info!(
        "  Probe prediction before/after: {:?} ({:.3}) / {:?} ({:.3})",
        before.label, before.confidence, after.label, after.confidence
    );
    anyhow::ensure!(
        before.label == after.label && before.confidence == after.confidence,
        "state round trip changed prediction behavior"
    );

    info!("\nDone.");
    Ok(())
}

/// Open hand archetype: wrist at the bottom, fingers straight up,
/// spread along x.
fn open_hand() -> Vec<Landmark> {
    let mut lm = vec![Landmark::default(); 21];
    lm[0] = Landmark::new(0.5, 0.9, 0.0);
    let xs = [0.38, 0.44, 0.50, 0.56, 0.62];
    for f in 0..5 {
        let base = 1 + 4 * f;
        for j in 0..4 {
            lm[base + j] = Landmark::new(xs[f], 0.72 - 0.07 * j as f32, -0.01 * j as f32);
        }
    }
    lm
}

/// Fist archetype: all fingertips folded back toward the knuckles.
fn fist() -> Vec<Landmark> {
    let mut lm = open_hand();
    for f in 0..5 {
        fold_finger(&mut lm, f);
    }
    lm
}

/// Peace archetype: index and middle extended, the rest folded.
fn peace() -> Vec<Landmark> {
    let mut lm = open_hand();
    for f in [0usize, 3, 4] {
        fold_finger(&mut lm, f);
    }
    lm
}

fn fold_finger(lm: &mut [Landmark], finger: usize) {
    let base = 1 + 4 * finger;
    let knuckle = lm[base];
    lm[base + 2] = Landmark::new(knuckle.x, knuckle.y + 0.02, 0.03);
    lm[base + 3] = Landmark::new(knuckle.x, knuckle.y + 0.05, 0.05);
}

/// Add uniform jitter to every coordinate, simulating landmark noise.
fn jitter(pose: &[Landmark], amount: f32, rng: &mut StdRng) -> Vec<Landmark> {
    pose.iter()
        .map(|l| {
            Landmark::new(
                l.x + rng.gen_range(-amount..amount),
                l.y + rng.gen_range(-amount..amount),
                l.z + rng.gen_range(-amount..amount),
            )
        })
        .collect()
}
