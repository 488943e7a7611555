use corsi_rust::experiment::config::ExperimentConfig;
use corsi_rust::experiment::sequence::{
    BlockStatus, ClickOutcome, Phase, PresentationStep, Sequence,
};
use std::time::{Duration, Instant};

const EPSILON: Duration = Duration::from_millis(1);

/// Drives the presentation with synthetic timestamps until input may begin.
fn present_fully(sequence: &mut Sequence, trial_start: Instant, cfg: &ExperimentConfig) {
    let mut now = trial_start + cfg.start_delay + EPSILON;
    for _ in 0..100 {
        if sequence.advance_presentation(now, trial_start, cfg) == PresentationStep::Done {
            return;
        }
        now += cfg.highlight_time + EPSILON;
    }
    panic!("presentation did not finish");
}

fn highlighted_indices(sequence: &Sequence) -> Vec<usize> {
    sequence
        .blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.status == BlockStatus::Highlighted)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn test_generate_places_full_block_set() {
    let cfg = ExperimentConfig::default();
    let sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");

    assert_eq!(sequence.blocks.len(), cfg.n_boxes);
    assert_eq!(sequence.length, 3);
    assert_eq!(sequence.phase(), Phase::Idle);
    assert_eq!(sequence.correct, None);
    assert!(sequence
        .blocks
        .iter()
        .all(|b| b.status == BlockStatus::Normal));
}

#[test]
fn test_nothing_happens_before_start_delay() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();

    let step = sequence.advance_presentation(trial_start + EPSILON, trial_start, &cfg);
    assert_eq!(step, PresentationStep::Waiting);
    assert!(highlighted_indices(&sequence).is_empty());
    assert_eq!(sequence.phase(), Phase::Idle);
}

#[test]
fn test_first_block_highlights_after_start_delay() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();
    let now = trial_start + cfg.start_delay + EPSILON;

    let step = sequence.advance_presentation(now, trial_start, &cfg);
    assert_eq!(step, PresentationStep::Showing);
    assert_eq!(highlighted_indices(&sequence), vec![0]);
}

#[test]
fn test_advance_is_idempotent_within_dwell_interval() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();
    let now = trial_start + cfg.start_delay + EPSILON;

    sequence.advance_presentation(now, trial_start, &cfg);
    // Same instant, and again just inside the dwell interval: no change.
    sequence.advance_presentation(now, trial_start, &cfg);
    sequence.advance_presentation(now + cfg.highlight_time / 2, trial_start, &cfg);
    assert_eq!(highlighted_indices(&sequence), vec![0]);
}

#[test]
fn test_blocks_highlight_one_at_a_time_in_order() {
    let cfg = ExperimentConfig::default();
    let length = 4;
    let mut sequence = Sequence::generate(&cfg, length).expect("default layout is feasible");
    let trial_start = Instant::now();

    let mut now = trial_start + cfg.start_delay + EPSILON;
    for expected in 0..length {
        let step = sequence.advance_presentation(now, trial_start, &cfg);
        assert_eq!(step, PresentationStep::Showing);
        assert_eq!(highlighted_indices(&sequence), vec![expected]);
        now += cfg.highlight_time + EPSILON;
    }

    // One more dwell interval: last block goes dark, input may begin.
    let step = sequence.advance_presentation(now, trial_start, &cfg);
    assert_eq!(step, PresentationStep::Done);
    assert!(highlighted_indices(&sequence).is_empty());
    assert_eq!(sequence.phase(), Phase::AwaitingInput);
}

#[test]
fn test_clicks_ignored_during_presentation() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");

    let pos = sequence.blocks[0].pos;
    assert_eq!(sequence.register_click(pos, 0), ClickOutcome::Miss);
    assert_eq!(sequence.correct, None);
}

#[test]
fn test_correct_tap_order_scores_sequence_correct() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();
    present_fully(&mut sequence, trial_start, &cfg);

    let taps: Vec<(i32, i32)> = sequence.blocks[..3].iter().map(|b| b.pos).collect();

    assert_eq!(sequence.register_click(taps[0], 0), ClickOutcome::Continue);
    assert_eq!(sequence.blocks[0].status, BlockStatus::ClickedCorrect);
    assert_eq!(sequence.register_click(taps[1], 1), ClickOutcome::Continue);
    assert_eq!(
        sequence.register_click(taps[2], 2),
        ClickOutcome::Complete { correct: true }
    );
    assert_eq!(sequence.correct, Some(true));
    assert_eq!(sequence.phase(), Phase::Scored);
}

#[test]
fn test_wrong_tap_scores_sequence_incorrect() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();
    present_fully(&mut sequence, trial_start, &cfg);

    // Second block tapped first.
    let wrong = sequence.blocks[1].pos;
    assert_eq!(
        sequence.register_click(wrong, 0),
        ClickOutcome::Complete { correct: false }
    );
    assert_eq!(sequence.blocks[1].status, BlockStatus::ClickedIncorrect);
    assert_eq!(sequence.correct, Some(false));
}

#[test]
fn test_click_on_empty_canvas_is_a_miss() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();
    present_fully(&mut sequence, trial_start, &cfg);

    // The corner lies inside the margin, so no block can be there.
    assert_eq!(sequence.register_click((0, 0), 0), ClickOutcome::Miss);
    assert_eq!(sequence.correct, None);
}

#[test]
fn test_reclicking_the_marked_block_is_a_miss() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();
    present_fully(&mut sequence, trial_start, &cfg);

    let pos = sequence.blocks[0].pos;
    assert_eq!(sequence.register_click(pos, 0), ClickOutcome::Continue);
    // Same block again: still showing its click feedback, not scored twice.
    assert_eq!(sequence.register_click(pos, 1), ClickOutcome::Miss);
    assert_eq!(sequence.blocks[0].status, BlockStatus::ClickedCorrect);
}

#[test]
fn test_only_latest_tap_keeps_click_feedback() {
    let cfg = ExperimentConfig::default();
    let mut sequence = Sequence::generate(&cfg, 3).expect("default layout is feasible");
    let trial_start = Instant::now();
    present_fully(&mut sequence, trial_start, &cfg);

    let first = sequence.blocks[0].pos;
    let second = sequence.blocks[1].pos;
    sequence.register_click(first, 0);
    sequence.register_click(second, 1);

    assert_eq!(sequence.blocks[0].status, BlockStatus::Normal);
    assert_eq!(sequence.blocks[1].status, BlockStatus::ClickedCorrect);
}
