//! Plain-text rendering for deck listings and the chunk progress bar.

use cardbox_core::{Card, ProgressSummary, time};

/// One character per chunk: Y/B/G for earned yellow/blue/green chunks,
/// `.` for chunks still to earn.
pub fn progress_bar(summary: &ProgressSummary) -> String {
    let mut bar = String::with_capacity(summary.total_chunks + 2);
    bar.push('[');
    for _ in 0..summary.earned_yellow {
        bar.push('Y');
    }
    for _ in 0..summary.earned_blue {
        bar.push('B');
    }
    for _ in 0..summary.earned_green {
        bar.push('G');
    }
    for _ in 0..summary.remaining_chunks() {
        bar.push('.');
    }
    bar.push(']');

    format!(
        "chunks {}/{} {bar}",
        summary.earned_chunks(),
        summary.total_chunks
    )
}

pub fn stage_line(summary: &ProgressSummary) -> String {
    format!(
        "stage 1: {}  stage 2: {}  stage 3: {} ({} mastered)",
        summary.stage1_count, summary.stage2_count, summary.stage3_count, summary.earned_green
    )
}

/// One `list` line: position, stage label, mastered star, both sides,
/// then draft and recency markers.
pub fn list_row(index: usize, card: &Card) -> String {
    let star = if card.stage3_mastered { "*" } else { " " };
    let mut row = format!(
        "{index:>3}. [{label:<9}{star}] {front} → {back}",
        label = card.stage.label(),
        front = card.front,
        back = card.back,
    );
    if !card.is_study_ready() {
        row.push_str("  (draft)");
    }
    if let Some(seen) = card.last_seen_at {
        row.push_str(&format!("  (seen {})", time::millis_to_iso8601(seen)));
    }
    row
}
