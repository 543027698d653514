//! Loading files into the coordinator.

use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;

use crate::helpers::analyzer_helpers::*;
use crate::helpers::source_fixtures::*;
use glyph::{ActiveView, AnalysisState, CoordinatorError, TokenCategory};

// =============================================================================
// FILENAME VALIDATION
// =============================================================================

#[rstest]
#[case("notes.txt")]
#[case("program.asm.txt")]
#[case("program")]
#[case("asm")]
#[tokio::test]
async fn test_rejected_filename_changes_nothing_but_error(#[case] filename: &str) {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    let result = coordinator.load_source(TWO_INSTRUCTIONS, filename).await;

    assert!(matches!(result, Err(CoordinatorError::InvalidFile { .. })));
    let state = coordinator.state();
    assert_eq!(state.analysis_state(), AnalysisState::Idle);
    assert_eq!(state.source_text(), "");
    assert_eq!(state.filename(), None);
    assert_eq!(state.active_view(), ActiveView::Load);
    assert!(
        state.last_error().is_some_and(|e| e.contains(filename)),
        "error should name the file, got {:?}",
        state.last_error()
    );
    assert_eq!(analyzer.calls(), 0);
}

#[tokio::test]
async fn test_load_empty_notes_txt_scenario() {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    let _ = coordinator.load_source("", "notes.txt").await;

    let state = coordinator.state();
    assert_eq!(state.analysis_state(), AnalysisState::Idle);
    assert!(state.last_error().unwrap().contains("notes.txt"));
    assert_eq!(analyzer.calls(), 0);
}

#[tokio::test]
async fn test_rejected_load_keeps_previous_source() {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);
    coordinator
        .load_source(TWO_INSTRUCTIONS, "first.asm")
        .await
        .unwrap();

    let _ = coordinator.load_source("HLT", "second.inc").await;

    let state = coordinator.state();
    assert_eq!(state.source_text(), TWO_INSTRUCTIONS);
    assert_eq!(state.filename(), Some("first.asm"));
    assert_eq!(state.analysis_state(), AnalysisState::Ready);
    assert_eq!(analyzer.calls(), 1);
}

#[rstest]
#[case("program.asm")]
#[case("PROGRAM.ASM")]
#[case("Lab3.Asm")]
#[tokio::test]
async fn test_suffix_match_ignores_case(#[case] filename: &str) {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    let result = coordinator.load_source(TWO_INSTRUCTIONS, filename).await;

    assert_eq!(result, Ok(AnalysisState::Ready));
    assert_eq!(coordinator.state().filename(), Some(filename));
}

// =============================================================================
// ACCEPTED LOADS
// =============================================================================

#[tokio::test]
async fn test_load_analyzes_immediately_and_switches_view() {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    let settled = coordinator
        .load_source(TWO_INSTRUCTIONS, "program.asm")
        .await
        .unwrap();

    assert_eq!(settled, AnalysisState::Ready);
    assert_eq!(analyzer.calls(), 1);
    assert!(!coordinator.has_pending_analysis());

    let state = coordinator.state();
    assert_eq!(state.active_view(), ActiveView::Tokens);
    assert_eq!(state.source_text(), TWO_INSTRUCTIONS);
    assert_eq!(state.tokens()[0].category, TokenCategory::Instruction);
}

#[tokio::test(start_paused = true)]
async fn test_load_cancels_pending_edit() {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    coordinator.edit_source("NOP");
    assert!(coordinator.has_pending_analysis());

    coordinator
        .load_source(TWO_INSTRUCTIONS, "program.asm")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(analyzer.seen(), vec![TWO_INSTRUCTIONS.to_string()]);
    assert_eq!(coordinator.state().source_text(), TWO_INSTRUCTIONS);
}

#[tokio::test]
async fn test_accepted_load_clears_previous_rejection() {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    let _ = coordinator.load_source("", "notes.txt").await;
    coordinator
        .load_source(TWO_INSTRUCTIONS, "program.asm")
        .await
        .unwrap();

    assert_eq!(coordinator.state().last_error(), None);
}

#[tokio::test]
async fn test_load_blank_file_skips_analysis() {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    let settled = coordinator.load_source(BLANK, "empty.asm").await.unwrap();

    assert_eq!(settled, AnalysisState::Idle);
    assert_eq!(analyzer.calls(), 0);
    assert_eq!(coordinator.state().filename(), Some("empty.asm"));
    assert!(!coordinator.state().has_source());
}
