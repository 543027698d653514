//! Offset and line correlation through the coordinator state.

use std::sync::Arc;

use rstest::rstest;

use crate::helpers::analyzer_helpers::*;
use crate::helpers::source_fixtures::*;
use glyph::model::AnalysisResult;
use glyph::{
    AnalysisCoordinator, AnalyzerOutput, CoordinatorState, HighlightIndex, HighlightInfo,
    LineCol, TextSize,
};

//  MOV AX, 10h\nADD AX, 1
//  0   4 6 8   12  16  20
async fn analyzed(source: &str) -> (AnalysisCoordinator, CoordinatorState) {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);
    coordinator.load_source(source, "program.asm").await.unwrap();
    let state = coordinator.state();
    (coordinator, state)
}

// =============================================================================
// OFFSET LOOKUP
// =============================================================================

#[rstest]
#[case(0, Some("MOV"))]
#[case(2, Some("MOV"))]
#[case(3, None)]
#[case(5, Some("AX"))]
#[case(6, Some(","))]
#[case(10, Some("10h"))]
#[case(11, None)]
#[case(12, Some("ADD"))]
#[case(20, Some("1"))]
#[case(21, None)]
#[case(500, None)]
#[tokio::test]
async fn test_token_at_offset(#[case] offset: u32, #[case] expected: Option<&str>) {
    let (_coordinator, state) = analyzed(TWO_INSTRUCTIONS).await;

    let found = state.token_at(TextSize::from(offset)).map(|t| t.text.as_str());

    assert_eq!(found, expected);
}

#[rstest]
#[case(LineCol::new(0, 0), Some("MOV"))]
#[case(LineCol::new(0, 9), Some("10h"))]
#[case(LineCol::new(0, 11), None)]
#[case(LineCol::new(0, 12), None)]
#[case(LineCol::new(1, 4), Some("AX"))]
#[case(LineCol::new(1, 8), Some("1"))]
#[case(LineCol::new(2, 0), None)]
#[tokio::test]
async fn test_token_at_cursor(#[case] pos: LineCol, #[case] expected: Option<&str>) {
    let (_coordinator, state) = analyzed(TWO_INSTRUCTIONS).await;

    let found = state.token_at_position(pos).map(|t| t.text.as_str());

    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_lookup_without_result_is_empty() {
    let analyzer = Arc::new(ScriptedAnalyzer::lexing());
    let coordinator = coordinator_with(&analyzer);

    let state = coordinator.state();
    assert!(state.token_at(TextSize::from(0)).is_none());
    assert!(state.tokens_on_line(1).is_empty());
    assert!(state.selected_line_tokens().is_empty());
}

// =============================================================================
// LINE LOOKUP
// =============================================================================

#[tokio::test]
async fn test_tokens_on_line_in_order() {
    let (_coordinator, state) = analyzed(TWO_INSTRUCTIONS).await;

    let first: Vec<&str> = state
        .tokens_on_line(1)
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(first, vec!["MOV", "AX", ",", "10h"]);
    assert!(state.tokens_on_line(3).is_empty());
    assert!(state.tokens_on_line(0).is_empty());
}

#[tokio::test]
async fn test_index_lists_token_lines() {
    let (_coordinator, state) = analyzed(TWO_INSTRUCTIONS).await;

    let index = &state.last_result().unwrap().index;
    assert_eq!(index.lines(), vec![1, 2]);
    assert_eq!(index.len(), 8);
    assert_eq!(index.line_index().line_count(), 2);
}

#[tokio::test]
async fn test_lookups_follow_analyzed_text_not_edits() {
    let (coordinator, _) = analyzed(TWO_INSTRUCTIONS).await;

    // Not yet re-analyzed: offsets still resolve against the analyzed text.
    coordinator.edit_source("NOP");
    let state = coordinator.state();

    assert!(!state.is_result_current());
    assert_eq!(
        state.token_at(TextSize::from(12)).map(|t| t.text.as_str()),
        Some("ADD")
    );
}

// =============================================================================
// DIRECT INDEX CONSTRUCTION
// =============================================================================

#[test]
fn test_index_over_unordered_overlapping_output() {
    let mut tokens = lex(TWO_INSTRUCTIONS);
    tokens.reverse();
    let mut overlapping = tokens[0].clone();
    overlapping.text = "1x".into();
    tokens.push(overlapping);

    let result = AnalysisResult::from_output(TWO_INSTRUCTIONS, AnalyzerOutput::success(tokens));
    let index = HighlightIndex::build(TWO_INSTRUCTIONS, Arc::new(result));

    assert_eq!(index.len(), 8);
    assert_eq!(
        index.token_at(TextSize::from(20)).map(|t| t.text.as_str()),
        Some("1")
    );
}

#[test]
fn test_empty_index() {
    let index = HighlightIndex::default();

    assert!(index.is_empty());
    assert!(index.token_at(TextSize::from(0)).is_none());
    assert!(index.lines().is_empty());
}

#[test]
fn test_line_highlight_matches_by_line_and_text() {
    let tokens = lex(TWO_INSTRUCTIONS);
    let info = HighlightInfo::line(2, "AX", "Register");

    assert!(info.matches(&tokens[5]));
    assert!(!info.matches(&tokens[1]), "same text on another line");
}
