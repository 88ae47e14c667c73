//! Basic tests for linesplit-core

use linesplit_core::*;
use proptest::prelude::*;

fn split(input: &str, options: ScanOptions) -> Vec<String> {
    let mut scanner = Scanner::new(options);
    let mut segments = Vec::new();
    for unit in input.chars().map(Some).chain([None]) {
        match scanner.step(unit) {
            Step::Segment(segment) | Step::Finished(Some(segment)) => segments.push(segment),
            Step::Continue | Step::Suppressed | Step::Finished(None) => {}
        }
    }
    segments
}

fn options(separator: char, suppress_blanks: bool, crlf_fold: bool) -> ScanOptions {
    ScanOptions {
        separator,
        suppress_blanks,
        crlf_fold,
    }
}

#[test]
fn test_embedded_nul_is_not_a_boundary() {
    assert_eq!(split("foo\0bar", options(LF, true, false)), ["foo\0bar"]);
}

#[test]
fn test_nul_separator() {
    assert_eq!(split("foo\0bar", options('\0', true, false)), ["foo", "bar"]);
}

#[test]
fn test_blank_segments() {
    assert_eq!(
        split("foo\n\nbar", options(LF, false, false)),
        ["foo", "", "bar"]
    );
    assert_eq!(split("foo\n\nbar", options(LF, true, false)), ["foo", "bar"]);
}

#[test]
fn test_crlf_blank_runs_collapse() {
    assert_eq!(
        split("foo\r\n\r\nbar", options(LF, true, true)),
        ["foo", "bar"]
    );
}

#[test]
fn test_multibyte_separator_character() {
    assert_eq!(
        split("α→β→→γ", options('→', false, false)),
        ["α", "β", "", "γ"]
    );
}

#[test]
fn test_counters_track_decisions() {
    let mut scanner = Scanner::new(options(LF, true, false));
    for unit in "a\n\nb\n".chars().map(Some).chain([None]) {
        scanner.step(unit);
    }
    assert_eq!(scanner.emitted(), 2);
    assert_eq!(scanner.suppressed(), 2);
    assert!(scanner.is_finished());
}

proptest! {
    #[test]
    fn prop_keeping_blanks_round_trips(
        input in "[ab\\n\\r\\x00é]{0,64}",
        separator in prop::sample::select(vec!['\n', '\0', 'a', 'é']),
    ) {
        let segments = split(&input, options(separator, false, false));
        prop_assert_eq!(segments.join(&separator.to_string()), input);
    }

    #[test]
    fn prop_folding_round_trips_with_cr_as_separator(input in "[ab\\n\\r]{0,64}") {
        let segments = split(&input, options(LF, false, true));
        prop_assert_eq!(segments.join("\n"), input.replace('\r', "\n"));
    }

    #[test]
    fn prop_suppressing_never_yields_blanks(input in "[ab\\n\\r]{0,64}", crlf_fold in any::<bool>()) {
        let segments = split(&input, options(LF, true, crlf_fold));
        prop_assert!(segments.iter().all(|segment| !segment.is_empty() && segment != "\r"));
        prop_assert!(segments.iter().all(|segment| !segment.contains('\n')));
    }
}
