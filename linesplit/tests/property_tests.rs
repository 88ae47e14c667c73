//! Property-based tests: driver identity and reconstruction

use linesplit::{Segmenter, SegmenterConfig};
use proptest::prelude::*;
use tokio_util::sync::CancellationToken;

fn pull(input: &str, config: &SegmenterConfig) -> Vec<String> {
    Segmenter::with_config(input.as_bytes(), config.clone())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn suspend(input: &str, config: &SegmenterConfig) -> Vec<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    runtime.block_on(async {
        let cancel = CancellationToken::new();
        let mut segmenter = Segmenter::with_config_async(input.as_bytes(), config.clone()).unwrap();
        let mut segments = Vec::new();
        while let Some(segment) = segmenter.next_segment(&cancel).await.unwrap() {
            segments.push(segment);
        }
        segments
    })
}

fn arb_config() -> impl Strategy<Value = SegmenterConfig> {
    (
        prop_oneof![Just('\n'), Just('\0'), Just(','), Just('é')],
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        1usize..16,
    )
        .prop_map(|(separator, suppress_blanks, crlf_fold, buffered, capacity)| {
            SegmenterConfig::builder()
                .separator(separator)
                .suppress_blanks(suppress_blanks)
                .crlf_fold(crlf_fold)
                .buffered(buffered)
                .buffer_capacity(capacity)
                .build()
                .unwrap()
        })
}

fn keep_blanks(separator: char, crlf_fold: bool) -> SegmenterConfig {
    SegmenterConfig::builder()
        .separator(separator)
        .suppress_blanks(false)
        .crlf_fold(crlf_fold)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_pull_and_suspend_agree(
        input in "[ab,é\\n\\r\\x00]{0,64}",
        config in arb_config(),
    ) {
        prop_assert_eq!(pull(&input, &config), suspend(&input, &config));
    }

    #[test]
    fn prop_rejoin_reconstructs_input(
        input in "[ab,é\\n\\r\\x00]{0,64}",
        separator in prop_oneof![Just('\n'), Just('\0'), Just(',')],
    ) {
        let segments = pull(&input, &keep_blanks(separator, false));
        prop_assert_eq!(segments.join(separator.to_string().as_str()), input);
    }

    #[test]
    fn prop_rejoin_with_fold_normalizes_carriage_returns(input in "[ab\\n\\r]{0,64}") {
        let segments = pull(&input, &keep_blanks('\n', true));
        prop_assert_eq!(segments.join("\n"), input.replace('\r', "\n"));
    }

    #[test]
    fn prop_suppression_only_drops_blanks(
        input in "[ab\\n\\r]{0,64}",
        crlf_fold in any::<bool>(),
    ) {
        let kept = pull(&input, &keep_blanks('\n', crlf_fold));
        let suppressed = SegmenterConfig::builder()
            .crlf_fold(crlf_fold)
            .build()
            .unwrap();

        let expected: Vec<String> = kept
            .into_iter()
            .filter(|segment| !segment.is_empty() && segment != "\r")
            .collect();
        prop_assert_eq!(pull(&input, &suppressed), expected);
    }

    #[test]
    fn prop_segments_never_contain_boundaries(
        input in "[ab\\n\\r]{0,64}",
        config in arb_config(),
    ) {
        for segment in pull(&input, &config) {
            prop_assert!(!segment.contains(config.separator()));
            if config.crlf_fold() {
                prop_assert!(!segment.contains('\r'));
            }
        }
    }
}
