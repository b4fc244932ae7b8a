#![no_main]

use loglyzer::parallel::split_line_aligned;
use loglyzer::{analyze, AnalysisConfig, BracketedParser, Parallelism, RecordParser};
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_LEN: usize = 8192;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > MAX_INPUT_LEN {
        return;
    }

    let chunks = (data[0] as usize % 16) + 1;
    let text = String::from_utf8_lossy(&data[1..]);

    // Malformed lines must come back as failures, never panics
    let parser = match BracketedParser::new() {
        Ok(p) => p,
        Err(_) => return,
    };
    for (i, line) in text.lines().enumerate() {
        if let Ok(record) = parser.parse(line, i + 1) {
            assert!(!record.message.is_empty());
        }
    }

    // Chunks cover the input exactly, in order
    let pieces = split_line_aligned(&text, chunks);
    let rejoined: String = pieces.iter().map(|c| c.text).collect();
    assert_eq!(rejoined, text);

    let run = |directive| {
        let mut config = AnalysisConfig::default();
        config.parallel.directive = directive;
        config.parallel.num_workers = 3;
        config.parallel.num_chunks = Some(chunks);
        analyze(&text, config)
    };
    if let (Ok(sequential), Ok(parallel)) = (run(Parallelism::Never), run(Parallelism::Always)) {
        assert_eq!(sequential.report, parallel.report);
        assert_eq!(sequential.failures, parallel.failures);
    }
});
