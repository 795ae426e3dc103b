//! Line normalisation and CLI pair extraction

use clitrace_domain::pair::{is_cli_token, is_marker_line};
use clitrace_domain::{CliPair, ANONYMOUS, NO_CLI_PRESENTED};

/// Split raw text into trimmed, non-empty lines, preserving order
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Extract CLI pairs from normalised lines
///
/// A marker line followed by a numeric token yields `{sent, received}`; a
/// marker line followed by `No CLI presented` yields an anonymous pair. Both
/// lines are consumed. Any other follower leaves the marker unpaired and the
/// scan moves on by one line.
pub fn extract_pairs(lines: &[&str]) -> Vec<CliPair> {
    scan_pairs(lines).into_iter().map(|(_, pair)| pair).collect()
}

/// Delivered CLI values only, as returned by `only_cli` requests
///
/// Runs the same scan as [`extract_pairs`]; anonymous pairs still consume
/// their two lines but contribute nothing.
pub fn extract_delivered_clis(lines: &[&str]) -> Vec<String> {
    extract_pairs(lines)
        .into_iter()
        .filter(|pair| !pair.is_anonymous())
        .map(|pair| pair.received)
        .collect()
}

/// Pairs tagged with the index of their marker line
pub(crate) fn scan_pairs(lines: &[&str]) -> Vec<(usize, CliPair)> {
    let mut pairs = Vec::new();
    let mut i = 0;

    while i + 1 < lines.len() {
        let (line, next) = (lines[i], lines[i + 1]);

        if is_marker_line(line) {
            let received = if is_cli_token(next) {
                Some(next)
            } else if next == NO_CLI_PRESENTED {
                Some(ANONYMOUS)
            } else {
                None
            };

            if let Some(received) = received {
                pairs.push((i, CliPair::new(line, received)));
                i += 2;
                continue;
            }
        }

        i += 1;
    }

    pairs
}
