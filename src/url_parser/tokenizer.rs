/// Separators folded into `/` before path tokens are split out
const PATH_SEPARATORS: [&str; 4] = ["-", "_", "%20", "."];

/// Separators used for last-segment brand lookups
pub const SEGMENT_SEPARATORS: [char; 8] = ['/', '-', '_', '.', '=', '&', '?', '%'];

/// Path tokens plus the structural depth of the original path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTokens {
    pub tokens: Vec<String>,
    /// Number of non-empty `/` segments in the path before any separator
    /// folding, so `/a-b-c` has depth 1 and three tokens.
    pub depth: usize,
}

/// Lower-cases `path`, folds `-`, `_`, `%20` and `.` into `/` and splits.
pub fn tokenize_path(path: &str) -> PathTokens {
    let lower = path.to_lowercase();
    let depth = lower.split('/').filter(|s| !s.is_empty()).count();

    let mut folded = lower;
    for sep in PATH_SEPARATORS {
        folded = folded.replace(sep, "/");
    }

    let tokens = folded
        .split('/')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    PathTokens { tokens, depth }
}

/// Splits `text` on any of `separators`, dropping empty pieces.
pub fn split_tokens(text: &str, separators: &[char]) -> Vec<String> {
    text.split(|c: char| separators.contains(&c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Last non-empty `/` segment of `path`, lower-cased
pub fn last_path_segment(path: &str) -> String {
    path.trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}
