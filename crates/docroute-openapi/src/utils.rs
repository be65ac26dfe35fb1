//! Path helpers

use once_cell::sync::Lazy;
use regex::Regex;

static PATH_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([A-Za-z0-9_]+)").expect("path parameter pattern is valid")
});

/// Rewrite `:name` tokens as `{name}`.
///
/// Plain text substitution: a literal colon followed by word characters is
/// rewritten too.
pub fn convert_path(path: &str) -> String {
    PATH_PARAM.replace_all(path, "{$1}").into_owned()
}

/// Names of the `:name` tokens in a routing path, in order of appearance
pub fn path_param_names(path: &str) -> Vec<String> {
    PATH_PARAM
        .captures_iter(path)
        .map(|caps| caps[1].to_string())
        .collect()
}
