//! Types for use as [crate::Read::Cfg].

/// Default limit on how deeply tables may nest while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while decoding untrusted input.
///
/// # Examples
///
/// ```
/// use sbf_codec::Config;
///
/// // Reject anything nested deeper than two tables.
/// let cfg = Config::default().with_max_depth(2);
/// assert_eq!(cfg.max_depth, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nested nodes (the root counts as depth 1).
    ///
    /// Decoding recurses once per nested node, so this bounds the stack used by adversarial
    /// input.
    pub max_depth: usize,
}

impl Config {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
