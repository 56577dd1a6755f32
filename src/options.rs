//! Decode limits.
//!
//! The wire format itself carries no limits; these options let a caller cap
//! what a single decode may allocate when the input comes from an untrusted
//! source.
//!
//! # Beispiel
//!
//! ```
//! use chefwire::DecodeOptions;
//!
//! let opts = DecodeOptions::default()
//!     .with_max_text_length(256)
//!     .with_max_repeated_count(100);
//!
//! assert_eq!(opts.max_text_length(), Some(256));
//! assert_eq!(opts.max_repeated_count(), Some(100));
//! ```

/// Options controlling [`decode_with_options`](crate::codec::decode_with_options).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub(crate) max_text_length: Option<u32>,
    pub(crate) max_repeated_count: Option<u32>,
}

impl DecodeOptions {
    // --- Getter ---

    /// Maximum byte length of a single text value (`None` = unlimited).
    pub fn max_text_length(&self) -> Option<u32> {
        self.max_text_length
    }

    /// Maximum number of entries per repeated field (`None` = unlimited).
    pub fn max_repeated_count(&self) -> Option<u32> {
        self.max_repeated_count
    }

    // --- Builder ---

    pub fn with_max_text_length(mut self, len: u32) -> Self {
        self.max_text_length = Some(len);
        self
    }

    pub fn with_max_repeated_count(mut self, count: u32) -> Self {
        self.max_repeated_count = Some(count);
        self
    }

    // --- Setter ---

    pub fn set_max_text_length(&mut self, len: Option<u32>) {
        self.max_text_length = len;
    }

    pub fn set_max_repeated_count(&mut self, count: Option<u32>) {
        self.max_repeated_count = count;
    }

    /// `true` if any limit is set.
    pub fn is_limited(&self) -> bool {
        self.max_text_length.is_some() || self.max_repeated_count.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.max_text_length(), None);
        assert_eq!(opts.max_repeated_count(), None);
        assert!(!opts.is_limited());
    }

    #[test]
    fn with_methods_set_limits() {
        let opts = DecodeOptions::default().with_max_text_length(0);
        assert_eq!(opts.max_text_length(), Some(0));
        assert!(opts.is_limited());
    }

    #[test]
    fn setters_can_clear_limits() {
        let mut opts = DecodeOptions::default()
            .with_max_text_length(10)
            .with_max_repeated_count(3);
        opts.set_max_text_length(None);
        assert_eq!(opts.max_text_length(), None);
        assert_eq!(opts.max_repeated_count(), Some(3));
        opts.set_max_repeated_count(None);
        assert!(!opts.is_limited());
    }
}
