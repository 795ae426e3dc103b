//! Numbering-plan rules for the displayed "from" number

/// Display-number prefixes rewritten to a dialable prefix, checked in order
pub const FROM_PREFIX_RULES: &[(&str, &str)] = &[("699954", "421")];

/// "From" number used when no prefix rule applies
pub const DEFAULT_FROM_NUMBER: &str = "unknown";

/// Derive the "from" number from a destination display number
///
/// # Examples
///
/// ```
/// use clitrace_extractor::numbering::derive_from_number;
///
/// assert_eq!(derive_from_number("699954123456"), "421123456");
/// assert_eq!(derive_from_number("0911222333"), "unknown");
/// ```
pub fn derive_from_number(display: &str) -> String {
    FROM_PREFIX_RULES
        .iter()
        .find_map(|(prefix, replacement)| {
            display
                .strip_prefix(prefix)
                .map(|rest| format!("{}{}", replacement, rest))
        })
        .unwrap_or_else(|| DEFAULT_FROM_NUMBER.to_string())
}
