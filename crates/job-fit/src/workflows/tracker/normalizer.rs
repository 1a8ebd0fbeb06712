/// Matching key for company and position names: trimmed and lowercased.
pub(crate) fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Header cells may carry a UTF-8 byte order mark or zero-width spaces when the
/// sheet was exported from a spreadsheet application.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_trimmed_and_lowercased_but_not_collapsed() {
        assert_eq!(normalize_key("  TD Bank "), "td bank");
        assert_eq!(normalize_key("QA  Automation"), "qa  automation");
    }

    #[test]
    fn headers_drop_byte_order_marks() {
        assert_eq!(normalize_header("\u{feff}Company"), "company");
        assert_eq!(normalize_header(" Applied Date "), "applied date");
    }
}
