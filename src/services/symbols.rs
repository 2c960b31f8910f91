//! A-share code helpers.

/// Six digits, optionally prefixed by `sh`, `sz` or `bj` (case-insensitive).
pub fn validate_stock_code(code: &str) -> bool {
    let lower = code.to_ascii_lowercase();
    let digits = ["sh", "sz", "bj"]
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .unwrap_or(&lower);
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Add the exchange prefix for bare Shenzhen (`00`, `30`) and Shanghai (`60`) codes.
/// Anything else is returned unchanged.
pub fn full_code(code: &str) -> String {
    if code.starts_with("00") || code.starts_with("30") {
        format!("sz{}", code)
    } else if code.starts_with("60") {
        format!("sh{}", code)
    } else {
        code.to_string()
    }
}

/// Strip an `sh`/`sz` prefix from a prefixed six-digit code.
pub fn extract_code(code: &str) -> &str {
    for prefix in ["sh", "sz"] {
        if let Some(rest) = code.strip_prefix(prefix) {
            if rest.len() == 6 && rest.bytes().all(|b| b.is_ascii_digit()) {
                return rest;
            }
        }
    }
    code
}
