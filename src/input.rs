// 🔢 Tolerant numeric input
// Turns whatever a headcount field holds into a non-negative count.
//
// Rules (same as a browser integer parse, then clamped):
//   ""        → 0
//   "42"      → 42
//   " +7 "    → 7
//   "12abc"   → 12   (leading digits win)
//   "3.7"     → 3
//   "-5"      → 0   (negatives clamp)
//   "abc"     → 0
//   huge      → u32::MAX

/// Parse a raw field value into a headcount. Never fails.
pub fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim();

    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 || negative {
        return 0;
    }

    let digits = &rest[..digits_len];
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Clamp an already-numeric value into the headcount range.
pub fn clamp_count(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

// ============================================================================
// TESTS
// ============================================================================
