/// Parse a decimal amount string like `"12.50"` into integer cents.
///
/// Accepts an optional leading minus, at most two fractional digits, and
/// nothing else; a shorter fraction is zero-padded (`"3.5"` -> 350).
pub fn parse_cents(input: &str) -> Result<i64, String> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((_, "")) => return Err(format!("invalid amount '{}', expected e.g. 12.50", input)),
        Some((whole, frac)) => (whole, frac),
        None => (digits, ""),
    };

    let valid = !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && frac.len() <= 2
        && frac.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(format!("invalid amount '{}', expected e.g. 12.50", input));
    }

    let whole: i64 = whole
        .parse()
        .map_err(|_| format!("amount '{}' is out of range", input))?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|e| e.to_string())? * 10,
        _ => frac.parse().map_err(|e: std::num::ParseIntError| e.to_string())?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(|| format!("amount '{}' is out of range", input))?;

    Ok(if negative { -cents } else { cents })
}

/// Format integer cents as a decimal amount string (`1250` -> `"12.50"`).
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
