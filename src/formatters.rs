/// Display formatting helpers
///
/// All helpers are lenient: anything that does not look like the expected
/// input comes back unchanged, which also makes them idempotent - formatting
/// an already-formatted value is a no-op.
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_IN_TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(0x[a-fA-F0-9]{8,})").unwrap());

pub const DEFAULT_HEX_TRUNCATE_LEN: usize = 10;

/// Format an APY value as a two-decimal percentage, e.g. "5.25%"
pub fn format_apy(apy: &str) -> String {
    if apy.is_empty() || apy == "N/A" {
        return "N/A".to_string();
    }
    match apy.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{:.2}%", v),
        _ => "N/A".to_string(),
    }
}

/// Format big numbers in human readable form: "1.4K", "7.06M", "2.15B"
///
/// Non-numeric input (including already-formatted values like "1.4K") is
/// returned unchanged.
pub fn format_number(value: &str) -> String {
    let v = match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return value.to_string(),
    };

    // thresholds are signed: negatives never scale, they render plain
    if v >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format!("{:.2}", v)
    }
}

/// Catch-all numeric formatter used by reward and vault displays
pub fn format_any_numeric_value(value: &str) -> String {
    format_number(value)
}

/// Format "58.982631 USDT" as "58.98 USDT"; anything not shaped like
/// "number unit" is returned unchanged
pub fn format_number_with_unit(value_with_unit: &str) -> String {
    let parts: Vec<&str> = value_with_unit.split(' ').collect();
    if parts.len() != 2 {
        return value_with_unit.to_string();
    }
    format!("{} {}", format_number(parts[0]), parts[1])
}

/// Standardized currency format with symbol in front: "$1,234.56"
pub fn format_currency(value: &str, currency: &str) -> String {
    let v = match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return format!("{}0.00", currency),
    };
    let negative = v < 0.0;
    let rounded = format!("{:.2}", v.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = group_thousands(int_part);
    // sign goes after the symbol, "$-9,876.50"
    if negative {
        format!("{}-{}.{}", currency, grouped, frac_part)
    } else {
        format!("{}{}.{}", currency, grouped, frac_part)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

/// Truncate a hex string to "0x1234...abcd" form
///
/// Strings without a "0x" prefix or already at/below the threshold are
/// returned unchanged, so truncating twice is safe.
pub fn truncate_hex(hex: &str, max_length: usize) -> String {
    if !hex.starts_with("0x") || hex.len() <= max_length + 2 {
        return hex.to_string();
    }
    let head = max_length.div_ceil(2) + 2;
    let tail = max_length / 2;
    format!("{}...{}", &hex[..head], &hex[hex.len() - tail..])
}

/// Truncate every long hex run (0x + 8 or more hex chars) inside free text
pub fn truncate_hex_in_text(text: &str, max_length: usize) -> String {
    HEX_IN_TEXT_RE
        .replace_all(text, |caps: &regex::Captures| {
            truncate_hex(&caps[1], max_length)
        })
        .to_string()
}

/// Convert a raw token amount to human readable units at fixed precision
pub fn format_token_amount(amount: &str, decimals: u8, precision: usize) -> String {
    let v = match amount.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return amount.to_string(),
    };
    format!("{:.*}", precision, v / 10f64.powi(decimals as i32))
}

/// Format an 18-decimal wei string (reward amounts) as human readable;
/// missing values render as "-"
pub fn format_reward_value(value: Option<&str>) -> String {
    let raw = match value {
        Some(v) if !v.is_empty() => v,
        _ => return "-".to_string(),
    };
    let wei: u128 = match raw.parse() {
        Ok(v) => v,
        Err(_) => return raw.to_string(),
    };
    const WEI_PER_UNIT: u128 = 1_000_000_000_000_000_000;
    let int = wei / WEI_PER_UNIT;
    let frac = wei % WEI_PER_UNIT;
    let decimal = if frac == 0 {
        int.to_string()
    } else {
        format!("{}.{:018}", int, frac)
            .trim_end_matches('0')
            .to_string()
    };
    format_any_numeric_value(&decimal)
}
