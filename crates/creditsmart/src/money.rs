//! Colombian peso formatting and parsing for amounts shown on cards and typed into forms.
//!
//! Amounts are whole pesos. Formatting follows the es-CO currency convention (`$`, a no-break
//! space, `.` as thousands separator, no decimals) and parsing accepts anything the formatter
//! produces, ignoring every non-digit character.

const CURRENCY_SYMBOL: &str = "$";
const SYMBOL_SEPARATOR: char = '\u{a0}';
const GROUP_SEPARATOR: char = '.';

/// Render `value` as a peso amount, e.g. `1000000` becomes `"$ 1.000.000"`.
pub fn format_money(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    format!("{CURRENCY_SYMBOL}{SYMBOL_SEPARATOR}{grouped}")
}

/// Render an annual rate fraction as a percentage with one decimal, e.g. `0.169` becomes
/// `"16.9% anual"`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}% anual", rate * 100.0)
}

/// Strip every non-digit and parse what remains. Never fails: no digits yields `0` and digit
/// strings beyond `u64::MAX` saturate.
pub fn parse_money_string(formatted: &str) -> u64 {
    formatted
        .chars()
        .filter_map(|ch| ch.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// Normalise raw keystrokes in a currency input: empty when nothing numeric was typed,
/// otherwise the formatted amount.
pub fn format_money_input(raw: &str) -> String {
    if !raw.chars().any(|ch| ch.is_ascii_digit()) {
        return String::new();
    }
    format_money(parse_money_string(raw))
}
