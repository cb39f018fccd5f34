use crate::defaults::BINGO_MAX;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled patterns for form validation
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static ORDER_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9-]{4,32}$").unwrap());
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-(\d{2})-(\d{2})$").unwrap());
static TIME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2})$").unwrap());

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} não pode ficar vazio", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} deve ser pelo menos {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} não pode passar de {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} deve ser um número válido", field_name)),
    }
}

/// Quantity typed into a cart line
pub fn validate_quantity(input: &str) -> Result<u32, String> {
    validate_numeric_input(input, Some(1), Some(999), "Quantidade")
}

pub fn is_valid_email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input.trim())
}

/// Uppercases and strips whitespace from a typed or scanned order code.
pub fn normalize_order_code(input: &str) -> Result<String, String> {
    let code: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if code.is_empty() {
        return Err("Informe o código do pedido".to_string());
    }
    if !ORDER_CODE_REGEX.is_match(&code) {
        return Err(format!("Código inválido: {}", code));
    }
    Ok(code)
}

/// `YYYY-MM-DD` as produced by `<input type="date">`
pub fn is_valid_date(input: &str) -> bool {
    DATE_REGEX
        .captures(input.trim())
        .and_then(|c| Some((c[1].parse::<u32>().ok()?, c[2].parse::<u32>().ok()?)))
        .is_some_and(|(month, day)| (1..=12).contains(&month) && (1..=31).contains(&day))
}

/// `HH:MM` as produced by `<input type="time">`
pub fn is_valid_time(input: &str) -> bool {
    TIME_REGEX
        .captures(input.trim())
        .and_then(|c| Some((c[1].parse::<u32>().ok()?, c[2].parse::<u32>().ok()?)))
        .is_some_and(|(hour, minute)| hour < 24 && minute < 60)
}

/// Formats cents as Brazilian reais, e.g. `R$ 1.234,50`.
pub fn format_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let reais = (cents / 100).to_string();

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, ch) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

/// Converts a decimal amount from the backend into cents.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Column letter of a bingo number (B 1-15, I 16-30, N 31-45, G 46-60, O 61-75).
pub fn bingo_letter(n: u32) -> Option<char> {
    if n == 0 || n > BINGO_MAX {
        return None;
    }
    let column = ((n - 1) / 15) as usize;
    "BINGO".chars().nth(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_bounds() {
        assert_eq!(validate_quantity(" 3 "), Ok(3));
        assert!(validate_quantity("0").is_err());
        assert!(validate_quantity("1000").is_err());
        assert_eq!(
            validate_quantity("x"),
            Err("Quantidade deve ser um número válido".to_string())
        );
        assert_eq!(
            validate_quantity(""),
            Err("Quantidade não pode ficar vazio".to_string())
        );
    }

    #[test]
    fn emails() {
        assert!(is_valid_email("ana@igreja.org"));
        assert!(is_valid_email("  ana.silva@igreja.org.br "));
        assert!(!is_valid_email("ana@igreja"));
        assert!(!is_valid_email("ana silva@igreja.org"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn order_codes_are_normalized() {
        assert_eq!(normalize_order_code(" ek-12ab \n"), Ok("EK-12AB".to_string()));
        assert!(normalize_order_code("   ").is_err());
        assert!(normalize_order_code("EK#1").is_err());
    }

    #[test]
    fn dates_and_times() {
        assert!(is_valid_date("2026-10-16"));
        assert!(!is_valid_date("2026-13-01"));
        assert!(!is_valid_date("16/10/2026"));
        assert!(is_valid_time("19:30"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("7:30"));
    }

    #[test]
    fn brl_formatting() {
        assert_eq!(format_brl(0), "R$ 0,00");
        assert_eq!(format_brl(1250), "R$ 12,50");
        assert_eq!(format_brl(123_456_789), "R$ 1.234.567,89");
        assert_eq!(format_brl(-505), "-R$ 5,05");
        assert_eq!(to_cents(19.9), 1990);
    }

    #[test]
    fn bingo_columns() {
        assert_eq!(bingo_letter(1), Some('B'));
        assert_eq!(bingo_letter(15), Some('B'));
        assert_eq!(bingo_letter(16), Some('I'));
        assert_eq!(bingo_letter(45), Some('N'));
        assert_eq!(bingo_letter(75), Some('O'));
        assert_eq!(bingo_letter(0), None);
        assert_eq!(bingo_letter(76), None);
    }
}
