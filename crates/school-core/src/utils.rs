//! Small text helpers shared by the wizard, login and CLI

/// Keep only ASCII digits
pub fn only_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Loose e-mail shape check: some text, an `@`, some text, a dot, some text,
/// all on one line. Anything else (spaces included) is accepted.
pub fn is_valid_email(input: &str) -> bool {
    input.lines().any(|line| {
        let Some((at, _)) = line.char_indices().skip(1).find(|(_, c)| *c == '@') else {
            return false;
        };
        line.char_indices()
            .any(|(i, c)| c == '.' && i > at + 1 && i + 1 < line.len())
    })
}

/// Format a national id as `000.000.000-00`, ignoring non-digits and
/// anything past the eleventh digit. Partial input is formatted as far as it
/// goes.
pub fn mask_national_id(input: &str) -> String {
    let digits: String = only_digits(input).chars().take(11).collect();
    let mut out = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Format a phone number as `(00) 0000-0000` or, with eleven digits,
/// `(00) 00000-0000`. Partial input is formatted as far as it goes.
pub fn mask_phone(input: &str) -> String {
    let digits: Vec<char> = only_digits(input).chars().take(11).collect();
    if digits.is_empty() {
        return String::new();
    }

    let area: String = digits.iter().take(2).collect();
    if digits.len() <= 2 {
        return format!("({}", area);
    }

    let rest = &digits[2..];
    let split = if digits.len() == 11 { 5 } else { 4 };
    let head: String = rest.iter().take(split).collect();
    let tail: String = rest.iter().skip(split).collect();

    if tail.is_empty() {
        format!("({}) {}", area, head)
    } else {
        format!("({}) {}-{}", area, head, tail)
    }
}
