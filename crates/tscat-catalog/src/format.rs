//! Positional placeholder substitution (`%1` … `%99`).

use std::collections::BTreeSet;

/// Replace `%1`, `%2`, ... in `template` with `args[0]`, `args[1]`, ...
///
/// Placeholders are one or two digits. The template is scanned once, left
/// to right; substituted values are never rescanned. A placeholder with no
/// matching argument (including `%0`) stays verbatim, and a `%` not
/// followed by a digit is literal, so `"Volume at %1%"` with `["50"]`
/// gives `"Volume at 50%"`.
pub fn format<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let Some((number, digits)) = placeholder_at(&bytes[i + 1..]) else {
            i += 1;
            continue;
        };
        let end = i + 1 + digits;
        if let Some(arg) = number.checked_sub(1).and_then(|idx| args.get(idx)) {
            out.push_str(&template[copied..i]);
            out.push_str(arg.as_ref());
            copied = end;
        }
        i = end;
    }
    out.push_str(&template[copied..]);
    out
}

/// Placeholder numbers used in `text`, e.g. `{1, 2}` for `"%1 of %2"`.
pub fn placeholders(text: &str) -> BTreeSet<usize> {
    let bytes = text.as_bytes();
    let mut found = BTreeSet::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some((number, digits)) = placeholder_at(&bytes[i + 1..]) {
                if number > 0 {
                    found.insert(number);
                }
                i += 1 + digits;
                continue;
            }
        }
        i += 1;
    }
    found
}

/// Number and digit count of a placeholder body at the start of `rest`.
fn placeholder_at(rest: &[u8]) -> Option<(usize, usize)> {
    let digits = rest.iter().take(2).take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let number = rest[..digits]
        .iter()
        .fold(0usize, |acc, b| acc * 10 + usize::from(b - b'0'));
    Some((number, digits))
}
