//! Display formatting for scalar record fields.
//!
//! Absent, `null` and empty values all count as missing.

pub const NO_PHONE: &str = "No phone registered.";

/// Placeholder returned for any time that cannot be decoded.
pub const MIDNIGHT: &str = "00:00";

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Combine the address phone and the mobile number into one line.
pub fn format_contact(address: Option<&str>, mobile: Option<&str>) -> String {
    match (present(address), present(mobile)) {
        (Some(address), Some(mobile)) if address != mobile => format!("{address} / {mobile}"),
        (Some(one), _) | (None, Some(one)) => one.to_string(),
        (None, None) => NO_PHONE.to_string(),
    }
}

/// Decode a compact clock value into `HH:MM`.
///
/// Three digits read as `H MM`, four as `HH MM`; anything else, including
/// non-digit input, becomes `00:00`. The mapping is lossy: `"930"` and
/// `"0930"` both yield `09:30`, so the output cannot be turned back into the
/// input string.
pub fn format_time(raw: Option<&str>) -> String {
    let Some(raw) = present(raw) else {
        return MIDNIGHT.to_string();
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return MIDNIGHT.to_string();
    }

    match raw.len() {
        3 => format!("0{}:{}", &raw[..1], &raw[1..]),
        4 => format!("{}:{}", &raw[..2], &raw[2..]),
        _ => MIDNIGHT.to_string(),
    }
}

/// Whether `raw` is a compact clock value that [`format_time`] can decode.
pub fn is_compact_time(raw: &str) -> bool {
    matches!(raw.len(), 3 | 4) && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Comma-join the non-empty items, or fall back to `default`.
pub fn join_or_default<S: AsRef<str>>(items: &[S], default: &str) -> String {
    let parts: Vec<&str> = items
        .iter()
        .map(AsRef::as_ref)
        .filter(|item| !item.is_empty())
        .collect();

    if parts.is_empty() {
        default.to_string()
    } else {
        parts.join(", ")
    }
}

/// Trimmed variant of [`join_or_default`] for free-text entries.
pub fn join_trimmed_or_default<'a, I>(items: I, default: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let parts: Vec<&str> = items
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    join_or_default(&parts, default)
}

/// Value or a fixed fallback.
pub fn or_default(value: Option<&str>, default: &str) -> String {
    present(value).unwrap_or(default).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn contact_combines_distinct_numbers() {
        assert_eq!(
            format_contact(Some("213000000"), Some("912000000")),
            "213000000 / 912000000"
        );
        assert_eq!(format_contact(Some("912"), Some("912")), "912");
        assert_eq!(format_contact(None, Some("912")), "912");
        assert_eq!(format_contact(Some("213"), Some("")), "213");
        assert_eq!(format_contact(Some(""), Some("")), NO_PHONE);
        assert_eq!(format_contact(None, None), NO_PHONE);
    }

    #[test]
    fn time_decodes_three_and_four_digits() {
        assert_eq!(format_time(Some("930")), "09:30");
        assert_eq!(format_time(Some("0930")), "09:30");
        assert_eq!(format_time(Some("2315")), "23:15");
        assert_eq!(format_time(Some("12345")), "00:00");
        assert_eq!(format_time(Some("9:3")), "00:00");
        assert_eq!(format_time(Some("")), "00:00");
        assert_eq!(format_time(None), "00:00");
    }

    #[test]
    fn join_skips_empty_items() {
        assert_eq!(join_or_default(&["HTA", "", "DM2"], "none"), "HTA, DM2");
        assert_eq!(join_or_default::<&str>(&[], "none"), "none");
        assert_eq!(
            join_trimmed_or_default([Some("  calm "), None, Some("   ")], "none"),
            "calm"
        );
    }

    proptest! {
        #[test]
        fn time_is_total(raw in ".{0,8}") {
            let out = format_time(Some(&raw));
            let bytes = out.as_bytes();
            prop_assert_eq!(bytes.len(), 5);
            prop_assert_eq!(bytes[2], b':');
            prop_assert!(bytes.iter().enumerate().all(|(i, b)| i == 2 || b.is_ascii_digit()));
        }

        #[test]
        fn identical_numbers_collapse(x in "[0-9]{1,12}") {
            prop_assert_eq!(format_contact(Some(&x), Some(&x)), x);
        }
    }
}
