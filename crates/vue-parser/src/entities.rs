//! Character reference decoding for attribute values.

use std::borrow::Cow;

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
];

/// Decodes `&#NN;`, `&#xHH;` and the basic named references.
///
/// References without a trailing `;`, unknown names and invalid code points
/// are kept as written.
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_reference(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decodes the reference at the start of `text`, returning the character and
/// the number of bytes consumed.
fn decode_reference(text: &str) -> Option<(char, usize)> {
    let semi = text.find(';')?;
    let body = &text[1..semi];

    let ch = if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        char::from_u32(code).filter(|&c| c != '\0')?
    } else {
        NAMED
            .iter()
            .find(|(name, _)| *name == body)
            .map(|&(_, ch)| ch)?
    };
    Some((ch, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_entities("AD-POST"), Cow::Borrowed("AD-POST")));
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_entities("AD&#45;POST"), "AD-POST");
        assert_eq!(decode_entities("AC&#x5F;ad"), "AC_ad");
        assert_eq!(decode_entities("AC&#X5f;ad"), "AC_ad");
    }

    #[test]
    fn test_named_references() {
        assert_eq!(decode_entities("a&amp;b &lt;c&gt;"), "a&b <c>");
    }

    #[test]
    fn test_malformed_references_are_kept() {
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
        assert_eq!(decode_entities("&#45"), "&#45");
        assert_eq!(decode_entities("&#0;"), "&#0;");
        assert_eq!(decode_entities("&#xzz;"), "&#xzz;");
    }
}
