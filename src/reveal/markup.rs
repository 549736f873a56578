//! Inline rich-text tags such as `<sketchy>…</sketchy>`.
//!
//! Tags are styling hints for the presentation surface; they take no time to
//! reveal and are never shown as characters.

/// Byte length of the tag starting at the head of `rest`, if any.
///
/// A tag is `<`, one or more characters other than `<`, `>` or a line break,
/// then `>`.
fn tag_len(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('<')?;
    let end = body.find(['<', '>', '\n'])?;
    (end > 0 && body[end..].starts_with('>')).then_some(end + 2)
}

/// Splits `text` into visible characters, skipping tags.
fn visible_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        while let Some(len) = tag_len(rest) {
            rest = &rest[len..];
        }
        let c = rest.chars().next()?;
        rest = &rest[c.len_utf8()..];
        Some(c)
    })
}

/// Number of characters a reader will see once `text` is fully revealed.
///
/// # Examples
/// ```
/// # use scene_intro::reveal::markup::visible_len;
/// assert_eq!(visible_len("<sketchy>Hi</sketchy>"), 2);
/// assert_eq!(visible_len("..."), 3);
/// ```
pub fn visible_len(text: &str) -> usize {
    visible_chars(text).count()
}

/// The first `count` visible characters of `text`, tags removed.
pub fn visible_prefix(text: &str, count: usize) -> String {
    visible_chars(text).take(count).collect()
}

/// `text` with every tag removed.
pub fn strip_tags(text: &str) -> String {
    visible_chars(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_counts_every_char() {
        assert_eq!(visible_len("Nurse: Or loyal"), 15);
    }

    #[test]
    fn tags_are_not_counted() {
        let line = "Stranger: <sketchy>Most good things do</sketchy>";
        assert_eq!(visible_len(line), "Stranger: Most good things do".len());
    }

    #[test]
    fn multibyte_chars_count_once() {
        assert_eq!(visible_len("sea’s"), 5);
    }

    #[test]
    fn lone_angle_brackets_are_text() {
        assert_eq!(visible_len("a < b"), 5);
        assert_eq!(visible_len("<>"), 2);
        assert_eq!(strip_tags("1 <2 <b>x</b>"), "1 <2 x");
    }

    #[test]
    fn prefix_skips_leading_tags() {
        assert_eq!(visible_prefix("<sketchy>Silence.</sketchy>", 3), "Sil");
    }

    #[test]
    fn prefix_longer_than_text_returns_all() {
        assert_eq!(visible_prefix("<i>ab</i>", 10), "ab");
    }
}
