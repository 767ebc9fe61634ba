//! Serialized-markup to plain text conversion and back.
//!
//! Live-typing works on a block's serialized content: extraction must keep
//! line structure (`<br>` and block starts become `\n`, block ends produce
//! nothing, every other tag is dropped), and re-insertion must turn newlines
//! back into line-break markup.

/// Tags whose opening boundary starts a new line in the extracted text.
const BLOCK_START_TAGS: &[&str] = &["div", "p", "li"];

/// Convert a fragment of serialized markup to plain text with line breaks
/// preserved. Unknown tags are stripped; the basic named entities are
/// decoded; the result is not trimmed (callers decide).
pub fn markup_to_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(lt) = rest.find('<') {
        let (text, after) = rest.split_at(lt);
        push_decoded(&mut out, text);

        let Some(gt) = after.find('>') else {
            // Unterminated tag: treat the remainder as text.
            push_decoded(&mut out, after);
            return out;
        };
        let tag_body = &after[1..gt];
        rest = &after[gt + 1..];

        let closing = tag_body.starts_with('/');
        let name: String = tag_body
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if name == "br" {
            out.push('\n');
        } else if !closing && BLOCK_START_TAGS.contains(&name.as_str()) && !out.is_empty() {
            out.push('\n');
        }
        // Block-end boundaries and all other tags produce no character.
    }
    push_decoded(&mut out, rest);
    out
}

/// Convert plain text to a markup fragment: escape, then newlines to `<br>`.
pub fn text_to_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("<br>"),
            other => out.push(other),
        }
    }
    out
}

/// Decode the named/numeric entities that the translation backend is known
/// to emit.
pub fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn push_decoded(out: &mut String, text: &str) {
    if !text.is_empty() {
        out.push_str(&decode_entities(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lines_joined_by_single_newline() {
        // A block with two lines separated by a line-break element.
        assert_eq!(markup_to_text("first line<br>second line"), "first line\nsecond line");
        assert_eq!(markup_to_text("a<br/>b"), "a\nb");
        assert_eq!(markup_to_text("a<br />b"), "a\nb");
    }

    #[test]
    fn block_starts_become_newlines_and_ends_nothing() {
        assert_eq!(markup_to_text("<div>one</div><div>two</div>"), "one\ntwo");
        assert_eq!(markup_to_text("<p>x</p><p>y</p>"), "x\ny");
    }

    #[test]
    fn leading_block_start_adds_no_blank_line() {
        assert_eq!(markup_to_text("<div>only</div>"), "only");
    }

    #[test]
    fn inline_tags_are_stripped() {
        assert_eq!(
            markup_to_text("<span class=\"hl\">bold <b>words</b></span> end"),
            "bold words end"
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(markup_to_text("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&quot;hi&#39;"), "\"hi'");
    }

    #[test]
    fn unterminated_tag_degrades_to_text() {
        assert_eq!(markup_to_text("ok <broken"), "ok <broken");
    }

    #[test]
    fn text_to_markup_escapes_and_breaks() {
        assert_eq!(text_to_markup("a\nb"), "a<br>b");
        assert_eq!(text_to_markup("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
    }

    #[test]
    fn round_trip_of_plain_lines() {
        let text = "hello\nworld";
        assert_eq!(markup_to_text(&text_to_markup(text)), text);
    }
}
