//! Text normalization for decoded resume text

use regex::Regex;

/// Strips markup and undecodable characters from resume text.
///
/// Two variants are provided: [`TextNormalizer::normalize`] keeps line
/// breaks (section segmentation depends on them) and
/// [`TextNormalizer::normalize_single_line`] collapses everything onto one
/// line. Within a line, a run of two or more spaces is kept as exactly two
/// spaces since column gaps separate items in skill lists.
pub struct TextNormalizer {
    block_tag_regex: Regex,
    tag_regex: Regex,
    entity_regex: Regex,
    column_gap_regex: Regex,
    blank_lines_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let block_tag_regex = Regex::new(r"(?i)<\s*(?:br|/p|/div|/li|/h[1-6]|/tr)\b[^<>]*>")
            .expect("Invalid block tag regex");

        let tag_regex = Regex::new(r"<[^<>]*>").expect("Invalid tag regex");

        let entity_regex = Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
            .expect("Invalid entity regex");

        let column_gap_regex = Regex::new(r" {2,}").expect("Invalid column gap regex");

        let blank_lines_regex = Regex::new(r"\n{3,}").expect("Invalid blank lines regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            block_tag_regex,
            tag_regex,
            entity_regex,
            column_gap_regex,
            blank_lines_regex,
            whitespace_regex,
        }
    }

    /// Multi-line normalization: markup stripped, line breaks kept, lines
    /// trimmed and at most one blank line between paragraphs.
    pub fn normalize(&self, raw: &str) -> String {
        let text = raw.replace("\r\n", "\n").replace('\r', "\n");
        let text = self.strip_markup(&text);
        let text = Self::clean_characters(&text);

        let lines: Vec<String> = text
            .split('\n')
            .map(|line| {
                let line = line.replace('\t', "  ");
                self.column_gap_regex
                    .replace_all(line.trim(), "  ")
                    .to_string()
            })
            .collect();

        self.blank_lines_regex
            .replace_all(&lines.join("\n"), "\n\n")
            .trim()
            .to_string()
    }

    /// Single-line normalization: same cleaning, then every whitespace run
    /// (newlines included) becomes one space.
    pub fn normalize_single_line(&self, raw: &str) -> String {
        let multi_line = self.normalize(raw);
        self.whitespace_regex
            .replace_all(&multi_line, " ")
            .trim()
            .to_string()
    }

    /// Remove tag-like substrings and entity references
    fn strip_markup(&self, text: &str) -> String {
        let text = self.block_tag_regex.replace_all(text, "\n");
        let text = self.tag_regex.replace_all(&text, " ");

        self.entity_regex
            .replace_all(&text, |caps: &regex::Captures| {
                Self::decode_entity(&caps[1]).to_string()
            })
            .to_string()
    }

    fn decode_entity(entity: &str) -> &'static str {
        match entity.to_ascii_lowercase().as_str() {
            "amp" | "#38" => "&",
            "quot" | "#34" => "\"",
            "apos" | "#39" => "'",
            // &lt; and &gt; land here too
            _ => " ",
        }
    }

    /// Keep printable ASCII, letters, newlines and bullets; fold typographic
    /// punctuation to ASCII and replace everything else with a space.
    fn clean_characters(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\n' => '\n',
                ' '..='~' => c,
                '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{2032}' => '\'',
                '\u{201C}' | '\u{201D}' | '\u{2033}' => '"',
                '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
                '\u{2026}' => '.',
                '\u{2022}' | '\u{2023}' | '\u{2043}' | '\u{2219}' | '\u{00B7}' | '\u{25A0}'
                | '\u{25AA}' | '\u{25CF}' | '\u{25E6}' | '\u{27A2}' | '\u{2713}' | '\u{F0B7}' => '•',
                c if c.is_control() => ' ',
                c if c.is_whitespace() => ' ',
                c if c.is_alphanumeric() => c,
                _ => ' ',
            })
            .collect()
    }
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn leading_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_entities() {
        let normalizer = TextNormalizer::new();
        let text = "<h1>Jane Smith</h1><p>Tools &amp; Process&nbsp;Lead</p>";

        let cleaned = normalizer.normalize(text);

        assert_eq!(cleaned, "Jane Smith\nTools & Process Lead");
    }

    #[test]
    fn test_preserves_line_breaks_and_bullets() {
        let normalizer = TextNormalizer::new();
        let text = "EXPERIENCE\r\n\r\n\r\n\r\n  Senior Engineer  \n\u{25CF} Shipped things\n";

        let cleaned = normalizer.normalize(text);

        assert_eq!(cleaned, "EXPERIENCE\n\nSenior Engineer\n• Shipped things");
    }

    #[test]
    fn test_removes_control_characters() {
        let normalizer = TextNormalizer::new();
        let text = "Jane\u{0000}\u{0007} Smith\u{FFFD}\u{0019}";

        let cleaned = normalizer.normalize(text);

        assert_eq!(cleaned, "Jane  Smith");
    }

    #[test]
    fn test_folds_typographic_punctuation() {
        let normalizer = TextNormalizer::new();
        let text = "2019 \u{2013} Present \u{2014} \u{201C}quoted\u{201D} it\u{2019}s";

        let cleaned = normalizer.normalize(text);

        assert_eq!(cleaned, "2019 - Present - \"quoted\" it's");
    }

    #[test]
    fn test_column_gaps_collapse_to_two_spaces() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize("Python\t\tGo     Rust"), "Python  Go  Rust");
    }

    #[test]
    fn test_single_line_variant() {
        let normalizer = TextNormalizer::new();
        let text = "SUMMARY\n\nBuilt   distributed\nsystems.";

        assert_eq!(normalizer.normalize_single_line(text), "SUMMARY Built distributed systems.");
    }

    #[test]
    fn test_leading_chars_respects_char_boundaries() {
        assert_eq!(leading_chars("José García", 4), "José");
        assert_eq!(leading_chars("abc", 10), "abc");
        assert_eq!(leading_chars("", 3), "");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize(" \n\t \n "), "");
        assert_eq!(normalizer.normalize_single_line("\n\n"), "");
    }
}
