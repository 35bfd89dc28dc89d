use crate::interval::Interval;
use crate::interval::partition_chars;
use crate::interval::partition_words;
use crate::opacity::opacity;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealChar {
    pub ch: char,
    pub interval: Interval,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealWord {
    pub interval: Interval,
    text: String,
    chars: Vec<RevealChar>,
}

impl RevealWord {
    fn new(text: &str, interval: Interval) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let chars = partition_chars(interval, chars.len())
            .into_iter()
            .zip(chars)
            .map(|(interval, ch)| RevealChar { ch, interval })
            .collect();
        Self {
            interval,
            text: text.to_string(),
            chars,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[RevealChar] {
        &self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// A paragraph split into words and characters, each carrying the slice of progress during
/// which it fades in.
///
/// Words are split on single spaces, so runs of spaces produce empty words. Those still take a
/// word slot (the timing stays evenly spaced across the source text) but render nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealText {
    words: Vec<RevealWord>,
}

impl RevealText {
    pub fn new(paragraph: &str) -> Self {
        if paragraph.is_empty() {
            return Self::default();
        }
        let parts: Vec<&str> = paragraph.split(' ').collect();
        let words = partition_words(parts.len())
            .into_iter()
            .zip(parts)
            .map(|(interval, word)| RevealWord::new(word, interval))
            .collect();
        Self { words }
    }

    /// Same as [`RevealText::new`], treating an absent paragraph as empty.
    pub fn from_optional(paragraph: Option<&str>) -> Self {
        paragraph.map(Self::new).unwrap_or_default()
    }

    pub fn words(&self) -> &[RevealWord] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.words.iter().map(|w| w.chars.len()).sum()
    }

    /// Every character in reading order, with the index of the word it belongs to.
    pub fn chars(&self) -> impl Iterator<Item = (usize, &RevealChar)> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(i, w)| w.chars.iter().map(move |c| (i, c)))
    }

    /// Opacity of every character, in reading order, for one progress reading.
    pub fn opacities(&self, progress: f64) -> Vec<f64> {
        self.chars()
            .map(|(_, c)| opacity(progress, c.interval))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervals(word: &RevealWord) -> Vec<(f64, f64)> {
        word.chars()
            .iter()
            .map(|c| (c.interval.start, c.interval.end))
            .collect()
    }

    #[test]
    fn two_short_words() {
        let text = RevealText::new("ab cd");
        assert_eq!(text.words().len(), 2);
        assert_eq!(text.words()[0].text(), "ab");
        assert_eq!(intervals(&text.words()[0]), vec![(0.0, 0.25), (0.25, 0.5)]);
        assert_eq!(intervals(&text.words()[1]), vec![(0.5, 0.75), (0.75, 1.0)]);
    }

    #[test]
    fn empty_and_absent_paragraphs_have_no_words() {
        assert!(RevealText::new("").is_empty());
        assert!(RevealText::from_optional(None).is_empty());
        assert_eq!(RevealText::from_optional(None).char_count(), 0);
        assert!(RevealText::new("").opacities(0.5).is_empty());
    }

    #[test]
    fn double_space_keeps_an_empty_word_slot() {
        let text = RevealText::new("a  b");
        assert_eq!(text.words().len(), 3);
        assert!(text.words()[1].is_empty());
        assert_eq!(text.words()[2].interval.start, 2.0 / 3.0);
        assert_eq!(text.char_count(), 2);
    }

    #[test]
    fn multibyte_chars_are_split_per_scalar() {
        let text = RevealText::new("你好");
        let chars: Vec<char> = text.chars().map(|(_, c)| c.ch).collect();
        assert_eq!(chars, vec!['你', '好']);
        assert_eq!(text.words()[0].chars()[1].interval, Interval::new(0.5, 1.0));
    }

    #[test]
    fn opacities_follow_reading_order() {
        let text = RevealText::new("ab cd");
        let o = text.opacities(0.3);
        assert_eq!(o.len(), 4);
        assert_eq!(o[0], 1.0);
        assert!((o[1] - 0.2).abs() < 1e-9);
        assert_eq!(o[2], 0.0);
        assert_eq!(o[3], 0.0);
        assert!(text.opacities(1.0).iter().all(|&v| v == 1.0));
    }
}
