use crate::font::TextMeasure;
use crate::units::Pt;
use derive_more::{Deref, From, Into};

/// Lines produced by wrapping one logical string. Each line fits the width it was
/// wrapped to, except a single word too wide to fit anywhere, which gets a line of
/// its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From, Into)]
pub struct WrappedText(Vec<String>);

impl WrappedText {
    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

/// Greedy word wrap.
///
/// Words are taken in order and appended to the current line for as long as the line,
/// measured by `font` at `size`, stays within `max_width`. A word that doesn't fit
/// starts the next line. Words are never split, so a word wider than `max_width`
/// overflows on a line by itself.
///
/// Runs of whitespace collapse to single spaces; whitespace-only text has no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    font: &M,
    size: Pt,
    max_width: Pt,
) -> WrappedText {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    WrappedText(lines)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Every character is exactly one point wide at any size, which makes widths
    /// easy to reason about
    pub(crate) struct Monospace;

    impl TextMeasure for Monospace {
        fn text_width(&self, text: &str, _size: Pt) -> Pt {
            Pt(text.chars().count() as f32)
        }

        fn ascent(&self, size: Pt) -> Pt {
            size * 0.75
        }
    }

    fn wrap(text: &str, width: f32) -> Vec<String> {
        wrap_text(text, &Monospace, Pt(10.0), Pt(width)).into()
    }

    #[test]
    fn wraps_greedily() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10.0),
            vec!["the quick", "brown fox", "jumps"]
        );
        // exactly at the limit still fits
        assert_eq!(wrap("abcd efghi", 10.0), vec!["abcd efghi"]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        assert_eq!(
            wrap("a supercalifragilistic b", 5.0),
            vec!["a", "supercalifragilistic", "b"]
        );
        assert_eq!(wrap("supercalifragilistic", 5.0), vec!["supercalifragilistic"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap("", 10.0).is_empty());
        assert!(wrap(" \t ", 10.0).is_empty());
    }

    fn words() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zA-Z0-9,.#-]{1,14}", 0..30)
    }

    proptest! {
        #[test]
        fn preserves_every_word_in_order(words in words(), width in 1.0f32..60.0) {
            let text = words.join(" ");
            let lines = wrap(&text, width);
            let rewrapped: Vec<String> = lines
                .iter()
                .flat_map(|l| l.split(' ').map(str::to_string))
                .collect();
            prop_assert_eq!(rewrapped, words);
        }

        #[test]
        fn lines_fit_unless_they_are_one_word(words in words(), width in 1.0f32..60.0) {
            let text = words.join(" ");
            for line in wrap(&text, width) {
                let fits = Monospace.text_width(&line, Pt(10.0)) <= Pt(width);
                prop_assert!(fits || !line.contains(' '), "{:?} overflows {}", line, width);
            }
        }

        #[test]
        fn rewrapping_conforming_lines_is_a_no_op(words in words(), width in 1.0f32..60.0) {
            let text = words.join(" ");
            let lines = wrap(&text, width);
            for line in lines.iter().filter(|l| Monospace.text_width(l, Pt(10.0)) <= Pt(width)) {
                prop_assert_eq!(wrap(line, width), vec![line.clone()]);
            }
        }
    }
}
