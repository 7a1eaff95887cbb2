use std::iter::Peekable;
use std::str::SplitWhitespace;

pub const ELLIPSIS: &str = "...";

/// Cuts `text` to at most `budget` characters at the last space inside the budget and
/// appends an ellipsis. A first word longer than the whole budget is hard-cut.
pub fn truncate_words(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }

    let head: String = text.chars().take(budget).collect();
    match head.rfind(' ') {
        Some(idx) if idx > 0 => format!("{}{}", head[..idx].trim_end(), ELLIPSIS),
        _ => format!("{}{}", head, ELLIPSIS),
    }
}

/// Greedy word wrap yielding one line at a time.
pub struct WordWrap<'a> {
    words: Peekable<SplitWhitespace<'a>>,
    width: usize,
}

impl<'a> WordWrap<'a> {
    pub fn new(text: &'a str, width: usize) -> Self {
        Self {
            words: text.split_whitespace().peekable(),
            width,
        }
    }
}

impl Iterator for WordWrap<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.words.next()?;
        let mut line = first.to_string();
        let mut len = first.chars().count();

        while let Some(word) = self.words.peek() {
            let word_len = word.chars().count();
            if len + 1 + word_len > self.width {
                break;
            }
            line.push(' ');
            line.push_str(word);
            len += 1 + word_len;
            self.words.next();
        }

        Some(line)
    }
}

pub fn wrap_words(text: &str, width: usize) -> WordWrap<'_> {
    WordWrap::new(text, width)
}

/// Wraps to at most `max_lines`. When words are left over, the last kept line is
/// shortened at a word boundary so it still fits `width` with an ellipsis.
pub fn wrap_capped(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut wrap = wrap_words(text, width);
    let mut lines: Vec<String> = wrap.by_ref().take(max_lines).collect();
    if wrap.next().is_some() {
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, width);
        }
    }
    lines
}

fn with_ellipsis(line: &str, width: usize) -> String {
    let bare = line.trim_end_matches(ELLIPSIS).trim_end();
    let budget = width.saturating_sub(ELLIPSIS.len());
    if bare.chars().count() <= budget {
        format!("{}{}", bare, ELLIPSIS)
    } else {
        truncate_words(bare, budget)
    }
}
