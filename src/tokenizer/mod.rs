//! Rule-based English word tokenizer.
//!
//! Text is split on whitespace into chunks. Each chunk is checked against the
//! special-case table, then has punctuation peeled off its front and back,
//! and finally the core is split on infixes. Only the alphabetic pieces
//! survive [`Tokenizer::word_tok`].

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use fancy_regex::Regex;
use log::trace;
use rayon::prelude::*;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::{Error, Result};
use crate::record::{LineRecord, TokenizedRecord};

pub mod rules;

use rules::{ExceptionMap, EXCEPTIONS};

pub struct Tokenizer {
    stage_directions: regex::Regex,
    prefixes: Vec<Regex>,
    suffixes: Vec<Regex>,
    regex_infixes: Vec<Regex>,
    literal_infix_matcher: Option<AhoCorasick>,
    token_match: Regex,
    url_match: Regex,
    exceptions: &'static ExceptionMap,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Pattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl Tokenizer {
    pub fn new() -> Result<Self> {
        let stage_directions =
            regex::Regex::new(rules::STAGE_DIRECTION).map_err(|e| Error::Pattern {
                pattern: rules::STAGE_DIRECTION.to_string(),
                reason: e.to_string(),
            })?;

        let prefixes = rules::prefix_patterns()
            .iter()
            .map(|p| compile(&format!("^(?:{})", p)))
            .collect::<Result<Vec<_>>>()?;

        let suffixes = rules::suffix_patterns()
            .iter()
            .map(|p| compile(&format!("(?:{})$", p)))
            .collect::<Result<Vec<_>>>()?;

        let regex_infixes = rules::infix_patterns()
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;

        let literals = rules::infix_literals();
        let literal_infix_matcher = if literals.is_empty() {
            None
        } else {
            // LeftmostFirst over a longest-first list prefers the longer
            // literal when two start at the same byte.
            let matcher = AhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostFirst)
                .build(&literals)
                .map_err(|e| Error::Pattern {
                    pattern: literals.join(" "),
                    reason: e.to_string(),
                })?;
            Some(matcher)
        };

        Ok(Tokenizer {
            stage_directions,
            prefixes,
            suffixes,
            regex_infixes,
            literal_infix_matcher,
            token_match: compile(&rules::token_match_pattern())?,
            url_match: compile(&rules::url_match_pattern())?,
            exceptions: &EXCEPTIONS,
        })
    }

    /// Removes `(...)` and `[...]` stage directions.
    pub fn strip_stage_directions<'t>(&self, text: &'t str) -> std::borrow::Cow<'t, str> {
        self.stage_directions.replace_all(text, "")
    }

    /// Splits text into tokens, punctuation included, original casing kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            self.tokenize_chunk(chunk, &mut tokens);
        }
        tokens
    }

    /// The cleaned word tokens of one line of dialogue: stage directions
    /// removed, lowercased, alphabetic tokens only.
    pub fn word_tok(&self, line_text: &str) -> Vec<String> {
        let no_brackets = self.strip_stage_directions(line_text);
        self.tokenize(no_brackets.trim())
            .into_iter()
            .map(|tok| tok.to_lowercase())
            .filter(|tok| is_alpha(tok))
            .collect()
    }

    fn is_whole(re: &Regex, chunk: &str) -> bool {
        matches!(re.is_match(chunk), Ok(true))
    }

    fn special_case(&self, chunk: &str, out: &mut Vec<String>) -> bool {
        if let Some(pieces) = self.exceptions.get(chunk) {
            out.extend(pieces.iter().cloned());
            return true;
        }
        if Self::is_whole(&self.token_match, chunk) || Self::is_whole(&self.url_match, chunk) {
            out.push(chunk.to_string());
            return true;
        }
        false
    }

    fn match_prefix(&self, text: &str) -> Option<usize> {
        self.prefixes.iter().find_map(|re| match re.find(text) {
            Ok(Some(mat)) if mat.end() > 0 => Some(mat.end()),
            _ => None,
        })
    }

    fn match_suffix(&self, text: &str) -> Option<usize> {
        self.suffixes.iter().find_map(|re| match re.find(text) {
            Ok(Some(mat)) if mat.start() < text.len() => Some(mat.start()),
            _ => None,
        })
    }

    fn tokenize_chunk(&self, chunk: &str, out: &mut Vec<String>) {
        if chunk.is_empty() || self.special_case(chunk, out) {
            return;
        }

        let mut rest = chunk;

        while !rest.is_empty() && !self.exceptions.contains_key(rest) {
            match self.match_prefix(rest) {
                Some(end) => {
                    out.push(rest[..end].to_string());
                    rest = &rest[end..];
                }
                None => break,
            }
        }

        let mut suffixes_reversed: Vec<&str> = Vec::new();
        while !rest.is_empty() && !self.exceptions.contains_key(rest) {
            match self.match_suffix(rest) {
                Some(start) => {
                    suffixes_reversed.push(&rest[start..]);
                    rest = &rest[..start];
                }
                None => break,
            }
        }

        if !rest.is_empty() && !self.special_case(rest, out) {
            self.split_infixes(rest, out);
        }

        out.extend(suffixes_reversed.into_iter().rev().map(String::from));
    }

    fn split_infixes(&self, core: &str, out: &mut Vec<String>) {
        let mut spans: Vec<(usize, usize)> = Vec::new();

        if let Some(matcher) = &self.literal_infix_matcher {
            spans.extend(
                matcher
                    .find_iter(core)
                    .filter(|m| m.end() > m.start())
                    .map(|m| (m.start(), m.end())),
            );
        }
        for re in &self.regex_infixes {
            for mat in re.find_iter(core).flatten() {
                if mat.end() > mat.start() {
                    spans.push((mat.start(), mat.end()));
                }
            }
        }

        if spans.is_empty() {
            out.push(core.to_string());
            return;
        }

        // leftmost first, longest first on ties; overlaps merge into one span
        spans.sort_by_key(|&(start, end)| (start, std::cmp::Reverse(end - start)));
        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match merged.last_mut() {
                Some(last) if start < last.1 => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }

        let mut last_end = 0;
        for (start, end) in merged {
            if start > last_end {
                out.push(core[last_end..start].to_string());
            }
            out.push(core[start..end].to_string());
            last_end = end;
        }
        if last_end < core.len() {
            out.push(core[last_end..].to_string());
        }
    }
}

/// True when every char is a letter (Lu, Ll, Lt, Lm or Lo) and there is at
/// least one.
pub fn is_alpha(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| {
            matches!(
                get_general_category(c),
                GeneralCategory::UppercaseLetter
                    | GeneralCategory::LowercaseLetter
                    | GeneralCategory::TitlecaseLetter
                    | GeneralCategory::ModifierLetter
                    | GeneralCategory::OtherLetter
            )
        })
}

/// Tokenizes every line on the rayon pool. Output keeps input order.
pub fn tokenize_lines(tokenizer: &Tokenizer, lines: Vec<LineRecord>) -> Vec<TokenizedRecord> {
    lines
        .into_par_iter()
        .map(|line| {
            let word_tok = tokenizer.word_tok(&line.line_text);
            trace!("{}: {:?}", line.speaker, word_tok);
            TokenizedRecord { line, word_tok }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok() -> Tokenizer {
        Tokenizer::new().expect("rules compile")
    }

    #[test]
    fn strips_stage_directions() {
        assert_eq!(
            tok().word_tok("Hello [whispers] world (aside)"),
            vec!["hello", "world"]
        );
    }

    #[test]
    fn drops_numbers_and_punctuation() {
        assert_eq!(tok().word_tok("I have 3 cats!"), vec!["i", "have", "cats"]);
    }

    #[test]
    fn punctuation_becomes_separate_tokens() {
        assert_eq!(
            tok().tokenize("\"Wait... what?!\""),
            vec!["\"", "Wait", "...", "what", "?", "!", "\""]
        );
        assert_eq!(tok().tokenize("Hello,world"), vec!["Hello", ",", "world"]);
    }

    #[test]
    fn splits_contractions() {
        assert_eq!(tok().tokenize("Don't"), vec!["Do", "n't"]);
        assert_eq!(tok().tokenize("I'm"), vec!["I", "'m"]);
        assert_eq!(tok().tokenize("can't."), vec!["ca", "n't", "."]);
        assert_eq!(tok().tokenize("Michael's"), vec!["Michael", "'s"]);
        assert_eq!(tok().tokenize("won’t"), vec!["wo", "n’t"]);
        assert_eq!(
            tok().word_tok("Don't do that, Michael."),
            vec!["do", "do", "that", "michael"]
        );
    }

    #[test]
    fn trailing_apostrophe_peels_off() {
        assert_eq!(tok().tokenize("goin'"), vec!["goin", "'"]);
        assert_eq!(tok().word_tok("Goin' fishin', Jim?"), vec!["goin", "fishin", "jim"]);
    }

    #[test]
    fn special_cases_win_over_peeling() {
        assert_eq!(tok().tokenize("Gonna,"), vec!["Gon", "na", ","]);
        assert_eq!(tok().tokenize("cannot"), vec!["can", "not"]);
        assert_eq!(tok().tokenize("Mr."), vec!["Mr."]);
        assert_eq!(tok().tokenize("'cause"), vec!["'", "cause"]);
    }

    #[test]
    fn numbers_and_urls_stay_whole() {
        assert_eq!(tok().tokenize("$1,000.00"), vec!["$1,000.00"]);
        assert_eq!(tok().tokenize("3.14"), vec!["3.14"]);
        assert_eq!(
            tok().tokenize("www.dundermifflin.com"),
            vec!["www.dundermifflin.com"]
        );
    }

    #[test]
    fn hyphenated_words_are_not_alphabetic() {
        assert_eq!(tok().tokenize("well-known"), vec!["well-known"]);
        assert!(tok().word_tok("well-known").is_empty());
    }

    #[test]
    fn empty_and_direction_only_lines_yield_nothing() {
        assert!(tok().word_tok("").is_empty());
        assert!(tok().word_tok("   ").is_empty());
        assert!(tok().word_tok("[Jim looks at the camera]").is_empty());
        assert!(tok().word_tok("(laughs) [sighs]").is_empty());
    }

    #[test]
    fn stage_direction_match_is_non_greedy() {
        assert_eq!(tok().word_tok("a [b [c] d] e"), vec!["a", "d", "e"]);
        assert_eq!(tok().word_tok("(unfinished thought"), vec!["unfinished", "thought"]);
    }

    #[test]
    fn keeps_non_ascii_letters() {
        assert_eq!(tok().word_tok("Café naïve"), vec!["café", "naïve"]);
        assert!(is_alpha("ß"));
        assert!(!is_alpha("a1"));
        assert!(!is_alpha(""));
    }

    #[test]
    fn tokenize_lines_keeps_order() {
        let lines: Vec<LineRecord> = (0..50)
            .map(|i| LineRecord {
                season: "1".into(),
                speaker: format!("S{i}"),
                line_text: "word ".repeat(i),
            })
            .collect();
        let out = tokenize_lines(&tok(), lines);
        for (i, rec) in out.iter().enumerate() {
            assert_eq!(rec.line.speaker, format!("S{i}"));
            assert_eq!(rec.word_tok.len(), i);
        }
    }
}
