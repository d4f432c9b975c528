// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use super::super::errors::{ParseError, ParseErrorKind};
use super::super::reader::{Location, Tokenizer};
use super::types::ParseResult;

pub(super) fn digit(chr: u8) -> bool {
    chr.is_ascii_digit()
}

pub(super) fn take_while(word: &str, cond: fn(u8) -> bool) -> ParseResult<'_> {
    let new_start = word.bytes().take_while(|chr| cond(*chr)).count();

    ParseResult {
        matched: &word[0..new_start],
        residual: &word[new_start..],
    }
}

pub(super) fn tag<'a>(word: &'a str, pattern: &str) -> ParseResult<'a> {
    let new_start = word
        .bytes()
        .zip(pattern.bytes())
        .take_while(|(lhs, rhs)| lhs == rhs)
        .count();

    ParseResult {
        matched: &word[0..new_start],
        residual: &word[new_start..],
    }
}

/// Parse a word made only of decimal digits. Signs, whitespace and empty
/// words are rejected, as is anything that overflows `T`.
pub(super) fn decimal<T: std::str::FromStr>(word: &str) -> Option<T> {
    if !take_while(word, digit).is_complete() {
        return None;
    }
    word.parse::<T>().ok()
}

/// Consume the word under the cursor along with its location. Running into
/// the end of the input is `UnexpectedEndOfFile`.
pub(super) fn next_word(tokens: &mut Tokenizer) -> Result<(&str, Location), ParseError> {
    let location = tokens.location();
    if tokens.at_sentinel() {
        return Err(ParseError::syntax(
            ParseErrorKind::UnexpectedEndOfFile,
            "",
            location,
        ));
    }
    Ok((tokens.consume(1), location))
}

/// Consume the next word and check that it is `keyword`, failing with
/// `on_mismatch` otherwise.
pub(super) fn ident(
    tokens: &mut Tokenizer,
    keyword: &str,
    on_mismatch: ParseErrorKind,
) -> Result<(), ParseError> {
    let (word, location) = next_word(tokens)?;

    if word == keyword {
        Ok(())
    } else {
        log::debug!("found keyword `{word}` but expected `{keyword}` on {location}");
        Err(ParseError::syntax(on_mismatch, word, location))
    }
}

/// Consume a `<keyword> ... $end` block and return the words between the two,
/// joined by single spaces.
pub(super) fn text_block(tokens: &mut Tokenizer) -> Result<String, ParseError> {
    // skip the opening keyword
    next_word(tokens)?;

    let mut words = Vec::new();
    loop {
        let (word, _) = next_word(tokens)?;
        if word == "$end" {
            break;
        }
        words.push(word.to_string());
    }
    Ok(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenized(text: &str) -> Tokenizer {
        let mut tokens = Tokenizer::new();
        tokens.load_content(text).unwrap();
        tokens.tokenize().unwrap();
        tokens
    }

    #[test]
    fn tag_splits_prefix() {
        let res = tag("$scope", "$");
        assert_eq!(res.matched, "$");
        assert_eq!(res.residual, "scope");
        assert!(!tag("#10", "$").is_match());
    }

    #[test]
    fn take_while_digits() {
        let res = take_while("10ns", digit);
        assert_eq!(res.matched, "10");
        assert_eq!(res.residual, "ns");
        assert!(!res.is_complete());
    }

    #[test]
    fn decimal_rejects_non_digits() {
        assert_eq!(decimal::<u64>("1234"), Some(1234));
        assert_eq!(decimal::<u64>("+4"), None);
        assert_eq!(decimal::<u64>(""), None);
        assert_eq!(decimal::<u64>("abc"), None);
        assert_eq!(decimal::<u32>("99999999999"), None);
    }

    #[test]
    fn text_block_joins_words() {
        let mut tokens = tokenized("$version Generated by\nVerilatedVcd $end $timescale");
        assert_eq!(text_block(&mut tokens).unwrap(), "Generated by VerilatedVcd");
        assert_eq!(tokens.current(), "$timescale");
    }

    #[test]
    fn text_block_without_end() {
        let mut tokens = tokenized("$comment never closed");
        let err = text_block(&mut tokens).unwrap_err();
        assert_eq!(err.kind(), Some(ParseErrorKind::UnexpectedEndOfFile));
    }

    #[test]
    fn ident_reports_mismatch() {
        let mut tokens = tokenized("$upscope $ned");
        ident(&mut tokens, "$upscope", ParseErrorKind::InvalidScope).unwrap();
        let err = ident(&mut tokens, "$end", ParseErrorKind::InvalidScope).unwrap_err();
        assert_eq!(err.kind(), Some(ParseErrorKind::InvalidScope));
        assert_eq!(err.token(), Some("$ned"));
    }
}
