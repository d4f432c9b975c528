// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Body section of a VCD file: `$dumpvars` snapshots and `#<time>` blocks of
//! value changes.
use super::super::errors::{ParseError, ParseErrorKind};
use super::super::reader::Tokenizer;
use super::super::timeline::ValueChangeLog;
use super::super::types::{Change, Identifier, Timestamp};
use super::combinator_atoms::{decimal, ident, next_word, tag, text_block};

/// Drop the radix letter of a vector or real value, e.g. `b1011` -> `1011`.
fn strip_radix(value: &str) -> &str {
    match value.as_bytes().first() {
        Some(b'b' | b'B' | b'r' | b'R') => &value[1..],
        _ => value,
    }
}

/// Parse one value change.
///
/// The shape of the word under the cursor picks the encoding. A word of
/// exactly two characters is a complete one-bit change, value first then
/// identifier (`1#`). Anything else is a value word (`b1011`) followed by a
/// separate identifier word.
pub(super) fn parse_change(tokens: &mut Tokenizer) -> Result<Change, ParseError> {
    let (word, _) = next_word(tokens)?;

    let mut chars = word.chars();
    if let (Some(value), Some(identifier), None) = (chars.next(), chars.next(), chars.next()) {
        return Ok(Change::new(Identifier::new(identifier), value));
    }

    let value = strip_radix(word).to_string();
    let (identifier, _) = next_word(tokens)?;
    Ok(Change::new(identifier, value))
}

/// Consume a `$`-keyword found in the body. `$dumpvars` feeds the initial
/// dump; `$comment` and the `$dump*` control blocks are skipped up to their
/// `$end`. Any other keyword is skipped on its own.
fn parse_body_keyword(tokens: &mut Tokenizer, timeline: &mut ValueChangeLog) -> Result<(), ParseError> {
    match tokens.current() {
        "$dumpvars" => parse_dumpvars(tokens, timeline),
        // $dumpon, $dumpoff and $dumpall are not interpreted
        "$comment" | "$dumpon" | "$dumpoff" | "$dumpall" => {
            text_block(tokens)?;
            Ok(())
        }
        word => {
            log::debug!("skipping `{word}` in body on {}", tokens.location());
            tokens.consume(1);
            Ok(())
        }
    }
}

fn parse_timechange(tokens: &mut Tokenizer, timeline: &mut ValueChangeLog) -> Result<(), ParseError> {
    // #120
    //  ^^^ - time
    let (word, location) = next_word(tokens)?;
    let time = decimal::<u64>(&word[1..]).ok_or_else(|| {
        ParseError::syntax(ParseErrorKind::InvalidTimestamp, word, location)
    })?;
    log::trace!("timestamp {} is #{time}", timeline.num_timestamps());

    // changes run until the next timestamp or the end of the input; keyword
    // blocks in between do not end the timestamp
    let mut tmstmp = Timestamp {
        time,
        changes: vec![],
    };
    loop {
        let word = tokens.current();
        if word.is_empty() || tag(word, "#").is_match() {
            break;
        }
        if tag(word, "$").is_match() {
            parse_body_keyword(tokens, timeline)?;
            continue;
        }
        tmstmp.changes.push(parse_change(tokens)?);
    }

    timeline.push_timestamp(tmstmp);
    Ok(())
}

fn parse_dumpvars(tokens: &mut Tokenizer, timeline: &mut ValueChangeLog) -> Result<(), ParseError> {
    ident(tokens, "$dumpvars", ParseErrorKind::UnknownKeyword)?;

    loop {
        if tokens.current() == "$end" {
            tokens.consume(1);
            break;
        }
        let change = parse_change(tokens)?;
        timeline.record_initial(change);
    }
    Ok(())
}

pub(super) fn parse_body(tokens: &mut Tokenizer, timeline: &mut ValueChangeLog) -> Result<(), ParseError> {
    loop {
        let word = tokens.current();
        if word.is_empty() {
            break;
        }

        if tag(word, "#").is_match() {
            parse_timechange(tokens, timeline)?;
        } else if tag(word, "$").is_match() {
            parse_body_keyword(tokens, timeline)?;
        } else {
            // stray words before the first timestamp
            log::debug!("skipping `{word}` in body on {}", tokens.location());
            tokens.consume(1);
        }
    }

    Ok(())
}
