// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Header section of a VCD file: the text blocks that describe the dump and
//! the scope declarations, up to `$enddefinitions $end`.
use chrono::prelude::*;
use itertools::Itertools;

use super::super::errors::{ParseError, ParseErrorKind};
use super::super::reader::Tokenizer;
use super::super::scope_tree::ScopeTreeBuilder;
use super::super::types::{Timescale, TimescaleUnit};
use super::combinator_atoms::{decimal, digit, ident, take_while, text_block};
use super::scopes::parse_scope;

/// Raw text of the `$version`, `$date` and `$timescale` blocks.
#[derive(Debug, Default)]
pub(crate) struct HeaderText {
    pub(crate) version: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) timescale: Option<String>,
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub(super) fn parse_header(
    tokens: &mut Tokenizer,
    tree: &mut ScopeTreeBuilder,
    text: &mut HeaderText,
) -> Result<(), ParseError> {
    loop {
        let word = tokens.current();
        match word {
            "$enddefinitions" => {
                tokens.consume(1);
                return ident(tokens, "$end", ParseErrorKind::UnknownKeyword);
            }
            "$version" => text.version = non_empty(text_block(tokens)?),
            "$date" => text.date = non_empty(text_block(tokens)?),
            "$timescale" => text.timescale = non_empty(text_block(tokens)?),
            "$comment" => {
                // comments are not kept
                text_block(tokens)?;
            }
            "$scope" => parse_scope(tokens, tree)?,
            "$upscope" => {
                return Err(ParseError::syntax(
                    ParseErrorKind::InvalidScope,
                    word,
                    tokens.location(),
                ))
            }
            "" => {
                return Err(ParseError::syntax(
                    ParseErrorKind::UnexpectedEndOfFile,
                    word,
                    tokens.location(),
                ))
            }
            _ => {
                log::debug!("skipping `{word}` in header on {}", tokens.location());
                tokens.consume(1);
            }
        }
    }
}

fn timescale_unit(word: &str) -> Option<TimescaleUnit> {
    match word {
        "fs" => Some(TimescaleUnit::Fs),
        "ps" => Some(TimescaleUnit::Ps),
        "ns" => Some(TimescaleUnit::Ns),
        "us" => Some(TimescaleUnit::Us),
        "ms" => Some(TimescaleUnit::Ms),
        "s" => Some(TimescaleUnit::S),
        _ => None,
    }
}

/// Interpret `$timescale` text. Both `1ps` and `1 ps` are accepted.
pub(crate) fn parse_timescale(text: &str) -> Option<Timescale> {
    let mut words = text.split(' ');
    let first = words.next()?;

    let res = take_while(first, digit);
    let magnitude = decimal::<u32>(res.matched)?;

    let unit = if res.residual.is_empty() {
        timescale_unit(words.next()?)?
    } else {
        timescale_unit(res.residual)?
    };

    if words.next().is_some() {
        return None;
    }
    Some(Timescale { magnitude, unit })
}

const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn parse_clock(word: &str) -> Option<(u32, u32, u32)> {
    let mut fields = word.split(':');
    let hh = decimal::<u32>(fields.next()?)?;
    let mm = decimal::<u32>(fields.next()?)?;
    let ss = decimal::<u32>(fields.next()?)?;
    if fields.next().is_some() || hh > 23 || mm > 59 || ss > 60 {
        return None;
    }
    Some((hh, mm, ss))
}

fn parse_date_words(day: &str, month: &str, date: &str, clock: &str, year: &str) -> Option<DateTime<Utc>> {
    if !DAYS.contains(&day) || !MONTHS.contains(&month) {
        return None;
    }

    let date = decimal::<u32>(date)?;
    if date == 0 || date > 31 {
        return None;
    }
    let (hh, mm, ss) = parse_clock(clock)?;
    let year = decimal::<i32>(year)?;

    let full_date = format!("{day} {month} {date:02} {hh:02}:{mm:02}:{ss:02} {year}");
    let naive = NaiveDateTime::parse_from_str(&full_date, "%a %b %d %H:%M:%S %Y").ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Interpret `$date` text.
///
/// Simulators disagree on the order of the five date fields (weekday, month,
/// day of month, hh:mm:ss and year), so every ordering of the five words is
/// tried and the first one that forms a valid date wins.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() != 5 {
        return None;
    }

    words
        .iter()
        .permutations(words.len())
        .find_map(|p| parse_date_words(p[0], p[1], p[2], p[3], p[4]))
}
