// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! part of the vcd parser that handles parsing the signal tree and
//! building the resulting scope tree
use super::super::errors::{ParseError, ParseErrorKind};
use super::super::reader::Tokenizer;
use super::super::scope_tree::ScopeTreeBuilder;
use super::super::types::{Identifier, Port, PortKind, ScopeKind};
use super::combinator_atoms::{decimal, ident, next_word, text_block};

pub(super) fn parse_var(tokens: &mut Tokenizer) -> Result<Port, ParseError> {
    ident(tokens, "$var", ParseErrorKind::UnknownKeyword)?;

    // $var wire 4 ) lhs [3:0] $end
    //      ^^^^ - kind
    let (word, location) = next_word(tokens)?;
    let kind = match word {
        "wire" => PortKind::Wire,
        "reg" => PortKind::Register,
        _ => {
            return Err(ParseError::syntax(
                ParseErrorKind::InvalidSignalType,
                word,
                location,
            ))
        }
    };

    // $var wire 4 ) lhs [3:0] $end
    //           ^ - width
    let (word, location) = next_word(tokens)?;
    let width = decimal::<u32>(word).ok_or_else(|| {
        ParseError::syntax(ParseErrorKind::InvalidSignalWidth, word, location)
    })?;

    // $var wire 4 ) lhs [3:0] $end
    //             ^ - identifier
    let (word, location) = next_word(tokens)?;
    if word.chars().count() != 1 {
        return Err(ParseError::syntax(
            ParseErrorKind::InvalidSignalWidth,
            word,
            location,
        ));
    }
    let identifier = Identifier::from(word);

    // $var wire 4 ) lhs [3:0] $end
    //               ^^^ - name
    let (word, location) = next_word(tokens)?;
    if word == "$end" {
        return Err(ParseError::syntax(
            ParseErrorKind::UnknownKeyword,
            word,
            location,
        ));
    }
    let name = word.to_string();

    // $var wire 4 ) lhs [3:0] $end
    //                   ^^^^^ - reference (everything up to $end)
    let mut reference = String::new();
    loop {
        let (word, _) = next_word(tokens)?;
        if word == "$end" {
            break;
        }
        reference.push_str(word);
    }

    Ok(Port {
        kind,
        width,
        identifier,
        name,
        reference,
    })
}

pub(super) fn parse_scope(
    tokens: &mut Tokenizer,
    tree: &mut ScopeTreeBuilder,
) -> Result<(), ParseError> {
    ident(tokens, "$scope", ParseErrorKind::InvalidScope)?;

    // the slot exists before we know what goes in it, so that nested scopes
    // always have a parent to attach to
    tree.open();

    // $scope module reg_mag_i $end
    //        ^^^^^^ - scope kind
    let (word, location) = next_word(tokens)?;
    let kind = match word {
        "module" => ScopeKind::Module { ports: vec![] },
        "task" => ScopeKind::Task,
        "begin" | "fork" | "function" => ScopeKind::Unknown,
        _ => {
            return Err(ParseError::syntax(
                ParseErrorKind::InvalidScope,
                word,
                location,
            ))
        }
    };

    // $scope module reg_mag_i $end
    //               ^^^^^^^^^ - scope name
    let (word, location) = next_word(tokens)?;
    if word == "$end" {
        return Err(ParseError::syntax(
            ParseErrorKind::InvalidScope,
            word,
            location,
        ));
    }
    log::trace!("scope `{word}` at depth {}", tree.depth());
    tree.describe(word.to_string(), kind);

    // $scope module reg_mag_i $end
    //                         ^^^^ - end keyword
    ident(tokens, "$end", ParseErrorKind::InvalidScope)?;

    loop {
        let word = tokens.current();
        match word {
            "$var" => {
                let location = tokens.location();
                if let Err(port) = tree.add_port(parse_var(tokens)?) {
                    log::warn!(
                        "dropping $var `{}` on {location}: only module scopes hold ports",
                        port.name
                    );
                }
            }
            "$scope" => parse_scope(tokens, tree)?,
            "$upscope" => {
                tokens.consume(1);
                ident(tokens, "$end", ParseErrorKind::InvalidScope)?;
                break;
            }
            "$comment" => {
                text_block(tokens)?;
            }
            "" => {
                return Err(ParseError::syntax(
                    ParseErrorKind::UnexpectedEndOfFile,
                    word,
                    tokens.location(),
                ))
            }
            _ => {
                log::debug!(
                    "found keyword `{word}` but expected `$scope`, `$var`, \
                     `$comment`, or `$upscope`"
                );
                return Err(ParseError::syntax(
                    ParseErrorKind::UnknownKeyword,
                    word,
                    tokens.location(),
                ));
            }
        }
    }

    let location = tokens.location();
    tree.close()
        .map(|_| ())
        .ok_or_else(|| ParseError::syntax(ParseErrorKind::InvalidScope, "$upscope", location))
}
