// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::path::Path;

use super::errors::{Error, LoadError, ParseError, ParseErrorKind};
use super::reader::Tokenizer;
use super::scope_tree::ScopeTreeBuilder;
use super::timeline::ValueChangeLog;
use super::types::{Document, Header};

mod combinator_atoms;

mod types;

pub(crate) mod metadata;
use metadata::*;

mod scopes;

mod events;
use events::*;

/// Single-use VCD parser: load one input, then parse it into one [`Document`].
#[derive(Debug, Default)]
pub struct Parser {
    tokens: Tokenizer,
    tree: ScopeTreeBuilder,
    text: HeaderText,
    timeline: ValueChangeLog,
    parsed: bool,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            tokens: Tokenizer::new(),
            tree: ScopeTreeBuilder::new(),
            text: HeaderText::default(),
            timeline: ValueChangeLog::new(),
            parsed: false,
        }
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        self.tokens.load_file(path)
    }

    pub fn load_content<S: Into<String>>(&mut self, contents: S) -> Result<(), LoadError> {
        self.tokens.load_content(contents)
    }

    /// Tokenize the loaded input and parse the header, then the body. The
    /// first error aborts the parse; no partial document is produced.
    pub fn parse(&mut self) -> Result<Document, ParseError> {
        if self.parsed {
            return Err(ParseError::AlreadyParsed);
        }
        self.parsed = true;

        self.tokens.tokenize()?;

        parse_header(&mut self.tokens, &mut self.tree, &mut self.text)?;
        log::debug!("parsed header, body starts on {}", self.tokens.location());

        parse_body(&mut self.tokens, &mut self.timeline)?;

        let location = self.tokens.location();
        let (scopes, roots) = std::mem::take(&mut self.tree).finish().ok_or_else(|| {
            ParseError::syntax(ParseErrorKind::InvalidScope, "$upscope", location)
        })?;
        let (initial_dump, timestamps) = std::mem::take(&mut self.timeline).finish();
        let HeaderText {
            version,
            date,
            timescale,
        } = std::mem::take(&mut self.text);

        log::debug!(
            "parsed {} scopes, {} initial values and {} timestamps",
            scopes.len(),
            initial_dump.len(),
            timestamps.len()
        );

        Ok(Document {
            header: Header {
                scopes,
                roots,
                version,
                date,
                timescale,
            },
            initial_dump,
            timestamps,
        })
    }
}

pub fn parse_vcd_file<P: AsRef<Path>>(path: P) -> Result<Document, Error> {
    let mut parser = Parser::new();
    parser.load_file(path)?;
    Ok(parser.parse()?)
}

pub fn parse_vcd_str(contents: &str) -> Result<Document, Error> {
    let mut parser = Parser::new();
    parser.load_content(contents)?;
    Ok(parser.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcd::types::{Change, PortKind, ScopeKind, Timestamp};
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Document, ParseError> {
        let mut parser = Parser::new();
        parser.load_content(text).unwrap();
        parser.parse()
    }

    fn error_kind(text: &str) -> Option<ParseErrorKind> {
        parse(text).unwrap_err().kind()
    }

    const TOP: &str = "\
$scope module TOP $end
$var wire 4 ) lhs [3:0] $end
$upscope $end
$enddefinitions $end
#1
b0010 )
";

    #[test]
    fn end_to_end() {
        let document = parse(TOP).unwrap();
        let header = document.header();

        let roots: Vec<_> = header.roots().collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name(), "TOP");
        assert!(matches!(roots[0].kind(), ScopeKind::Module { .. }));

        let port = &roots[0].ports()[0];
        assert_eq!(port.kind, PortKind::Wire);
        assert_eq!(port.width, 4);
        assert_eq!(port.identifier.as_str(), ")");
        assert_eq!(port.name, "lhs");
        assert_eq!(port.reference, "[3:0]");

        assert_eq!(
            document.timestamps(),
            &[Timestamp {
                time: 1,
                changes: vec![Change::new(")", "0010")],
            }]
        );
        assert!(document.initial_dump().is_empty());
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(parse(TOP).unwrap(), parse(TOP).unwrap());
    }

    #[test]
    fn header_text_blocks() {
        let document = parse(
            "$date\n  Wed Jan 12 10:33:45 2022\n$end\n\
             $version Icarus Verilog $end\n\
             $comment anything $scope goes $end\n\
             $timescale 1ns $end\n\
             $enddefinitions $end\n",
        )
        .unwrap();
        let header = document.header();
        assert_eq!(header.date(), Some("Wed Jan 12 10:33:45 2022"));
        assert_eq!(header.version(), Some("Icarus Verilog"));
        assert_eq!(header.timescale(), Some("1ns"));
        assert!(header.parsed_date().is_some());
        assert_eq!(header.num_scopes(), 0);
        assert!(document.timestamps().is_empty());
    }

    #[test]
    fn empty_blocks_are_absent() {
        let document = parse("$version $end $enddefinitions $end").unwrap();
        assert_eq!(document.header().version(), None);
    }

    #[test]
    fn unknown_header_words_are_skipped() {
        let document = parse("$var wire 1 ! orphan $end $enddefinitions $end #0").unwrap();
        assert_eq!(document.header().num_scopes(), 0);
        assert_eq!(document.timestamps().len(), 1);
    }

    #[test]
    fn nesting_depth_and_order() {
        let document = parse(
            "$scope module a $end \
               $scope module b $end \
                 $scope module c $end $upscope $end \
               $upscope $end \
               $scope module d $end $upscope $end \
             $upscope $end \
             $scope module e $end $upscope $end \
             $enddefinitions $end",
        )
        .unwrap();
        let header = document.header();
        assert_eq!(header.depth(), 3);

        let roots: Vec<&str> = header.roots().map(|s| s.name()).collect();
        assert_eq!(roots, vec!["a", "e"]);

        let a = header.roots().next().unwrap();
        let children: Vec<&str> = header.children(a).map(|s| s.name()).collect();
        assert_eq!(children, vec!["b", "d"]);
    }

    #[test]
    fn unbalanced_scope_is_end_of_file() {
        assert_eq!(
            error_kind("$scope module TOP $end $var wire 1 ! a $end"),
            Some(ParseErrorKind::UnexpectedEndOfFile)
        );
        assert_eq!(
            error_kind("$scope module TOP $end $enddefinitions $end"),
            Some(ParseErrorKind::UnknownKeyword)
        );
    }

    #[test]
    fn stray_upscope() {
        assert_eq!(
            error_kind("$upscope $end $enddefinitions $end"),
            Some(ParseErrorKind::InvalidScope)
        );
    }

    #[test]
    fn missing_enddefinitions() {
        assert_eq!(
            error_kind("$version v $end #1 1!"),
            Some(ParseErrorKind::UnexpectedEndOfFile)
        );
        assert_eq!(
            error_kind("$enddefinitions #1"),
            Some(ParseErrorKind::UnknownKeyword)
        );
    }

    #[test]
    fn errors_carry_token_and_location() {
        let err = parse("$enddefinitions $end\n#1\n1!\n#abc\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                kind: ParseErrorKind::InvalidTimestamp,
                token: "#abc".to_string(),
                location: crate::vcd::reader::Location { line: 4, word: 1 },
            }
        );
    }

    #[test]
    fn parser_is_single_use() {
        let mut parser = Parser::new();
        parser.load_content(TOP).unwrap();
        assert_eq!(parser.load_content(TOP), Err(LoadError::AlreadyLoaded));
        parser.parse().unwrap();
        assert_eq!(parser.parse(), Err(ParseError::AlreadyParsed));
    }

    #[test]
    fn parse_without_load() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.parse(),
            Err(ParseError::Load(LoadError::EmptyContent))
        );
    }

    #[test]
    fn parse_vcd_str_reports_both_tiers() {
        assert!(matches!(
            parse_vcd_str(""),
            Err(Error::Load(LoadError::EmptyContent))
        ));
        assert!(matches!(
            parse_vcd_str("$enddefinitions $end #x"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            parse_vcd_file("no/such/file.vcd"),
            Err(Error::Load(LoadError::NotFound(_)))
        ));
        assert!(parse_vcd_str(TOP).is_ok());
    }
}
