// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

mod vcd;
pub use vcd::errors::{Error, LoadError, ParseError, ParseErrorKind};
pub use vcd::json::to_json;
pub use vcd::parse::{parse_vcd_file, parse_vcd_str, Parser};
pub use vcd::reader::{Location, Tokenizer, SENTINEL};
pub use vcd::types::{Change, Document, Header, Identifier, Timestamp};
pub use vcd::types::{Port, PortKind, ScopeIdx, ScopeKind, ScopeNode};
pub use vcd::types::{Timescale, TimescaleUnit};
