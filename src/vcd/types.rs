// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::fmt;
use std::fmt::Write;

use chrono::prelude::*;

use super::parse::metadata::{parse_date, parse_timescale};

/// Compact alias a VCD file uses to refer to a signal, e.g. `)` or `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(pub(crate) String);

impl Identifier {
    pub fn new<S: Into<String>>(identifier: S) -> Identifier {
        Identifier(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(identifier: &str) -> Self {
        Identifier(identifier.to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PortKind {
    Input,
    Output,
    Inout,
    Wire,
    Register,
}

impl PortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortKind::Input => "input",
            PortKind::Output => "output",
            PortKind::Inout => "inout",
            PortKind::Wire => "wire",
            PortKind::Register => "reg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub kind: PortKind,
    pub width: u32,
    pub identifier: Identifier,
    pub name: String,
    /// Raw bit range text following the name, e.g. `[3:0]`.
    pub reference: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ScopeIdx(pub(crate) usize);

impl ScopeIdx {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Module { ports: Vec<Port> },
    // TODO : tasks carry no payload until $var handling inside tasks is decided
    Task,
    /// `begin`, `fork` and `function` blocks. Kept in the tree so their
    /// children stay reachable, but they hold no ports.
    Unknown,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Module { .. } => "module",
            ScopeKind::Task => "task",
            ScopeKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeNode {
    pub(crate) name: String,
    pub(crate) kind: ScopeKind,
    pub(crate) children: Vec<ScopeIdx>,
}

impl ScopeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    /// Declared ports in source order. Empty for anything but a module.
    pub fn ports(&self) -> &[Port] {
        match &self.kind {
            ScopeKind::Module { ports } => ports,
            ScopeKind::Task | ScopeKind::Unknown => &[],
        }
    }

    pub fn children(&self) -> &[ScopeIdx] {
        &self.children
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimescaleUnit {
    Fs,
    Ps,
    Ns,
    Us,
    Ms,
    S,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timescale {
    pub magnitude: u32,
    pub unit: TimescaleUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    // every scope ever declared, in order of appearance
    pub(crate) scopes: Vec<ScopeNode>,
    pub(crate) roots: Vec<ScopeIdx>,
    pub(crate) version: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) timescale: Option<String>,
}

impl Header {
    pub fn roots(&self) -> impl Iterator<Item = &ScopeNode> + '_ {
        self.roots.iter().map(move |idx| self.scope(*idx))
    }

    pub fn root_indices(&self) -> &[ScopeIdx] {
        &self.roots
    }

    pub fn scope(&self, idx: ScopeIdx) -> &ScopeNode {
        &self.scopes[idx.0]
    }

    pub fn children<'a>(&'a self, scope: &'a ScopeNode) -> impl Iterator<Item = &'a ScopeNode> + 'a {
        scope.children.iter().map(move |idx| self.scope(*idx))
    }

    pub fn num_scopes(&self) -> usize {
        self.scopes.len()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn timescale(&self) -> Option<&str> {
        self.timescale.as_deref()
    }

    pub fn parsed_timescale(&self) -> Option<Timescale> {
        parse_timescale(self.timescale.as_deref()?)
    }

    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        parse_date(self.date.as_deref()?)
    }

    /// First port declared with `identifier`, searching scopes in the order
    /// they were opened.
    pub fn find_port(&self, identifier: &str) -> Option<&Port> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.ports())
            .find(|port| port.identifier.as_str() == identifier)
    }

    /// Deepest nesting level of the scope tree. Zero when there are no scopes.
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|idx| self.depth_below(*idx))
            .max()
            .unwrap_or(0)
    }

    fn depth_below(&self, idx: ScopeIdx) -> usize {
        let scope = self.scope(idx);
        1 + scope
            .children
            .iter()
            .map(|child| self.depth_below(*child))
            .max()
            .unwrap_or(0)
    }

    /// Indented outline of every scope and its ports.
    pub fn scope_tree(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            self.write_scope_tree(&mut out, *root, 0);
        }
        out
    }

    fn write_scope_tree(&self, out: &mut String, idx: ScopeIdx, depth: usize) {
        let indent = " ".repeat(depth * 4);
        let scope = self.scope(idx);

        // writing into a String cannot fail
        let _ = writeln!(out, "{indent}{}: {}", scope.kind.as_str(), scope.name);
        for port in scope.ports() {
            let _ = writeln!(
                out,
                "{indent} - {} {} {}{} ({})",
                port.kind.as_str(),
                port.width,
                port.name,
                port.reference,
                port.identifier
            );
        }

        for child in &scope.children {
            self.write_scope_tree(out, *child, depth + 1);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub identifier: Identifier,
    /// Literal value text, e.g. `0`, `x` or `1011`.
    pub value: String,
}

impl Change {
    pub fn new<I: Into<Identifier>, V: Into<String>>(identifier: I, value: V) -> Change {
        Change {
            identifier: identifier.into(),
            value: value.into(),
        }
    }
}

/// Every change recorded at one simulation time, in the order they were
/// read. Repeated changes to the same identifier are all kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub time: u64,
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(crate) header: Header,
    pub(crate) initial_dump: Vec<Change>,
    pub(crate) timestamps: Vec<Timestamp>,
}

impl Document {
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The `$dumpvars` snapshot.
    pub fn initial_dump(&self) -> &[Change] {
        &self.initial_dump
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Value of `identifier` at `time`: the last change recorded at or
    /// before `time`, or its `$dumpvars` value if it has not changed yet.
    ///
    /// Assumes timestamps appear in increasing order, as simulators emit
    /// them.
    pub fn value_at(&self, identifier: &str, time: u64) -> Option<&str> {
        let upper = self.timestamps.partition_point(|tmstmp| tmstmp.time <= time);

        let from_timeline = self.timestamps[..upper].iter().rev().find_map(|tmstmp| {
            tmstmp
                .changes
                .iter()
                .rev()
                .find(|change| change.identifier.as_str() == identifier)
        });

        from_timeline
            .or_else(|| {
                self.initial_dump
                    .iter()
                    .rev()
                    .find(|change| change.identifier.as_str() == identifier)
            })
            .map(|change| change.value.as_str())
    }
}
