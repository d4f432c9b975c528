// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Holds the scopes that are still open while the parser descends through
//! nested `$scope` / `$upscope` blocks.
//!
//! A scope gets its arena slot the moment `$scope` is read, but its kind and
//! name are only known once the rest of the `$scope` line has been parsed.
//! Until its `$upscope` the scope lives on the open stack; only then is it
//! written into its slot and attached to its parent (or to the roots).
use super::types::{Port, ScopeIdx, ScopeKind, ScopeNode};

#[derive(Debug)]
struct OpenScope {
    idx: ScopeIdx,
    described: Option<(String, ScopeKind)>,
    children: Vec<ScopeIdx>,
}

#[derive(Debug, Default)]
pub(crate) struct ScopeTreeBuilder {
    slots: Vec<Option<ScopeNode>>,
    open: Vec<OpenScope>,
    roots: Vec<ScopeIdx>,
}

impl ScopeTreeBuilder {
    pub(crate) fn new() -> ScopeTreeBuilder {
        ScopeTreeBuilder::default()
    }

    /// Reserve a slot for a new scope nested in the innermost open one.
    pub(crate) fn open(&mut self) -> ScopeIdx {
        let idx = ScopeIdx(self.slots.len());
        self.slots.push(None);
        self.open.push(OpenScope {
            idx,
            described: None,
            children: vec![],
        });
        log::trace!("opened scope {} at depth {}", idx.0, self.open.len());
        idx
    }

    /// Fill in the kind and name of the innermost open scope.
    pub(crate) fn describe(&mut self, name: String, kind: ScopeKind) {
        if let Some(scope) = self.open.last_mut() {
            scope.described = Some((name, kind));
        }
    }

    /// Add `port` to the innermost open scope. The port is handed back when
    /// that scope has no port list to add to.
    pub(crate) fn add_port(&mut self, port: Port) -> Result<(), Port> {
        match self.open.last_mut().and_then(|s| s.described.as_mut()) {
            Some((_, ScopeKind::Module { ports })) => {
                ports.push(port);
                Ok(())
            }
            _ => Err(port),
        }
    }

    /// Finalize the innermost open scope and hand it to its parent. Returns
    /// `None` if no scope is open or the open scope was never described.
    pub(crate) fn close(&mut self) -> Option<ScopeIdx> {
        let OpenScope {
            idx,
            described,
            children,
        } = self.open.pop()?;
        let (name, kind) = described?;

        log::trace!("closed scope {} `{name}`", idx.0);
        self.slots[idx.0] = Some(ScopeNode {
            name,
            kind,
            children,
        });

        match self.open.last_mut() {
            Some(parent) => parent.children.push(idx),
            None => self.roots.push(idx),
        }
        Some(idx)
    }

    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    /// Hand over the finished arena and root list. Fails while any scope is
    /// still open.
    pub(crate) fn finish(self) -> Option<(Vec<ScopeNode>, Vec<ScopeIdx>)> {
        if !self.open.is_empty() {
            return None;
        }
        let scopes = self.slots.into_iter().collect::<Option<Vec<ScopeNode>>>()?;
        Some((scopes, self.roots))
    }
}
