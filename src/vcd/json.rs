// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! JSON rendering of a parsed [`Document`].
//!
//! Everything is emitted in source order. Nothing is sorted, merged or
//! deduplicated, so two changes to one identifier at one time show up as two
//! entries.
use serde_json::{Map, Value};

use super::types::{Change, Document, Header, Port, ScopeKind, ScopeNode, Timestamp};

fn port_to_json(port: &Port) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_string(), Value::from(port.name.as_str()));
    obj.insert("type".to_string(), Value::from(port.kind.as_str()));
    obj.insert("width".to_string(), Value::from(port.width));
    obj.insert("identifier".to_string(), Value::from(port.identifier.as_str()));
    obj.insert("reference".to_string(), Value::from(port.reference.as_str()));
    Value::Object(obj)
}

fn scope_to_json(header: &Header, scope: &ScopeNode) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::from(scope.kind().as_str()));
    obj.insert("name".to_string(), Value::from(scope.name()));

    if let ScopeKind::Module { ports } = scope.kind() {
        let ports = ports.iter().map(port_to_json).collect();
        obj.insert("ports".to_string(), Value::Array(ports));
    }

    let subscopes = header
        .children(scope)
        .map(|child| scope_to_json(header, child))
        .collect();
    obj.insert("subscopes".to_string(), Value::Array(subscopes));

    Value::Object(obj)
}

fn header_to_json(header: &Header) -> Value {
    let mut obj = Map::new();
    let scopes = header
        .roots()
        .map(|scope| scope_to_json(header, scope))
        .collect();
    obj.insert("scopes".to_string(), Value::Array(scopes));

    let text = [
        ("version", header.version()),
        ("date", header.date()),
        ("timescale", header.timescale()),
    ];
    for (key, value) in text {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            obj.insert(key.to_string(), Value::from(value));
        }
    }

    Value::Object(obj)
}

/// `{"<identifier>": "<value>"}`
fn change_to_json(change: &Change) -> Value {
    let mut obj = Map::new();
    obj.insert(
        change.identifier.as_str().to_string(),
        Value::from(change.value.as_str()),
    );
    Value::Object(obj)
}

/// `{"<time>": [<change>, ...]}`
fn timestamp_to_json(tmstmp: &Timestamp) -> Value {
    let changes = tmstmp.changes.iter().map(change_to_json).collect();
    let mut obj = Map::new();
    obj.insert(tmstmp.time.to_string(), Value::Array(changes));
    Value::Object(obj)
}

pub fn to_json(document: &Document) -> Value {
    let mut obj = Map::new();
    obj.insert("header".to_string(), header_to_json(document.header()));

    let dumpvars = document.initial_dump().iter().map(change_to_json).collect();
    obj.insert("dumpvars".to_string(), Value::Array(dumpvars));

    let value_changes = document
        .timestamps()
        .iter()
        .map(timestamp_to_json)
        .collect();
    obj.insert("value_changes".to_string(), Value::Array(value_changes));

    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcd::parse::parse_vcd_str;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn document_shape() {
        let document = parse_vcd_str(
            "$version v1 $end\n\
             $scope module TOP $end\n\
             $var wire 4 ) lhs [3:0] $end\n\
             $scope task t $end $upscope $end\n\
             $upscope $end\n\
             $enddefinitions $end\n\
             $dumpvars 1# bxxxx ) $end\n\
             #1\n\
             b0010 )\n\
             0#\n\
             1#\n",
        )
        .unwrap();

        let expected = json!({
            "header": {
                "scopes": [{
                    "type": "module",
                    "name": "TOP",
                    "ports": [{
                        "name": "lhs",
                        "type": "wire",
                        "width": 4,
                        "identifier": ")",
                        "reference": "[3:0]"
                    }],
                    "subscopes": [{
                        "type": "task",
                        "name": "t",
                        "subscopes": []
                    }]
                }],
                "version": "v1"
            },
            "dumpvars": [{"#": "1"}, {")": "xxxx"}],
            "value_changes": [
                {"1": [{")": "0010"}, {"#": "0"}, {"#": "1"}]}
            ]
        });
        assert_eq!(to_json(&document), expected);
    }

    #[test]
    fn keys_keep_insertion_order() {
        let document = parse_vcd_str(
            "$timescale 1ps $end $scope module m $end $upscope $end $enddefinitions $end",
        )
        .unwrap();
        let rendered = serde_json::to_string(&to_json(&document)).unwrap();
        assert_eq!(
            rendered,
            r#"{"header":{"scopes":[{"type":"module","name":"m","ports":[],"subscopes":[]}],"timescale":"1ps"},"dumpvars":[],"value_changes":[]}"#
        );
    }

    #[test]
    fn block_scope_renders_as_unknown() {
        let document = parse_vcd_str(
            "$scope module m $end $scope begin b $end $upscope $end $upscope $end \
             $enddefinitions $end",
        )
        .unwrap();
        assert_eq!(
            to_json(&document)["header"]["scopes"][0]["subscopes"],
            json!([{"type": "unknown", "name": "b", "subscopes": []}])
        );
    }
}
