//! ESTree JSON conversion for syntax nodes
//!
//! A document is read into a `serde_json::Value` once, then each object is
//! taken apart field by field. The `type` tag is inspected before choosing a
//! record type; unknown tags become [`Node::Unknown`] instead of failing the
//! whole document.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value as Json};

use super::{
    ArrayExpression, AssignmentExpression, BinaryExpression, BlockStatement, CallExpression,
    ExpressionStatement, Function, Identifier, IfStatement, LabeledStatement, Literal,
    LoopStatement, MemberExpression, Node, NodeKind, ObjectExpression, Program, Property,
    ReturnStatement, TryStatement, UnaryExpression, UnknownNode, VariableDeclaration,
    VariableDeclarator, WhileStatement, WithStatement,
};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

type JsonResult<T> = Result<T, serde_json::Error>;

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Json::deserialize(deserializer)?;
        Node::from_json(raw).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Program {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Json::deserialize(deserializer)?;
        Program::from_json(raw).map_err(de::Error::custom)
    }
}

impl Program {
    /// Build a program from a parsed ESTree JSON object.
    ///
    /// Only `body` is read; the root's `type` is not checked here.
    pub fn from_json(raw: Json) -> JsonResult<Program> {
        let mut fields = Fields::of(raw)?;
        Ok(Program {
            body: fields.nodes("body")?,
        })
    }
}

impl Node {
    /// Build a node from a parsed ESTree JSON object.
    pub fn from_json(raw: Json) -> JsonResult<Node> {
        ensure_sufficient_stack(|| convert(raw))
    }
}

fn convert(raw: Json) -> JsonResult<Node> {
    let mut f = Fields::of(raw)?;
    let tag = match f.take("type") {
        Some(Json::String(tag)) => tag,
        _ => return Err(missing("type")),
    };
    let kind = match tag.parse::<NodeKind>() {
        Ok(kind) => kind,
        Err(_) => return Ok(Node::Unknown(UnknownNode { kind: tag })),
    };

    let node = match kind {
        NodeKind::Literal => Node::Literal(Literal {
            value: literal_value(f.take("value").unwrap_or(Json::Null)),
            raw: f.scalar("raw")?,
            regex: f.scalar("regex")?,
        }),
        NodeKind::Identifier => Node::Identifier(Identifier {
            name: f.string("name")?,
        }),
        NodeKind::MemberExpression => Node::MemberExpression(MemberExpression {
            object: f.node("object")?,
            property: f.node("property")?,
            computed: f.flag("computed")?,
        }),
        NodeKind::UnaryExpression => Node::UnaryExpression(UnaryExpression {
            operator: f.string("operator")?,
            argument: f.node("argument")?,
        }),
        NodeKind::BinaryExpression => Node::BinaryExpression(BinaryExpression {
            operator: f.string("operator")?,
            left: f.node("left")?,
            right: f.node("right")?,
        }),
        NodeKind::ArrayExpression => Node::ArrayExpression(ArrayExpression {
            elements: f.opt_nodes("elements")?,
        }),
        NodeKind::ObjectExpression => Node::ObjectExpression(ObjectExpression {
            properties: f.nodes("properties")?,
        }),
        NodeKind::Property => Node::Property(Property {
            key: f.node("key")?,
            value: f.node("value")?,
            computed: f.flag("computed")?,
        }),
        NodeKind::AssignmentExpression => Node::AssignmentExpression(AssignmentExpression {
            operator: f.string("operator")?,
            left: f.node("left")?,
            right: f.node("right")?,
        }),
        NodeKind::CallExpression => Node::CallExpression(CallExpression {
            callee: f.node("callee")?,
            arguments: f.nodes("arguments")?,
        }),
        NodeKind::FunctionExpression => Node::FunctionExpression(function(&mut f)?),
        NodeKind::ArrowFunctionExpression => Node::ArrowFunctionExpression(function(&mut f)?),
        NodeKind::FunctionDeclaration => Node::FunctionDeclaration(function(&mut f)?),
        NodeKind::ExpressionStatement => Node::ExpressionStatement(ExpressionStatement {
            expression: f.node("expression")?,
        }),
        NodeKind::BlockStatement => Node::BlockStatement(BlockStatement {
            body: f.nodes("body")?,
        }),
        NodeKind::IfStatement => Node::IfStatement(IfStatement {
            test: f.node("test")?,
            consequent: f.node("consequent")?,
            alternate: f.opt_node("alternate")?,
        }),
        NodeKind::LabeledStatement => Node::LabeledStatement(LabeledStatement {
            label: f.node("label")?,
            body: f.node("body")?,
        }),
        NodeKind::WithStatement => Node::WithStatement(WithStatement {
            object: f.node("object")?,
            body: f.node("body")?,
        }),
        NodeKind::ReturnStatement => Node::ReturnStatement(ReturnStatement {
            argument: f.opt_node("argument")?,
        }),
        NodeKind::TryStatement => Node::TryStatement(TryStatement {
            block: f.node("block")?,
        }),
        NodeKind::WhileStatement => Node::WhileStatement(while_loop(&mut f)?),
        NodeKind::DoWhileStatement => Node::DoWhileStatement(while_loop(&mut f)?),
        NodeKind::ForStatement => Node::ForStatement(for_loop(&mut f)?),
        NodeKind::ForInStatement => Node::ForInStatement(for_loop(&mut f)?),
        NodeKind::ForOfStatement => Node::ForOfStatement(for_loop(&mut f)?),
        NodeKind::VariableDeclaration => Node::VariableDeclaration(VariableDeclaration {
            declarations: f
                .array("declarations")?
                .into_iter()
                .map(declarator)
                .collect::<JsonResult<_>>()?,
            kind: f.scalar("kind")?.ok_or_else(|| missing("kind"))?,
        }),
    };
    Ok(node)
}

fn function(f: &mut Fields) -> JsonResult<Function> {
    Ok(Function {
        id: f.opt_node("id")?,
        body: f.node("body")?,
    })
}

fn while_loop(f: &mut Fields) -> JsonResult<WhileStatement> {
    Ok(WhileStatement {
        test: f.node("test")?,
        body: f.node("body")?,
    })
}

fn for_loop(f: &mut Fields) -> JsonResult<LoopStatement> {
    Ok(LoopStatement {
        body: f.node("body")?,
    })
}

fn declarator(raw: Json) -> JsonResult<VariableDeclarator> {
    let mut f = Fields::of(raw)?;
    Ok(VariableDeclarator {
        id: f.node("id")?,
        init: f.opt_node("init")?,
    })
}

/// The fields of one JSON object, moved out as they are read.
struct Fields(Map<String, Json>);

impl Fields {
    fn of(raw: Json) -> JsonResult<Self> {
        match raw {
            Json::Object(map) => Ok(Fields(map)),
            // Anything but an object has no `type` to dispatch on.
            _ => Err(missing("type")),
        }
    }

    /// Remove a field; `null` reads as absent.
    fn take(&mut self, name: &str) -> Option<Json> {
        match self.0.remove(name) {
            Some(Json::Null) | None => None,
            value => value,
        }
    }

    fn node(&mut self, name: &'static str) -> JsonResult<Box<Node>> {
        self.opt_node(name)?.ok_or_else(|| missing(name))
    }

    fn opt_node(&mut self, name: &'static str) -> JsonResult<Option<Box<Node>>> {
        self.take(name)
            .map(|raw| Node::from_json(raw).map(Box::new))
            .transpose()
    }

    fn nodes(&mut self, name: &'static str) -> JsonResult<Vec<Node>> {
        self.array(name)?.into_iter().map(Node::from_json).collect()
    }

    /// An array whose `null` entries are holes.
    fn opt_nodes(&mut self, name: &'static str) -> JsonResult<Vec<Option<Node>>> {
        self.array(name)?
            .into_iter()
            .map(|raw| match raw {
                Json::Null => Ok(None),
                raw => Node::from_json(raw).map(Some),
            })
            .collect()
    }

    fn array(&mut self, name: &'static str) -> JsonResult<Vec<Json>> {
        match self.take(name) {
            Some(Json::Array(items)) => Ok(items),
            Some(other) => Err(invalid(name, &other, "an array")),
            None => Err(missing(name)),
        }
    }

    fn string(&mut self, name: &'static str) -> JsonResult<String> {
        match self.take(name) {
            Some(Json::String(s)) => Ok(s),
            Some(other) => Err(invalid(name, &other, "a string")),
            None => Err(missing(name)),
        }
    }

    /// A boolean that defaults to `false`.
    fn flag(&mut self, name: &'static str) -> JsonResult<bool> {
        match self.take(name) {
            Some(Json::Bool(b)) => Ok(b),
            Some(other) => Err(invalid(name, &other, "a boolean")),
            None => Ok(false),
        }
    }

    /// A node-free field such as `raw`, `regex` or `kind`.
    fn scalar<T: DeserializeOwned>(&mut self, name: &'static str) -> JsonResult<Option<T>> {
        self.take(name).map(serde_json::from_value).transpose()
    }
}

fn missing(name: &'static str) -> serde_json::Error {
    de::Error::missing_field(name)
}

fn invalid(name: &str, found: &Json, expected: &str) -> serde_json::Error {
    let found = match found {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    };
    de::Error::custom(format!(
        "invalid type for `{}`: expected {}, found {}",
        name, expected, found
    ))
}

/// A literal's `value` field.
///
/// Regular-expression and bigint literals carry `null` or `{}` here in
/// ESTree JSON; both read as [`Value::Null`].
fn literal_value(raw: Json) -> Value {
    match raw {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::String(s),
        Json::Array(_) | Json::Object(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DeclarationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_literal_values() {
        let node = Node::from_json(json!({"type": "Literal", "value": 1, "raw": "1"})).unwrap();
        match node {
            Node::Literal(lit) => {
                assert_eq!(lit.value, Value::Number(1.0));
                assert_eq!(lit.raw.as_deref(), Some("1"));
            }
            other => panic!("Expected Literal, got {:?}", other),
        }
    }

    #[test]
    fn test_regex_literal_reads_as_null() {
        let node = Node::from_json(json!({
            "type": "Literal",
            "value": {},
            "regex": {"pattern": "a+", "flags": "g"}
        }))
        .unwrap();
        match node {
            Node::Literal(lit) => {
                assert_eq!(lit.value, Value::Null);
                assert_eq!(lit.regex.unwrap().pattern, "a+");
            }
            other => panic!("Expected Literal, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let node = Node::from_json(json!({"type": "ThisExpression"})).unwrap();
        assert_eq!(node.kind_name(), "ThisExpression");
        assert_eq!(node.kind(), None);
    }

    #[test]
    fn test_missing_type_fails() {
        let err = Node::from_json(json!({"name": "x"})).unwrap_err();
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let node = Node::from_json(json!({
            "type": "Identifier",
            "name": "x",
            "start": 0,
            "end": 1,
            "loc": {"start": {"line": 1, "column": 0}}
        }))
        .unwrap();
        assert_eq!(node.as_identifier(), Some("x"));
    }

    #[test]
    fn test_nested_statements() {
        let program: Program = serde_json::from_value(json!({
            "type": "Program",
            "body": [{
                "type": "VariableDeclaration",
                "kind": "const",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": {"type": "Identifier", "name": "xs"},
                    "init": {
                        "type": "ArrayExpression",
                        "elements": [null, {"type": "Literal", "value": 2}]
                    }
                }]
            }]
        }))
        .unwrap();

        match &program.body[0] {
            Node::VariableDeclaration(decl) => {
                assert_eq!(decl.kind, DeclarationKind::Const);
                assert_eq!(decl.declarations[0].id.as_identifier(), Some("xs"));
                match decl.declarations[0].init.as_deref() {
                    Some(Node::ArrayExpression(array)) => {
                        assert!(array.elements[0].is_none());
                        assert!(array.elements[1].is_some());
                    }
                    other => panic!("Expected ArrayExpression, got {:?}", other),
                }
            }
            other => panic!("Expected VariableDeclaration, got {:?}", other),
        }
    }

    #[test]
    fn test_newer_declaration_keywords() {
        let node = Node::from_json(json!({
            "type": "VariableDeclaration",
            "kind": "using",
            "declarations": []
        }))
        .unwrap();
        match node {
            Node::VariableDeclaration(decl) => assert_eq!(decl.kind, DeclarationKind::Other),
            other => panic!("Expected VariableDeclaration, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_type_named() {
        let err = Node::from_json(json!({"type": "Identifier", "name": 3})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type for `name`: expected a string, found a number"
        );
    }

    #[test]
    fn test_null_optional_fields() {
        let node = Node::from_json(json!({
            "type": "IfStatement",
            "test": {"type": "Identifier", "name": "t"},
            "consequent": {"type": "BlockStatement", "body": []},
            "alternate": null
        }))
        .unwrap();
        match node {
            Node::IfStatement(stmt) => assert!(stmt.alternate.is_none()),
            other => panic!("Expected IfStatement, got {:?}", other),
        }
    }

    #[test]
    fn test_deep_chain_converts() {
        let mut raw = json!({"type": "Literal", "value": "a"});
        for _ in 0..2000 {
            raw = json!({
                "type": "BinaryExpression",
                "operator": "+",
                "left": raw,
                "right": {"type": "Literal", "value": "b"}
            });
        }
        let mut node = Node::from_json(raw).unwrap();
        let mut depth = 0;
        while let Node::BinaryExpression(expr) = node {
            node = *expr.left;
            depth += 1;
        }
        assert_eq!(depth, 2000);
        assert_eq!(
            node,
            Node::Literal(Literal {
                value: Value::from("a"),
                raw: None,
                regex: None,
            })
        );
    }
}
