// Evaluator behavior over ESTree fixtures and hand-built trees
use esreflect::ast::build::{binary, call, computed, ident, lit, member, num, str_lit, unary};
use esreflect::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn node(json: serde_json::Value) -> Node {
    serde_json::from_value(json).expect("valid ESTree node")
}

fn config() -> Namespace {
    Namespace::from_json(&json!({
        "a": {"b": {"c": 5}},
        "name": "app",
        "debug": true,
        "nothing": null,
        "list": {"0": "first"}
    }))
    .expect("valid namespace")
}

// ═══════════════════════════════════════════════════════════════════════
// Literals and Identifiers
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_literal_returns_value_verbatim() {
    let ns = config();
    assert_eq!(evaluate(&num(3.5), None), Ok(Value::Number(3.5)));
    assert_eq!(evaluate(&str_lit("x"), Some(&ns)), Ok(Value::string("x")));
    assert_eq!(evaluate(&lit(true), Some(&ns)), Ok(Value::Bool(true)));
    assert_eq!(evaluate(&lit(Value::Null), None), Ok(Value::Null));
}

#[test]
fn test_literal_from_estree() {
    let expr = node(json!({"type": "Literal", "value": "hello", "raw": "'hello'"}));
    assert_eq!(evaluate(&expr, None), Ok(Value::string("hello")));
}

#[test]
fn test_identifier_lookup() {
    let ns = config();
    assert_eq!(evaluate(&ident("name"), Some(&ns)), Ok(Value::string("app")));
    assert_eq!(evaluate(&ident("nothing"), Some(&ns)), Ok(Value::Null));
}

#[test]
fn test_identifier_bound_to_namespace() {
    let ns = config();
    let value = evaluate(&ident("a"), Some(&ns)).unwrap();
    assert!(value.as_namespace().is_some_and(|a| a.contains("b")));
}

#[test]
fn test_unbound_identifier() {
    assert_eq!(
        evaluate(&ident("missing"), Some(&config())),
        Err(EvalError::UnboundIdentifier {
            name: "missing".to_string()
        })
    );
}

#[test]
fn test_missing_namespace_is_empty() {
    assert!(matches!(
        evaluate(&ident("a"), None),
        Err(EvalError::UnboundIdentifier { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Member Chains
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_member_chain() {
    let expr = node(json!({
        "type": "MemberExpression",
        "computed": false,
        "object": {
            "type": "MemberExpression",
            "computed": false,
            "object": {"type": "Identifier", "name": "a"},
            "property": {"type": "Identifier", "name": "b"}
        },
        "property": {"type": "Identifier", "name": "c"}
    }));
    assert_eq!(evaluate(&expr, Some(&config())), Ok(Value::Number(5.0)));
}

#[test]
fn test_member_chain_missing_links() {
    let chain = member(member(ident("a"), "b"), "c");

    let no_c = Namespace::from_json(&json!({"a": {"b": {}}})).unwrap();
    assert_eq!(
        evaluate(&chain, Some(&no_c)),
        Err(EvalError::UnboundField {
            field: "c".to_string()
        })
    );

    let no_b = Namespace::from_json(&json!({"a": {}})).unwrap();
    assert_eq!(
        evaluate(&chain, Some(&no_b)),
        Err(EvalError::UnboundField {
            field: "b".to_string()
        })
    );

    let no_a = Namespace::new();
    assert_eq!(
        evaluate(&chain, Some(&no_a)),
        Err(EvalError::UnboundField {
            field: "a".to_string()
        })
    );
}

#[test]
fn test_member_through_scalar() {
    let expr = member(ident("name"), "length");
    assert_eq!(
        evaluate(&expr, Some(&config())),
        Err(EvalError::NotANamespace {
            field: "length".to_string(),
            found: "string",
        })
    );
}

#[test]
fn test_computed_member() {
    let ns = config();
    let by_string = computed(member(ident("a"), "b"), str_lit("c"));
    assert_eq!(evaluate(&by_string, Some(&ns)), Ok(Value::Number(5.0)));

    let by_number = computed(ident("list"), num(0.0));
    assert_eq!(evaluate(&by_number, Some(&ns)), Ok(Value::string("first")));
}

#[test]
fn test_member_through_call_is_unsupported() {
    let expr = member(call(ident("f"), vec![]), "x");
    assert_eq!(
        evaluate(&expr, Some(&config())),
        Err(EvalError::UnsupportedMemberTarget {
            kind: "CallExpression".to_string()
        })
    );
}

#[test]
fn test_resolve_member_returns_borrowed_value() {
    let ns = config();
    let ctx = EvalContext::default();
    let b = resolve_member(&member(ident("a"), "b"), &ns, &ctx).unwrap();
    assert_eq!(b.as_namespace().and_then(|b| b.get("c")), Some(&Value::Number(5.0)));
}

// ═══════════════════════════════════════════════════════════════════════
// Operators
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_binary_add() {
    assert_eq!(evaluate(&binary("+", num(2.0), num(3.0)), None), Ok(Value::Number(5.0)));
}

#[test]
fn test_binary_add_from_estree() {
    let expr = node(json!({
        "type": "BinaryExpression",
        "operator": "+",
        "left": {"type": "Literal", "value": 2, "raw": "2"},
        "right": {"type": "Literal", "value": 3, "raw": "3"}
    }));
    assert_eq!(evaluate(&expr, Some(&Namespace::new())), Ok(Value::Number(5.0)));
}

#[test]
fn test_string_concatenation() {
    let ns = config();
    let expr = binary("+", member(ident("a"), "b"), str_lit("!"));
    assert!(matches!(
        evaluate(&expr, Some(&ns)),
        Err(EvalError::InvalidOperand { .. })
    ));

    let expr = binary("+", ident("name"), binary("+", str_lit("-"), num(2.0)));
    assert_eq!(evaluate(&expr, Some(&ns)), Ok(Value::string("app-2")));

    let expr = binary("+", ident("debug"), str_lit("?"));
    assert_eq!(evaluate(&expr, Some(&ns)), Ok(Value::string("true?")));
}

#[test]
fn test_concatenation_uses_exponent_notation() {
    let expr = binary("+", str_lit("x"), num(1e21));
    assert_eq!(evaluate(&expr, None), Ok(Value::string("x1e+21")));

    let expr = binary("+", str_lit("x"), num(1e-7));
    assert_eq!(evaluate(&expr, None), Ok(Value::string("x1e-7")));

    let expr = binary("+", str_lit("x"), num(123456789012.5));
    assert_eq!(evaluate(&expr, None), Ok(Value::string("x123456789012.5")));
}

#[test]
fn test_long_concatenation_from_estree() {
    // "a" + "b" + ... nests 130 levels, past serde_json's default limit.
    let mut expr = json!({"type": "Literal", "value": "a"});
    for _ in 0..129 {
        expr = json!({
            "type": "BinaryExpression",
            "operator": "+",
            "left": expr,
            "right": {"type": "Literal", "value": "b"}
        });
    }
    let source = json!({
        "type": "Program",
        "body": [{"type": "ExpressionStatement", "expression": expr}]
    })
    .to_string();

    let ast = Ast::from_estree(&source).unwrap();
    let Node::ExpressionStatement(stmt) = &ast.program().body[0] else {
        panic!("Expected ExpressionStatement");
    };
    let expected = format!("a{}", "b".repeat(129));
    assert_eq!(ast.evaluate(&stmt.expression, None), Ok(Value::string(expected)));
}

#[test]
fn test_binary_sub_coerces() {
    let ns = config();
    assert_eq!(
        evaluate(&binary("-", str_lit("10"), ident("debug")), Some(&ns)),
        Ok(Value::Number(9.0))
    );
    let nan = evaluate(&binary("-", ident("name"), num(1.0)), Some(&ns)).unwrap();
    assert!(nan.as_number().is_some_and(f64::is_nan));
}

#[test]
fn test_unary_negation() {
    let ns = Namespace::new().with("x", 4);
    assert_eq!(evaluate(&unary("-", ident("x")), Some(&ns)), Ok(Value::Number(-4.0)));
    assert_eq!(evaluate(&unary("-", str_lit("2")), None), Ok(Value::Number(-2.0)));
}

#[test]
fn test_unsupported_operators() {
    assert_eq!(
        evaluate(&binary("*", num(2.0), num(3.0)), None),
        Err(EvalError::UnsupportedOperator {
            operator: "*".to_string(),
            arity: Arity::Binary,
        })
    );
    assert_eq!(
        evaluate(&unary("!", lit(true)), None),
        Err(EvalError::UnsupportedOperator {
            operator: "!".to_string(),
            arity: Arity::Unary,
        })
    );
}

#[test]
fn test_unsupported_operator_reported_before_operands() {
    // The unbound operand is never looked up.
    assert!(matches!(
        evaluate(&binary("%", ident("nope"), num(1.0)), None),
        Err(EvalError::UnsupportedOperator { .. })
    ));
}

#[test]
fn test_left_operand_fails_first() {
    let expr = binary("+", ident("left"), ident("right"));
    assert_eq!(
        evaluate(&expr, None),
        Err(EvalError::UnboundIdentifier {
            name: "left".to_string()
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Unevaluable Kinds and Limits
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_unevaluable_kinds() {
    assert_eq!(
        evaluate(&call(ident("f"), vec![]), None),
        Err(EvalError::UnevaluableNodeKind {
            kind: "CallExpression".to_string()
        })
    );

    let this = node(json!({"type": "ThisExpression"}));
    assert_eq!(
        evaluate(&this, None),
        Err(EvalError::UnevaluableNodeKind {
            kind: "ThisExpression".to_string()
        })
    );
}

#[test]
fn test_error_inside_operand_aborts() {
    let expr = binary("+", num(1.0), call(ident("f"), vec![]));
    assert!(matches!(
        evaluate(&expr, None),
        Err(EvalError::UnevaluableNodeKind { .. })
    ));
}

#[test]
fn test_depth_limit() {
    let mut expr = num(1.0);
    for _ in 0..20 {
        expr = unary("-", expr);
    }
    let ctx = EvalContext::with_max_depth(10);
    assert_eq!(
        eval_with(&expr, None, &ctx),
        Err(EvalError::DepthLimitExceeded { limit: 10 })
    );

    // A failed evaluation leaves nothing behind in the context.
    let shallow = unary("-", num(1.0));
    assert_eq!(eval_with(&shallow, None, &ctx), Ok(Value::Number(-1.0)));
    assert_eq!(evaluate(&expr, None), Ok(Value::Number(1.0)));
}

#[test]
fn test_evaluate_through_ast_handle() {
    let ast = Ast::new(Program { body: Vec::new() });
    let ns = config();
    assert_eq!(
        ast.evaluate(&member(ident("a"), "b"), Some(&ns))
            .map(|b| b.as_namespace().map(Namespace::len)),
        Ok(Some(1))
    );
}

#[test]
fn test_eval_error_into_error() {
    let err: Error = evaluate(&ident("x"), None).unwrap_err().into();
    assert_eq!(err.to_string(), "identifier `x` is not bound in the namespace");
}
