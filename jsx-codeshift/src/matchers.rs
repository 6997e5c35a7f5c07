//! Pure classifiers over swc syntax nodes.
//!
//! Nothing in here mutates the tree or touches comments; the passes decide
//! what to do with a match.

use swc_core::ecma::ast::*;

use crate::config::TransformConfig;

// -----------------------------------------------------------------------------
// Small accessors
// -----------------------------------------------------------------------------

pub fn callee_expr(call: &CallExpr) -> Option<&Expr> {
    match &call.callee {
        Callee::Expr(e) => Some(e),
        Callee::Super(_) | Callee::Import(_) => None,
    }
}

pub fn ident_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Ident(i) => Some(i.sym.as_ref()),
        _ => None,
    }
}

/// `obj.prop` with a plain identifier property.
pub fn static_member(expr: &Expr) -> Option<(&Expr, &IdentName)> {
    match expr {
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) => Some((obj, prop)),
        _ => None,
    }
}

fn is_member_named(expr: &Expr, object: &str, property: &str) -> bool {
    static_member(expr)
        .is_some_and(|(obj, prop)| ident_name(obj) == Some(object) && prop.sym.as_ref() == property)
}

/// Identifier key of an object property (`render: ...`, `render() {}`).
/// String-literal and computed keys are deliberately not names here.
pub fn prop_ident_key(prop: &Prop) -> Option<&str> {
    let key = match prop {
        Prop::KeyValue(kv) => &kv.key,
        Prop::Method(m) => &m.key,
        Prop::Getter(g) => &g.key,
        Prop::Setter(s) => &s.key,
        Prop::Shorthand(i) => return Some(i.sym.as_ref()),
        Prop::Assign(_) => return None,
    };
    match key {
        PropName::Ident(i) => Some(i.sym.as_ref()),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Namespace shapes
// -----------------------------------------------------------------------------

/// Bare identifier in callee position naming a registered DOM factory.
pub fn factory_callee_name<'a>(config: &TransformConfig, call: &'a CallExpr) -> Option<&'a str> {
    let name = callee_expr(call).and_then(ident_name)?;
    config.factories.contains(name).then_some(name)
}

/// `React.DOM`
pub fn is_factory_table(config: &TransformConfig, expr: &Expr) -> bool {
    is_member_named(expr, &config.namespace, &config.factory_table)
}

/// Tag of a `React.DOM.<tag>(...)` call, along with the member it came from.
pub fn qualified_factory_call<'a>(
    config: &TransformConfig,
    call: &'a CallExpr,
) -> Option<(&'a MemberExpr, &'a IdentName)> {
    match callee_expr(call)? {
        Expr::Member(
            member @ MemberExpr {
                obj,
                prop: MemberProp::Ident(tag),
                ..
            },
        ) if is_factory_table(config, obj) => Some((member, tag)),
        _ => None,
    }
}

/// `React.createElement(...)`
pub fn is_create_call(config: &TransformConfig, call: &CallExpr) -> bool {
    callee_expr(call).is_some_and(|c| is_member_named(c, &config.namespace, &config.create_fn))
}

pub fn as_create_call<'a>(config: &TransformConfig, expr: &'a Expr) -> Option<&'a CallExpr> {
    match expr {
        Expr::Call(call) if is_create_call(config, call) => Some(call),
        _ => None,
    }
}

/// `React.__spread(...)` or `Object.assign(...)`: calls whose arguments are
/// merged into a single props object.
pub fn is_spread_merge_call(config: &TransformConfig, call: &CallExpr) -> bool {
    callee_expr(call).is_some_and(|c| {
        is_member_named(c, &config.namespace, &config.spread_helper)
            || is_member_named(c, &config.merge_object, &config.merge_fn)
    })
}

/// `{...} = DOM` or `{...} = React.DOM`
pub fn is_factory_destructure(config: &TransformConfig, decl: &VarDeclarator) -> bool {
    let Pat::Object(_) = decl.name else {
        return false;
    };
    match decl.init.as_deref() {
        Some(init) => ident_name(init) == Some(config.factory_table.as_str()) || is_factory_table(config, init),
        None => false,
    }
}

// -----------------------------------------------------------------------------
// JSX eligibility
// -----------------------------------------------------------------------------

/// Props expressions that become a single `{...expr}` attribute.
pub fn is_spreadable_value(expr: &Expr) -> bool {
    matches!(expr, Expr::Ident(_) | Expr::Member(_) | Expr::Call(_))
}

/// String literal, identifier, or a non-computed member chain of those.
pub fn can_convert_to_jsx_identifier(expr: &Expr) -> bool {
    match expr {
        Expr::Lit(Lit::Str(_)) | Expr::Ident(_) => true,
        Expr::Member(MemberExpr { obj, prop, .. }) => {
            matches!(prop, MemberProp::Ident(_)) && can_convert_to_jsx_identifier(obj)
        }
        _ => false,
    }
}

/// Lower-case tags must be string literals (built-in elements); identifiers
/// must not start lower-case or JSX would read them as built-ins.
pub fn is_capitalization_invalid(expr: &Expr) -> bool {
    fn starts_lower(s: &str) -> bool {
        s.chars().next().is_some_and(|c| c.is_ascii_lowercase())
    }
    match expr {
        Expr::Lit(Lit::Str(s)) => !starts_lower(&s.value),
        Expr::Ident(i) => starts_lower(&i.sym),
        _ => false,
    }
}

/// A string literal can be a bare JSX attribute string when it has no escape
/// sequences and no double quote.
pub fn can_literal_be_prop_string(s: &Str) -> bool {
    let raw = s.raw.as_deref().unwrap_or(&s.value);
    !raw.contains('\\') && !s.value.contains('"')
}

/// Whether a string key can be written as a JSX attribute name: an
/// identifier that may also contain dashes, like `data-id` or `aria-label`.
pub fn is_jsx_attribute_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '-'))
}

/// A string child that can be written as bare JSX text.
pub fn is_text_child(s: &Str) -> bool {
    let value: &str = &s.value;
    !value.is_empty() && value.trim() == value && !value.contains(['{', '}'])
}

/// Escapes the characters JSX text cannot contain literally.
pub fn encode_jsx_text(value: &str) -> String {
    value.replace('<', "&lt;").replace('>', "&gt;")
}

/// Human-readable node kind for error messages.
pub fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::This(_) => "ThisExpression",
        Expr::Array(_) => "ArrayExpression",
        Expr::Object(_) => "ObjectExpression",
        Expr::Fn(_) => "FunctionExpression",
        Expr::Unary(_) => "UnaryExpression",
        Expr::Update(_) => "UpdateExpression",
        Expr::Bin(b) if matches!(b.op, BinaryOp::LogicalOr | BinaryOp::LogicalAnd | BinaryOp::NullishCoalescing) => {
            "LogicalExpression"
        }
        Expr::Bin(_) => "BinaryExpression",
        Expr::Assign(_) => "AssignmentExpression",
        Expr::Member(_) => "MemberExpression",
        Expr::Cond(_) => "ConditionalExpression",
        Expr::Call(_) => "CallExpression",
        Expr::New(_) => "NewExpression",
        Expr::Seq(_) => "SequenceExpression",
        Expr::Ident(_) => "Identifier",
        Expr::Lit(Lit::Str(_)) => "StringLiteral",
        Expr::Lit(Lit::Num(_)) => "NumericLiteral",
        Expr::Lit(Lit::Bool(_)) => "BooleanLiteral",
        Expr::Lit(Lit::Null(_)) => "NullLiteral",
        Expr::Lit(_) => "Literal",
        Expr::Tpl(_) => "TemplateLiteral",
        Expr::TaggedTpl(_) => "TaggedTemplateExpression",
        Expr::Arrow(_) => "ArrowFunctionExpression",
        Expr::Class(_) => "ClassExpression",
        Expr::Await(_) => "AwaitExpression",
        Expr::Paren(_) => "ParenthesizedExpression",
        Expr::JSXElement(_) => "JSXElement",
        Expr::JSXFragment(_) => "JSXFragment",
        Expr::OptChain(_) => "OptionalChain",
        _ => "Expression",
    }
}
