//! `React.createElement(tag, props, ...children)` -> JSX.
//!
//! Converted nodes are assembled from synthetic JSX wrappers around the
//! original argument nodes. Every node that is dropped on the way (the callee
//! chain, a merge call, object braces, a `null` placeholder, a spread marker,
//! the tag literal) gives up its comments, which travel with the result as
//! [`AttachedComment`]s and are re-attached where the element is placed.
//! JSX element syntax has no slot for a leading comment, so an element that
//! carries one is parenthesised and the parentheses take the call's span.

use swc_core::{
    common::{util::take::Take, Span, Spanned, SyntaxContext, DUMMY_SP},
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};
use tracing::debug;

use crate::comments::{force_placement, AttachedComment, CommentStore, Placement};
use crate::config::TransformConfig;
use crate::error::{Result, TransformError};
use crate::matchers::{
    as_create_call, can_convert_to_jsx_identifier, can_literal_be_prop_string, encode_jsx_text,
    expr_kind, is_capitalization_invalid, is_create_call, is_jsx_attribute_name, is_spread_merge_call,
    is_spreadable_value, is_text_child, static_member,
};

/// Attributes produced from one props argument, plus the comments of the
/// nodes that were discarded to produce them.
#[derive(Debug, Default)]
pub struct AttributeConversion {
    pub attributes: Vec<JSXAttrOrSpread>,
    pub extra_comments: Vec<AttachedComment>,
}

impl AttributeConversion {
    fn extend(&mut self, other: AttributeConversion) {
        self.attributes.extend(other.attributes);
        self.extra_comments.extend(other.extra_comments);
    }
}

/// Result of converting one create call. `expr` is either a JSX element
/// whose comments are in `comments`, or the untouched call (no comments).
#[derive(Debug)]
pub struct Converted {
    pub expr: Expr,
    pub comments: Vec<AttachedComment>,
}

fn unexpected(kind: &'static str) -> TransformError {
    TransformError::UnexpectedAttribute { kind }
}

fn jsx_text(value: &str) -> JSXElementChild {
    JSXElementChild::JSXText(JSXText {
        span: DUMMY_SP,
        value: value.into(),
        raw: value.into(),
    })
}

fn expr_container(expr: Expr) -> JSXExprContainer {
    JSXExprContainer {
        span: DUMMY_SP,
        expr: JSXExpr::Expr(Box::new(expr)),
    }
}

fn jsx_ident(sym: &str) -> Ident {
    Ident::new(sym.into(), DUMMY_SP, SyntaxContext::empty())
}

// -----------------------------------------------------------------------------
// Tag names
// -----------------------------------------------------------------------------

fn jsx_object(expr: &Expr) -> Option<JSXObject> {
    match expr {
        Expr::Ident(i) => Some(JSXObject::Ident(jsx_ident(&i.sym))),
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) => Some(JSXObject::JSXMemberExpr(Box::new(JSXMemberExpr {
            span: DUMMY_SP,
            obj: jsx_object(obj)?,
            prop: IdentName::new(prop.sym.clone(), DUMMY_SP),
        }))),
        _ => None,
    }
}

/// `'div'` -> `div`, `Foo` -> `Foo`, `UI.Button` -> `UI.Button`.
///
/// `None` for anything JSX has no name syntax for, including a string literal
/// used as the object of a member chain.
pub fn jsx_element_name(expr: &Expr) -> Option<JSXElementName> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(JSXElementName::Ident(jsx_ident(&s.value.to_string()))),
        Expr::Ident(i) => Some(JSXElementName::Ident(jsx_ident(&i.sym))),
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) => Some(JSXElementName::JSXMemberExpr(JSXMemberExpr {
            span: DUMMY_SP,
            obj: jsx_object(obj)?,
            prop: IdentName::new(prop.sym.clone(), DUMMY_SP),
        })),
        _ => None,
    }
}

/// Spans of a tag expression and, for member chains, each object and property.
fn tag_spans(expr: &Expr, out: &mut Vec<Span>) {
    out.push(expr.span());
    if let Expr::Member(m) = expr {
        tag_spans(&m.obj, out);
        out.push(m.prop.span());
    }
}

/// Name for the first argument of a create call, if the call may be
/// converted at all.
fn convertible_tag(call: &CallExpr) -> Option<JSXElementName> {
    match call.args.first() {
        Some(ExprOrSpread { spread: None, expr })
            if can_convert_to_jsx_identifier(expr) && !is_capitalization_invalid(expr) =>
        {
            jsx_element_name(expr)
        }
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Converter
// -----------------------------------------------------------------------------

pub struct JsxConverter<'a> {
    config: &'a TransformConfig,
    comments: &'a CommentStore,
    converted: usize,
}

impl<'a> JsxConverter<'a> {
    pub fn new(config: &'a TransformConfig, comments: &'a CommentStore) -> Self {
        Self {
            config,
            comments,
            converted: 0,
        }
    }

    /// Number of elements produced so far, nested ones included.
    pub fn converted(&self) -> usize {
        self.converted
    }

    fn take_callee_comments(&self, callee: &Callee) -> Vec<AttachedComment> {
        let Callee::Expr(callee) = callee else {
            return vec![];
        };
        let mut out = self.comments.take_attached(callee.span());
        if let Some((obj, prop)) = static_member(callee) {
            out.extend(self.comments.take_all([obj.span(), prop.span]));
        }
        out
    }

    fn take_tag_comments(&self, tag: &Expr) -> Vec<AttachedComment> {
        let mut spans = vec![];
        tag_spans(tag, &mut spans);
        self.comments.take_all(spans)
    }

    /// Converts the props argument of a create call. A missing argument
    /// yields no attributes.
    pub fn convert_props(&mut self, props: Option<ExprOrSpread>) -> Result<AttributeConversion> {
        match props {
            None => Ok(AttributeConversion::default()),
            Some(ExprOrSpread { spread: Some(_), .. }) => Err(unexpected("SpreadElement")),
            Some(ExprOrSpread { expr, .. }) => self.convert_expression_to_jsx_attributes(*expr),
        }
    }

    pub fn convert_expression_to_jsx_attributes(&mut self, expr: Expr) -> Result<AttributeConversion> {
        match expr {
            Expr::Call(call) if is_spread_merge_call(self.config, &call) => self.convert_merge_call(call),
            Expr::Paren(paren) => {
                let mut extra_comments = self.comments.take_attached(paren.span);
                let inner = self.convert_expression_to_jsx_attributes(*paren.expr)?;
                extra_comments.extend(inner.extra_comments);
                extra_comments.extend(self.comments.take_closing(paren.span));
                Ok(AttributeConversion {
                    attributes: inner.attributes,
                    extra_comments,
                })
            }
            value if is_spreadable_value(&value) => Ok(AttributeConversion {
                attributes: vec![JSXAttrOrSpread::SpreadElement(SpreadElement {
                    dot3_token: DUMMY_SP,
                    expr: Box::new(value),
                })],
                extra_comments: vec![],
            }),
            Expr::Object(obj) => self.convert_object(obj),
            Expr::Lit(Lit::Null(null)) => Ok(AttributeConversion {
                attributes: vec![],
                extra_comments: self.comments.take_attached(null.span),
            }),
            other => Err(unexpected(expr_kind(&other))),
        }
    }

    /// `Object.assign(a, {b: 1})`: the attributes of every argument in order.
    fn convert_merge_call(&mut self, call: CallExpr) -> Result<AttributeConversion> {
        let CallExpr {
            span, callee, args, ..
        } = call;
        let mut result = AttributeConversion {
            attributes: vec![],
            extra_comments: self.comments.take_attached(span),
        };
        result.extra_comments.extend(self.take_callee_comments(&callee));

        for arg in args {
            if arg.spread.is_some() {
                return Err(unexpected("SpreadElement"));
            }
            let converted = self.convert_expression_to_jsx_attributes(*arg.expr)?;
            result.extend(converted);
        }
        result.extra_comments.extend(self.comments.take_closing(span));
        Ok(result)
    }

    fn convert_object(&mut self, obj: ObjectLit) -> Result<AttributeConversion> {
        let mut extra_comments = self.comments.take_attached(obj.span);
        let mut attributes = Vec::with_capacity(obj.props.len());
        for prop in obj.props {
            match prop {
                PropOrSpread::Spread(spread) => {
                    extra_comments.extend(self.comments.take_attached(spread.dot3_token));
                    attributes.push(JSXAttrOrSpread::SpreadElement(SpreadElement {
                        dot3_token: DUMMY_SP,
                        ..spread
                    }));
                }
                PropOrSpread::Prop(prop) => attributes.push(self.convert_prop(*prop, &mut extra_comments)?),
            }
        }
        extra_comments.extend(self.comments.take_closing(obj.span));
        Ok(AttributeConversion {
            attributes,
            extra_comments,
        })
    }

    /// One object property as an attribute. Attribute names and literal
    /// values cannot print comments, so theirs are moved to `relocated`.
    fn convert_prop(&mut self, prop: Prop, relocated: &mut Vec<AttachedComment>) -> Result<JSXAttrOrSpread> {
        // `{'aria label': x}` has no attribute spelling; it stays an object
        // property behind a spread.
        if let Prop::KeyValue(KeyValueProp { key: PropName::Str(s), .. }) = &prop {
            if !is_jsx_attribute_name(&s.value) {
                return Ok(JSXAttrOrSpread::SpreadElement(SpreadElement {
                    dot3_token: DUMMY_SP,
                    expr: Box::new(Expr::Object(ObjectLit {
                        span: DUMMY_SP,
                        props: vec![PropOrSpread::Prop(Box::new(prop))],
                    })),
                }));
            }
        }

        let (key, value) = match prop {
            Prop::KeyValue(KeyValueProp { key, value }) => (key, *value),
            Prop::Shorthand(ident) => {
                let key = PropName::Ident(IdentName::new(ident.sym.clone(), ident.span));
                (key, Expr::Ident(Ident { span: DUMMY_SP, ..ident }))
            }
            Prop::Method(MethodProp { key, function }) => (key, Expr::Fn(FnExpr { ident: None, function })),
            Prop::Getter(_) => return Err(unexpected("GetterProperty")),
            Prop::Setter(_) => return Err(unexpected("SetterProperty")),
            Prop::Assign(_) => return Err(unexpected("AssignmentProperty")),
        };

        relocated.extend(self.comments.take_attached(key.span()));
        let value = match value {
            Expr::Lit(Lit::Str(s)) if can_literal_be_prop_string(&s) => {
                relocated.extend(self.comments.take_attached(s.span));
                JSXAttrValue::Lit(Lit::Str(Str {
                    span: DUMMY_SP,
                    value: s.value,
                    raw: None,
                }))
            }
            other => JSXAttrValue::JSXExprContainer(expr_container(other)),
        };

        Ok(JSXAttrOrSpread::JSXAttr(JSXAttr {
            span: DUMMY_SP,
            name: attr_name(key)?,
            value: Some(value),
        }))
    }

    /// Converts one create call. Calls whose tag cannot be written as a JSX
    /// name come back unchanged, with their comments left in place.
    pub fn convert_node_to_jsx(&mut self, call: CallExpr) -> Result<Converted> {
        let Some(name) = convertible_tag(&call) else {
            return Ok(Converted {
                expr: Expr::Call(call),
                comments: vec![],
            });
        };

        let CallExpr {
            span, callee, args, ..
        } = call;

        let mut comments = self.comments.take_attached(span);
        let mut callee_comments = self.take_callee_comments(&callee);
        force_placement(&mut callee_comments, Placement::Leading);
        comments.extend(callee_comments);

        let mut args = args.into_iter();
        let mut relocated = match args.next() {
            Some(tag) => self.take_tag_comments(&tag.expr),
            None => vec![],
        };
        let props = self.convert_props(args.next())?;
        relocated.extend(props.extra_comments);

        let mut children = vec![];
        for child in args {
            children.push(self.convert_child(child, &mut relocated)?);
        }
        relocated.extend(self.comments.take_closing(span));

        force_placement(&mut relocated, Placement::Trailing);
        comments.extend(relocated);

        let opening = JSXOpeningElement {
            span: DUMMY_SP,
            name: name.clone(),
            attrs: props.attributes,
            self_closing: children.is_empty(),
            type_args: None,
        };
        let element = if children.is_empty() {
            JSXElement {
                span,
                opening,
                children: vec![],
                closing: None,
            }
        } else {
            // One child per line.
            let mut padded = Vec::with_capacity(children.len() * 2 + 1);
            padded.push(jsx_text("\n"));
            for child in children {
                padded.push(child);
                padded.push(jsx_text("\n"));
            }
            JSXElement {
                span,
                opening,
                children: padded,
                closing: Some(JSXClosingElement { span: DUMMY_SP, name }),
            }
        };

        self.converted += 1;
        Ok(Converted {
            expr: Expr::JSXElement(Box::new(element)),
            comments,
        })
    }

    fn convert_child(
        &mut self,
        child: ExprOrSpread,
        relocated: &mut Vec<AttachedComment>,
    ) -> Result<JSXElementChild> {
        let ExprOrSpread { spread, expr } = child;
        if let Some(dots) = spread {
            relocated.extend(self.comments.take_attached(dots));
            return Ok(JSXElementChild::JSXExprContainer(expr_container(*expr)));
        }

        match *expr {
            Expr::Lit(Lit::Str(s)) if is_text_child(&s) && !self.comments.has_attached(s.span) => {
                Ok(jsx_text(&encode_jsx_text(&s.value)))
            }
            Expr::Call(call) if is_create_call(self.config, &call) => {
                let converted = self.convert_node_to_jsx(call)?;
                match converted.expr {
                    Expr::JSXElement(element) if converted.comments.is_empty() => {
                        Ok(JSXElementChild::JSXElement(element))
                    }
                    Expr::JSXElement(element) => {
                        // A child element has nowhere to put comments; an
                        // expression container does.
                        let placed = self.place(element, converted.comments);
                        Ok(JSXElementChild::JSXExprContainer(expr_container(placed)))
                    }
                    other => Ok(JSXElementChild::JSXExprContainer(expr_container(other))),
                }
            }
            other => Ok(JSXElementChild::JSXExprContainer(expr_container(other))),
        }
    }

    /// Attaches `comments` to a converted element in expression position.
    /// Leading comments need the element parenthesised: the printer emits
    /// them for the parentheses but never for element syntax.
    pub fn place(&self, mut element: Box<JSXElement>, comments: Vec<AttachedComment>) -> Expr {
        if comments.is_empty() {
            return Expr::JSXElement(element);
        }
        let span = element.span;
        let count = comments.len();
        let has_leading = comments.iter().any(|c| c.placement == Placement::Leading);
        if !self.comments.attach(span, comments) {
            debug!(count, "element has no source position, its comments are dropped");
            return Expr::JSXElement(element);
        }
        if !has_leading {
            return Expr::JSXElement(element);
        }
        element.span = DUMMY_SP;
        Expr::Paren(ParenExpr {
            span,
            expr: Box::new(Expr::JSXElement(element)),
        })
    }
}

fn attr_name(key: PropName) -> Result<JSXAttrName> {
    match key {
        PropName::Ident(ident) => Ok(JSXAttrName::Ident(IdentName { span: DUMMY_SP, ..ident })),
        PropName::Str(s) => Ok(JSXAttrName::Ident(IdentName::new(s.value.to_string().into(), DUMMY_SP))),
        PropName::Num(_) => Err(unexpected("NumericLiteral")),
        PropName::BigInt(_) => Err(unexpected("BigIntLiteral")),
        PropName::Computed(_) => Err(unexpected("ComputedPropertyName")),
    }
}

// -----------------------------------------------------------------------------
// Driver
// -----------------------------------------------------------------------------

/// Replaces every `React.createElement(...)` call with JSX. Returns the
/// number of elements produced and the number of calls left alone because
/// their tag is dynamic.
pub fn convert_create_calls(
    program: &mut Program,
    comments: &CommentStore,
    config: &TransformConfig,
) -> Result<(usize, usize)> {
    let mut pass = CreateElementToJsx {
        converter: JsxConverter::new(config, comments),
        skipped: 0,
        error: None,
    };
    program.visit_mut_with(&mut pass);
    match pass.error {
        Some(e) => Err(e),
        None => Ok((pass.converter.converted(), pass.skipped)),
    }
}

struct CreateElementToJsx<'a> {
    converter: JsxConverter<'a>,
    skipped: usize,
    error: Option<TransformError>,
}

impl VisitMut for CreateElementToJsx<'_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        // Outermost call first, so nested calls in child position become
        // child elements rather than expression containers.
        if as_create_call(self.converter.config, expr).is_some() {
            if let Expr::Call(call) = expr.take() {
                let span = call.span;
                match self.converter.convert_node_to_jsx(call) {
                    Ok(Converted {
                        expr: Expr::JSXElement(element),
                        comments,
                    }) => *expr = self.converter.place(element, comments),
                    Ok(Converted { expr: skipped, .. }) => {
                        self.skipped += 1;
                        debug!(?span, "left create call with a dynamic tag as is");
                        *expr = skipped;
                    }
                    Err(e) => {
                        self.error = Some(e);
                        return;
                    }
                }
            }
        }

        expr.visit_mut_children_with(self);
    }
}
