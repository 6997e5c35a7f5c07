use swc_core::{
    common::{Span, Spanned, SyntaxContext, DUMMY_SP},
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::config::TransformConfig;
use crate::matchers::factory_callee_name;

/// `div(...)` -> `React.DOM.div(...)`.
///
/// Only identifiers in call-callee position are rewritten; a factory name
/// used as a value, a `new` target or an optional call is left alone.
pub fn prefix_factory_calls(program: &mut Program, config: &TransformConfig) -> usize {
    let mut pass = PrefixFactoryCalls { config, prefixed: 0 };
    program.visit_mut_with(&mut pass);
    pass.prefixed
}

struct PrefixFactoryCalls<'a> {
    config: &'a TransformConfig,
    prefixed: usize,
}

impl PrefixFactoryCalls<'_> {
    /// `React.DOM.<tag>`, spanning the identifier it replaces so comments on
    /// that identifier stay attached.
    fn qualified(&self, tag: &str, span: Span) -> Expr {
        let table = Expr::Member(MemberExpr {
            span: DUMMY_SP,
            obj: Box::new(Expr::Ident(Ident::new(
                self.config.namespace.clone().into(),
                DUMMY_SP,
                SyntaxContext::empty(),
            ))),
            prop: MemberProp::Ident(IdentName::new(self.config.factory_table.clone().into(), DUMMY_SP)),
        });
        Expr::Member(MemberExpr {
            span,
            obj: Box::new(table),
            prop: MemberProp::Ident(IdentName::new(tag.into(), DUMMY_SP)),
        })
    }
}

impl VisitMut for PrefixFactoryCalls<'_> {
    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.visit_mut_children_with(self);

        let Some(tag) = factory_callee_name(self.config, call).map(str::to_string) else {
            return;
        };
        if let Callee::Expr(callee) = &mut call.callee {
            let span = callee.span();
            **callee = self.qualified(&tag, span);
            self.prefixed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_util::apply;

    fn run(src: &str) -> (String, usize) {
        let config = TransformConfig::default();
        apply(src, |f| prefix_factory_calls(&mut f.program, &config))
    }

    #[test]
    fn prefixes_bare_factory_calls() {
        let (out, n) = run("div({className: 'a'}, span(null, 'x'));");
        assert_eq!(n, 2);
        assert!(out.contains("React.DOM.div("), "{out}");
        assert!(out.contains("React.DOM.span(null"), "{out}");
    }

    #[test]
    fn ignores_non_callee_and_unknown_identifiers() {
        let (out, n) = run("const f = div; new span(); Widget(null); foo.div(); div?.();");
        assert_eq!(n, 0);
        assert!(!out.contains("React.DOM"), "{out}");
    }

    #[test]
    fn custom_namespace() {
        let config = TransformConfig {
            namespace: "Preact".into(),
            factory_table: "Tags".into(),
            ..Default::default()
        };
        let (out, n) = apply("p(null);", |f| prefix_factory_calls(&mut f.program, &config));
        assert_eq!(n, 1);
        assert!(out.contains("Preact.Tags.p(null)"), "{out}");
    }
}
