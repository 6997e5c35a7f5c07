use swc_core::{
    common::{Spanned, SyntaxContext, DUMMY_SP},
    ecma::{
        ast::*,
        utils::ExprFactory,
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::config::TransformConfig;
use crate::matchers::qualified_factory_call;

/// `React.DOM.div(props, ...children)` -> `React.createElement('div', props, ...children)`.
///
/// The rewritten callee reuses the spans of the nodes it replaces: the
/// namespace identifier takes over `React.DOM`, the `createElement` name
/// takes over the tag, so their comments follow into the JSX pass.
pub fn qualify_to_create_element(program: &mut Program, config: &TransformConfig) -> usize {
    let mut pass = QualifyToCreateElement { config, rewritten: 0 };
    program.visit_mut_with(&mut pass);
    pass.rewritten
}

struct QualifyToCreateElement<'a> {
    config: &'a TransformConfig,
    rewritten: usize,
}

impl VisitMut for QualifyToCreateElement<'_> {
    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.visit_mut_children_with(self);

        let Some((member, tag)) = qualified_factory_call(self.config, call) else {
            return;
        };
        let tag_name = tag.sym.to_string();
        let callee = Expr::Member(MemberExpr {
            span: member.span,
            obj: Box::new(Expr::Ident(Ident::new(
                self.config.namespace.clone().into(),
                member.obj.span(),
                SyntaxContext::empty(),
            ))),
            prop: MemberProp::Ident(IdentName::new(self.config.create_fn.clone().into(), tag.span)),
        });

        call.callee = callee.as_callee();
        call.args.insert(
            0,
            Expr::Lit(Lit::Str(Str {
                span: DUMMY_SP,
                value: tag_name.into(),
                raw: None,
            }))
            .as_arg(),
        );
        self.rewritten += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_util::apply;

    fn run(src: &str) -> (String, usize) {
        let config = TransformConfig::default();
        apply(src, |f| qualify_to_create_element(&mut f.program, &config))
    }

    #[test]
    fn rewrites_to_create_element_with_tag_argument() {
        let (out, n) = run("React.DOM.div({id: 'x'}, React.DOM.span(null));");
        assert_eq!(n, 2);
        assert!(out.contains(r#"React.createElement("div", {"#), "{out}");
        assert!(out.contains(r#"React.createElement("span", null)"#), "{out}");
    }

    #[test]
    fn no_arguments_still_gets_the_tag() {
        let (out, n) = run("React.DOM.br();");
        assert_eq!(n, 1);
        assert!(out.contains(r#"React.createElement("br")"#), "{out}");
    }

    #[test]
    fn non_callee_and_computed_uses_are_skipped() {
        let (out, n) = run("const f = React.DOM.div; React.DOM[tag](null); Other.DOM.p();");
        assert_eq!(n, 0);
        assert!(!out.contains("createElement"), "{out}");
    }
}
