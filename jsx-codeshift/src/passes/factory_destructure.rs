use swc_core::ecma::{
    ast::*,
    visit::{VisitMut, VisitMutWith},
};

use crate::config::TransformConfig;
use crate::matchers::{is_factory_destructure, prop_ident_key};

/// Removes `const {div, span} = React.DOM` (or `= DOM`) from render
/// functions and private `_render*` helpers. Returns the number of
/// declarators removed.
pub fn remove_factory_destructures(program: &mut Program, config: &TransformConfig) -> usize {
    let mut pass = FindRenderFunctions { config, removed: 0 };
    program.visit_mut_with(&mut pass);
    pass.removed
}

struct FindRenderFunctions<'a> {
    config: &'a TransformConfig,
    removed: usize,
}

impl VisitMut for FindRenderFunctions<'_> {
    fn visit_mut_prop(&mut self, prop: &mut Prop) {
        if prop_ident_key(prop).is_some_and(|k| self.config.is_render_like_key(k)) {
            let mut remover = DestructureRemover {
                config: self.config,
                removed: 0,
            };
            prop.visit_mut_children_with(&mut remover);
            self.removed += remover.removed;
        } else {
            prop.visit_mut_children_with(self);
        }
    }
}

struct DestructureRemover<'a> {
    config: &'a TransformConfig,
    removed: usize,
}

impl VisitMut for DestructureRemover<'_> {
    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        stmts.visit_mut_children_with(self);

        let config = self.config;
        let mut removed = 0;
        stmts.retain_mut(|stmt| {
            let Stmt::Decl(Decl::Var(var)) = stmt else {
                return true;
            };
            let before = var.decls.len();
            var.decls.retain(|d| !is_factory_destructure(config, d));
            removed += before - var.decls.len();
            !var.decls.is_empty()
        });
        self.removed += removed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_util::apply;

    fn run(src: &str) -> (String, usize) {
        let config = TransformConfig::default();
        apply(src, |f| remove_factory_destructures(&mut f.program, &config))
    }

    #[test]
    fn removes_whole_declaration() {
        let (out, n) = run("x = { render() { const {div} = React.DOM; return div(); } };");
        assert_eq!(n, 1);
        assert!(!out.contains("React.DOM"), "{out}");
        assert!(!out.contains("const"), "{out}");
    }

    #[test]
    fn keeps_sibling_declarators() {
        let (out, n) = run("x = { _renderRow() { var {td} = DOM, width = 3; if (a) { let {tr} = React.DOM; } } };");
        assert_eq!(n, 2);
        assert!(out.contains("width = 3"), "{out}");
        assert!(!out.contains("DOM"), "{out}");
    }

    #[test]
    fn outside_render_functions_is_untouched() {
        let src = "const {div} = React.DOM; x = { helper() { const {p} = React.DOM; }, renderRow() { const {b} = DOM; } };";
        let (out, n) = run(src);
        assert_eq!(n, 0);
        assert_eq!(out.matches("DOM").count(), 3, "{out}");
    }

    #[test]
    fn unrelated_destructures_survive() {
        let (out, n) = run("x = { render() { const {a} = this.props; const b = React.DOM; } };");
        assert_eq!(n, 0);
        assert!(out.contains("this.props"), "{out}");
        assert!(out.contains("React.DOM"), "{out}");
    }
}
