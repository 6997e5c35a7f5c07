use swc_core::ecma::{
    ast::*,
    visit::{VisitMut, VisitMutWith},
};

use crate::config::TransformConfig;
use crate::error::{Result, TransformError};
use crate::matchers::prop_ident_key;

/// `render({div, span}) {}` -> `render() {}`.
///
/// The single parameter of a render function was a destructured import of
/// factory names, made redundant by prefixing. Returns the number of
/// parameters removed.
pub fn strip_render_params(program: &mut Program, config: &TransformConfig) -> Result<usize> {
    let mut pass = StripRenderParams {
        config,
        stripped: 0,
        error: None,
    };
    program.visit_mut_with(&mut pass);
    match pass.error {
        Some(e) => Err(e),
        None => Ok(pass.stripped),
    }
}

struct StripRenderParams<'a> {
    config: &'a TransformConfig,
    stripped: usize,
    error: Option<TransformError>,
}

/// Clears a parameter list of at most one entry.
fn strip_params<T>(params: &mut Vec<T>) -> Result<bool> {
    match params.len() {
        0 => Ok(false),
        1 => {
            params.clear();
            Ok(true)
        }
        count => Err(TransformError::TooManyRenderParams { count }),
    }
}

impl StripRenderParams<'_> {
    fn strip(&self, prop: &mut Prop) -> Result<bool> {
        match prop {
            Prop::Method(m) => strip_params(&mut m.function.params),
            Prop::KeyValue(kv) => match &mut *kv.value {
                Expr::Fn(f) => strip_params(&mut f.function.params),
                Expr::Arrow(a) => strip_params(&mut a.params),
                _ => Err(self.not_a_function()),
            },
            Prop::Shorthand(_) => Err(self.not_a_function()),
            // Accessors keep their fixed arity.
            Prop::Getter(_) | Prop::Setter(_) | Prop::Assign(_) => Ok(false),
        }
    }

    fn not_a_function(&self) -> TransformError {
        TransformError::RenderNotFunction {
            key: self.config.render_key.clone(),
        }
    }
}

impl VisitMut for StripRenderParams<'_> {
    fn visit_mut_prop(&mut self, prop: &mut Prop) {
        if self.error.is_some() {
            return;
        }
        prop.visit_mut_children_with(self);

        if !prop_ident_key(prop).is_some_and(|k| self.config.is_render_key(k)) {
            return;
        }
        match self.strip(prop) {
            Ok(true) => self.stripped += 1,
            Ok(false) => {}
            Err(e) => self.error = Some(e),
        }
    }
}
