//! The five rewrite passes, in the order they must run:
//!
//! 1. `div(...)`                         -> `React.DOM.div(...)`
//! 2. `render({div, span}) {}`           -> `render() {}`
//! 3. `const {div} = React.DOM` in render helpers is removed
//! 4. `React.DOM.div(props, ...)`        -> `React.createElement('div', props, ...)`
//! 5. `React.createElement('div', ...)`  -> `<div ...>...</div>`
//!
//! Each pass only looks at the tree left by the previous one.

use swc_core::ecma::ast::Program;
use tracing::debug;

use crate::comments::CommentStore;
use crate::config::TransformConfig;
use crate::error::Result;

mod create_element;
mod factory_destructure;
mod jsx;
mod prefix_factories;
mod render_params;

pub use create_element::qualify_to_create_element;
pub use factory_destructure::remove_factory_destructures;
pub use jsx::{convert_create_calls, AttributeConversion, Converted, JsxConverter};
pub use prefix_factories::prefix_factory_calls;
pub use render_params::strip_render_params;

/// Rewrite counts for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub prefixed_calls: usize,
    pub stripped_render_params: usize,
    pub removed_destructures: usize,
    pub qualified_calls: usize,
    pub jsx_elements: usize,
    /// Create calls left alone because their tag cannot be written as JSX.
    /// Not a rewrite.
    pub skipped_create_calls: usize,
}

impl PassReport {
    pub fn rewrites(&self) -> usize {
        self.prefixed_calls
            + self.stripped_render_params
            + self.removed_destructures
            + self.qualified_calls
            + self.jsx_elements
    }

    pub fn is_noop(&self) -> bool {
        self.rewrites() == 0
    }
}

/// Runs all five passes over `program`. Stops at the first fatal error; the
/// tree is then in an unspecified state and must not be printed.
pub fn run_pipeline(
    program: &mut Program,
    comments: &CommentStore,
    config: &TransformConfig,
) -> Result<PassReport> {
    let mut report = PassReport {
        prefixed_calls: prefix_factory_calls(program, config),
        ..Default::default()
    };
    debug!(count = report.prefixed_calls, "prefixed factory calls");

    report.stripped_render_params = strip_render_params(program, config)?;
    debug!(count = report.stripped_render_params, "stripped render params");

    report.removed_destructures = remove_factory_destructures(program, config);
    debug!(count = report.removed_destructures, "removed factory destructures");

    report.qualified_calls = qualify_to_create_element(program, config);
    debug!(count = report.qualified_calls, "rewrote qualified factory calls");

    let (converted, skipped) = convert_create_calls(program, comments, config)?;
    report.jsx_elements = converted;
    report.skipped_create_calls = skipped;
    debug!(converted, skipped, "converted create calls to JSX");

    Ok(report)
}

#[cfg(test)]
pub(crate) mod test_util {
    use swc_core::common::GLOBALS;

    use crate::syntax::ParsedFile;

    /// Parses `src`, applies `pass`, and prints the result.
    pub fn apply<T>(src: &str, pass: impl FnOnce(&mut ParsedFile) -> T) -> (String, T) {
        GLOBALS.set(&Default::default(), || {
            let mut file = ParsedFile::parse("test.js", src).expect("fixture parses");
            let out = pass(&mut file);
            (file.print().expect("prints"), out)
        })
    }

    /// Drops line breaks and indentation so JSX can be compared on one line.
    pub fn squash(code: &str) -> String {
        code.lines().map(str::trim).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_util::{apply, squash};

    #[test]
    fn full_pipeline_turns_factories_into_jsx() {
        let config = TransformConfig::default();
        let src = r#"
module.exports = {
  render({div, span}) {
    const {a} = React.DOM;
    return div({className: 'box'}, span(null, 'Hi'), a({href: url}));
  }
};
"#;
        let (out, report) = apply(src, |f| run_pipeline(&mut f.program, &f.comments, &config).unwrap());
        let flat = squash(&out);
        assert!(flat.contains(r#"<div className="box"><span>Hi</span><a href={url}"#), "{out}");
        assert!(flat.contains("/></div>"), "{out}");
        assert!(!out.contains("React"), "{out}");
        assert!(!out.contains("span }"), "{out}");
        assert_eq!(report.prefixed_calls, 3);
        assert_eq!(report.stripped_render_params, 1);
        assert_eq!(report.removed_destructures, 1);
        assert_eq!(report.qualified_calls, 3);
        assert_eq!(report.jsx_elements, 3);
        assert_eq!(report.skipped_create_calls, 0);
    }

    #[test]
    fn fatal_render_error_stops_the_pipeline() {
        let config = TransformConfig::default();
        let (_, result) = apply("({ render(a, b) { return div(); } });", |f| {
            run_pipeline(&mut f.program, &f.comments, &config)
        });
        assert!(result.is_err());
    }

    #[test]
    fn report_noop() {
        assert!(PassReport::default().is_noop());
        let skipped_only = PassReport {
            skipped_create_calls: 2,
            ..Default::default()
        };
        assert!(skipped_only.is_noop());
        let converted = PassReport {
            jsx_elements: 1,
            ..Default::default()
        };
        assert_eq!(converted.rewrites(), 1);
    }
}
