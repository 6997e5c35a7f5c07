//! Codemod engine that migrates legacy `React.DOM` factory calls to JSX.
//!
//! A file goes through five rewrite passes on a single parsed tree
//! (see [`passes`]):
//!
//! ```text
//! render({div}) { return div({className: 'a'}, 'hi'); }
//!   -> render() { return <div className="a">hi</div>; }
//! ```
//!
//! Each file is all-or-nothing: a fatal error in any pass discards the tree
//! and nothing is written. A file no pass matched comes back byte-for-byte.

use swc_core::common::{Globals, GLOBALS};
use tracing::debug;

pub mod comments;
pub mod config;
pub mod driver;
pub mod error;
pub mod matchers;
pub mod migrate;
pub mod passes;
pub mod syntax;
mod tracing_config;

pub use config::{FactoryRegistry, TransformConfig};
pub use error::{Result, TransformError};
pub use passes::PassReport;
pub use tracing_config::init_tracing;

use syntax::ParsedFile;

/// Text of one transformed file and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    pub report: PassReport,
}

impl TransformOutput {
    pub fn changed(&self) -> bool {
        !self.report.is_noop()
    }
}

/// Runs the full pipeline over one file's source text.
///
/// `file_name` is only used in diagnostics.
pub fn transform_source(file_name: &str, source: &str, config: &TransformConfig) -> Result<TransformOutput> {
    GLOBALS.set(&Globals::new(), || {
        let mut file = ParsedFile::parse(file_name, source)?;
        let report = passes::run_pipeline(&mut file.program, &file.comments, config)?;

        if report.is_noop() {
            debug!(file = file_name, "no legacy factory calls");
            return Ok(TransformOutput {
                code: source.to_string(),
                report,
            });
        }

        Ok(TransformOutput {
            code: file.print()?,
            report,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_source_is_returned_verbatim() {
        let src = "// header\nconst  x = {render: () => null} ;\n";
        let out = transform_source("a.js", src, &TransformConfig::default()).unwrap();
        assert!(!out.changed());
        assert_eq!(out.code, src);
    }

    #[test]
    fn dynamic_tags_alone_do_not_count_as_changes() {
        let src = "React.createElement(tag,   null);\n";
        let out = transform_source("a.js", src, &TransformConfig::default()).unwrap();
        assert_eq!(out.report.skipped_create_calls, 1);
        assert_eq!(out.code, src);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let err = transform_source("bad.js", "div(", &TransformConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("bad.js:1:"), "{err}");
    }
}
