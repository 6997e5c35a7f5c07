use swc_core::{
    common::{sync::Lrc, FileName, SourceMap, Spanned},
    ecma::{
        ast::{EsVersion, Program},
        codegen::{text_writer::JsWriter, Config, Emitter},
        parser::{EsSyntax, Parser, StringInput, Syntax},
    },
};

use crate::comments::CommentStore;
use crate::error::{Result, TransformError};

/// One file's syntax tree together with the source map and comment table it
/// was parsed with. Created by [`ParsedFile::parse`], mutated by the passes,
/// consumed by [`ParsedFile::print`].
pub struct ParsedFile {
    pub program: Program,
    pub comments: CommentStore,
    cm: Lrc<SourceMap>,
}

fn syntax() -> Syntax {
    Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
    })
}

impl ParsedFile {
    /// Parses `source` as an ES module or script with JSX enabled.
    ///
    /// Recoverable parser errors are treated as fatal: a file the parser had
    /// to guess about is not safe to rewrite.
    pub fn parse(file_name: &str, source: &str) -> Result<Self> {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(
            FileName::Custom(file_name.to_string()).into(),
            source.to_owned(),
        );
        let comments = CommentStore::new();

        let mut parser = Parser::new(syntax(), StringInput::from(&*fm), Some(comments.inner()));
        let parsed = parser.parse_program();
        let first_error = match parsed {
            Ok(program) => match parser.take_errors().into_iter().next() {
                None => return Ok(Self { program, comments, cm }),
                Some(e) => e,
            },
            Err(e) => e,
        };

        let loc = cm.lookup_char_pos(first_error.span().lo);
        Err(TransformError::Parse {
            file: file_name.to_string(),
            line: loc.line,
            column: loc.col_display + 1,
            message: first_error.into_kind().msg().to_string(),
        })
    }

    /// Serializes the tree, emitting whatever comments are still attached to
    /// printed positions.
    pub fn print(&self) -> Result<String> {
        let mut buf = vec![];
        {
            let mut emitter = Emitter {
                cfg: Config::default().with_target(EsVersion::latest()),
                cm: self.cm.clone(),
                comments: Some(self.comments.inner()),
                wr: JsWriter::new(self.cm.clone(), "\n", &mut buf, None),
            };
            emitter.emit_program(&self.program)?;
        }
        Ok(String::from_utf8(buf)?)
    }
}
