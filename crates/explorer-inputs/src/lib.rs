use explorer_parse::{Parse, ParseOptions};
use explorer_syntax::SyntaxTree;
pub use line_index::LineIndex;

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }

    #[salsa::tracked(returns(ref))]
    pub fn parse(self, db: &dyn salsa::Database) -> Parse {
        explorer_parse::parse(self.text(db))
    }

    /// The parsed tree with operator sequences folded.
    #[salsa::tracked(returns(ref))]
    pub fn folded(self, db: &dyn salsa::Database) -> SyntaxTree {
        explorer_parse::fold(&self.parse(db).tree)
    }
}

impl File {
    /// Returns the tree selected by `options`.
    pub fn tree(self, db: &dyn salsa::Database, options: ParseOptions) -> &SyntaxTree {
        if options.fold { self.folded(db) } else { &self.parse(db).tree }
    }
}

#[cfg(test)]
mod tests {
    use salsa::{DatabaseImpl, Setter as _};

    use super::*;

    #[test]
    fn parse_follows_text_changes() {
        let mut db = DatabaseImpl::new();
        let file = File::new(&db, "main.swift".into(), "let a = 1 + 2\n".to_owned());

        assert!(file.parse(&db).diagnostics.is_empty());
        assert_eq!(file.tree(&db, ParseOptions::default()).text(), "let a = 1 + 2\n");
        assert_ne!(file.tree(&db, ParseOptions { fold: true }), &file.parse(&db).tree);

        file.set_text(&mut db).to("let = 1\n".to_owned());
        assert_eq!(file.parse(&db).diagnostics.len(), 1);
        let position = file.line_index(&db).line_col(4.into());
        assert_eq!((position.line, position.col), (0, 4));
    }
}
