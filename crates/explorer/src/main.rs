mod input;

use std::io::Write as _;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use explorer_errors::Renderer;
use explorer_inputs::File;
use explorer_parse::ParseOptions;
use explorer_serialize::{LocationConverter, SerializeOptions, SyntaxResponse};
use input::Source;
use salsa::DatabaseImpl;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Prints the syntax tree of a source file as HTML spans and JSON records.
#[derive(Parser)]
#[command(version)]
struct Options {
    /// Source file, or `-` for standard input.
    path: Option<Utf8PathBuf>,
    /// Source text to use instead of a file.
    #[arg(long, conflicts_with = "path")]
    code: Option<String>,
    /// Fold operator sequences by precedence before rendering.
    #[arg(long)]
    fold: bool,
    /// Render tokens inserted by error recovery.
    #[arg(long)]
    show_missing: bool,
    /// Comma-separated option words (`fold`, `showmissing`).
    #[arg(long, value_delimiter = ',')]
    options: Vec<String>,
    /// Largest accepted input, in bytes.
    #[arg(long, default_value_t = 64 * 1024)]
    max_size: usize,
    #[arg(long)]
    pretty: bool,
    /// Print parse diagnostics to stderr.
    #[arg(long)]
    diagnostics: bool,
}

impl Options {
    fn source(&mut self) -> Source {
        if let Some(code) = self.code.take() {
            return Source::Inline(code);
        }
        match self.path.take() {
            Some(path) if path != "-" => Source::Path(path),
            _ => Source::Stdin,
        }
    }

    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::from_words(self.options.iter().map(String::as_str));
        options.fold |= self.fold;
        options
    }

    fn serialize_options(&self) -> SerializeOptions {
        let mut options = SerializeOptions::from_words(self.options.iter().map(String::as_str));
        options.show_missing_tokens |= self.show_missing;
        options
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut options = Options::parse();
    let (path, text) = input::read(options.source(), options.max_size)?;

    let db = DatabaseImpl::default();
    let file = File::new(&db, path, text);
    let path = file.path(&db).as_str();
    let text = file.text(&db);

    if options.diagnostics {
        let renderer = Renderer::styled();
        for diagnostic in &file.parse(&db).diagnostics {
            eprintln!("{}", diagnostic.render(&renderer, path, text));
        }
    }

    let tree = file.tree(&db, options.parse_options());
    let converter = LocationConverter::new(text, file.line_index(&db));
    let response = SyntaxResponse::new(tree, &converter, &options.serialize_options())
        .with_context(|| format!("failed to encode the syntax tree of `{path}`"))?;

    let mut stdout = std::io::stdout().lock();
    if options.pretty {
        serde_json::to_writer_pretty(&mut stdout, &response)
    } else {
        serde_json::to_writer(&mut stdout, &response)
    }
    .context("failed to write the response")?;
    writeln!(stdout)?;

    Ok(())
}
