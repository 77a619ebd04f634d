use std::io::Read as _;

use camino::{Utf8Path, Utf8PathBuf};

#[derive(Debug, thiserror::Error)]
pub(crate) enum InputError {
    #[error("payload too large: {len} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { len: usize, limit: usize },
    #[error("failed to read `{path}`")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the source text comes from.
pub(crate) enum Source {
    Path(Utf8PathBuf),
    Stdin,
    Inline(String),
}

impl Source {
    fn name(&self) -> &Utf8Path {
        match self {
            Self::Path(path) => path,
            Self::Stdin => Utf8Path::new("<stdin>"),
            Self::Inline(_) => Utf8Path::new("<code>"),
        }
    }
}

/// Reads the source text, rejecting anything longer than `limit` bytes
/// before it is parsed.
pub(crate) fn read(source: Source, limit: usize) -> Result<(Utf8PathBuf, String), InputError> {
    let name = source.name().to_owned();
    let read_error = |source| InputError::Read { path: name.clone(), source };

    let text = match source {
        Source::Inline(text) => text,
        Source::Path(path) => {
            let len = std::fs::metadata(&path).map_err(read_error)?.len();
            check_size(usize::try_from(len).unwrap_or(usize::MAX), limit)?;
            std::fs::read_to_string(&path).map_err(read_error)?
        }
        Source::Stdin => {
            let mut text = String::new();
            let take = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
            std::io::stdin().lock().take(take).read_to_string(&mut text).map_err(read_error)?;
            text
        }
    };

    check_size(text.len(), limit)?;
    log::debug!("read {} bytes from `{name}`", text.len());
    Ok((name, text))
}

fn check_size(len: usize, limit: usize) -> Result<(), InputError> {
    if len > limit {
        return Err(InputError::PayloadTooLarge { len, limit });
    }
    Ok(())
}
