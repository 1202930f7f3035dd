use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("invalid page spec: {0}")]
    InvalidSpec(String),

    #[error("page spec matched no pages")]
    EmptySelection,

    #[error("incremental save failed: {0}")]
    Save(#[from] io::Error),
}
