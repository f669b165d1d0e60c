use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LabelError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a font file
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// A configuration file could not be read as JSON
    Json(#[from] serde_json::Error),

    #[error("unknown standard font `{0}`")]
    /// A font was requested by a name that isn't one of the built-in PDF fonts
    UnknownFont(String),

    #[error("font #{0} is not registered with the document")]
    /// A text run referred to a font the document doesn't hold
    FontMissing(usize),

    #[error("font `{0}` has no character map")]
    /// A TrueType face can't map characters to glyphs, so it can't measure text
    FontWithoutCmap(String),

    #[error("invalid layout configuration: {0}")]
    /// The layout configuration describes impossible geometry
    InvalidConfig(String),
}
