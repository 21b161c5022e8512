use thiserror::Error;

/// Everything the library can fail with.
///
/// Inference itself never fails on data: missing fields, nulls and mixed shapes are
/// absorbed into the type model. Only integration problems surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("inference needs at least one sample")]
    NoSamples,

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("document has no root element")]
    NoRootElement,

    #[error("document has more than one root element (second one is <{0}>)")]
    MultipleRoots(String),

    #[error("input ended inside <{0}>")]
    UnclosedElement(String),

    #[error("invalid schema document at {path}: {message}")]
    SchemaDocument { path: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
