//! The client-facing error document.

use serde::Serialize;

use crate::aggregate::FieldErrors;
use crate::kind::{Kind, ResponseTemplates};

/// RFC 7807-style problem document.
///
/// Built once per failed request and handed to the response sink; the sink
/// owns byte-level serialization onto the wire, this type only fixes the
/// structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDocument {
    pub status: u16,
    pub title: &'static str,
    pub detail: &'static str,
    /// The request path the failure occurred on.
    pub instance: String,
    /// Extension members, flattened to top-level JSON keys. `None` for every
    /// kind except `ValidationFailed`.
    #[serde(flatten)]
    pub extensions: Option<DocumentExtensions>,
}

/// Extension members of the problem document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentExtensions {
    /// Field name -> messages, in first-appearance order.
    pub errors: FieldErrors,
}

/// Build the document for a classified failure.
///
/// The template lookup is the only variability: status, title and detail
/// come verbatim from `templates`, `instance` is always the request path.
///
/// # Panics
///
/// Panics if `kind` is [`Kind::Unclassified`] (the pipeline adapter must
/// intercept that case before building), or if `kind` is
/// [`Kind::ValidationFailed`] and `fields` is `None`. An empty mapping is
/// valid; a missing one is a caller bug.
pub fn build(
    templates: &ResponseTemplates,
    kind: Kind,
    instance: impl Into<String>,
    fields: Option<FieldErrors>,
) -> ErrorDocument {
    let template = templates
        .lookup(kind)
        .unwrap_or_else(|| panic!("no response template for {kind:?}"));

    let extensions = match kind {
        Kind::ValidationFailed => {
            let errors = fields.expect("validation document built without aggregated fields");
            Some(DocumentExtensions { errors })
        }
        _ => None,
    };

    ErrorDocument {
        status: template.status,
        title: template.title,
        detail: template.detail,
        instance: instance.into(),
        extensions,
    }
}
