//! Response sink boundary.

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::document::ErrorDocument;

/// Writes a finished [`ErrorDocument`] to the client.
///
/// Implemented by the transport layer, which owns status-line and body
/// serialization. The write may suspend and must observe the context's
/// cancellation signal: a cancelled write comes back as an error, never as
/// a silently dropped response. Errors (including cancellation) are
/// surfaced by the pipeline adapter unchanged; nothing in this layer
/// retries.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn write(
        &self,
        context: &RequestContext,
        document: &ErrorDocument,
    ) -> Result<(), Self::Error>;
}
