use crate::error::Result;

/// One record as returned by the remote service: a JSON object keyed by
/// field name. Selection records carry at least `id`, `os`, `release`,
/// `arches`, `subarches` and `labels`.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Failure reported by the remote side of the boot-source-selection
/// resource. The bindings never translate, wrap or retry these; they reach
/// the caller as-is inside [`crate::Error::Remote`].
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// No record at the requested `(boot_source_id, id)`.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The remote service rejected the request as conflicting with existing
    /// state.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// The request never completed: connection, timeout or protocol
    /// breakage in the transport underneath the handler.
    #[error("Transport failure: {0}")]
    Transport(String),
    /// Any other remote rejection, carrying the service status code.
    #[error("Service error (status {0}): {1}")]
    Service(u16, String),
}

/// Contract this binding requires from the injected remote handler for the
/// boot-source-selection resource.
///
/// Implementations own the transport: endpoints, authentication, timeouts
/// and retries all live behind this trait. Calls block until the remote
/// service answers or fails. The bindings validate their arguments before
/// invoking any of these methods, so implementations may assume a positive
/// `boot_source_id`.
pub trait SelectionsHandler {
    /// Create a selection under `boot_source_id` and return the stored
    /// record, including its server-assigned `id`.
    fn create(
        &self,
        boot_source_id: i64,
        os: &str,
        release: &str,
        arches: &[String],
        subarches: &[String],
        labels: &[String],
    ) -> Result<Record, HandlerError>;

    /// List every selection record under `boot_source_id`, in server order.
    fn read(&self, boot_source_id: i64) -> Result<Vec<Record>, HandlerError>;

    /// Fetch the single record at `(boot_source_id, id)`.
    fn read_one(&self, boot_source_id: i64, id: i64) -> Result<Record, HandlerError>;

    /// Delete the record at `(boot_source_id, id)`.
    fn delete(&self, boot_source_id: i64, id: i64) -> Result<(), HandlerError>;
}
