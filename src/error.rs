use crate::handler::HandlerError;

/// Errors surfaced by the selection bindings.
///
/// The first three variants are raised locally, before anything is sent to
/// the remote service. `Remote` carries whatever the handler reported,
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument was rejected before issuing a remote call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A record field or assigned value did not match the field's declared
    /// semantic type.
    #[error("Field `{field}`: {reason}")]
    TypeValidation {
        field: &'static str,
        reason: String,
    },
    /// Write attempt on a field that is fixed at construction time.
    #[error("Field `{0}` is read-only")]
    Immutable(&'static str),
    /// Failure reported by the remote service, propagated unchanged.
    #[error(transparent)]
    Remote(#[from] HandlerError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
