use crate::schema::{MethodRef, ServiceRef, StreamingShape};

/// What the adapter does with a method.
///
/// The streaming shape keeps all four variants; code generation only cares
/// whether the adapter can forward the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Forward to a stored `UnaryHandler`.
    Unary,
    /// Reject with `codes.Unimplemented`; the adapter has no streaming transport.
    Unsupported,
}

impl From<StreamingShape> for Dispatch {
    fn from(shape: StreamingShape) -> Self {
        match shape {
            StreamingShape::Unary => Dispatch::Unary,
            StreamingShape::ClientStreaming
            | StreamingShape::ServerStreaming
            | StreamingShape::Bidirectional => Dispatch::Unsupported,
        }
    }
}

pub fn dispatch(method: &MethodRef<'_>) -> Dispatch {
    Dispatch::from(method.streaming)
}

pub fn is_unary_method(method: &MethodRef<'_>) -> bool {
    dispatch(method) == Dispatch::Unary
}

/// A service's own deprecation flag; the file's flag is not inherited.
pub fn is_deprecated_service(service: &ServiceRef<'_>) -> bool {
    service.deprecated
}

/// A method's own deprecation flag. The emitter also marks methods of a deprecated service.
pub fn is_deprecated_method(method: &MethodRef<'_>) -> bool {
    method.deprecated
}
