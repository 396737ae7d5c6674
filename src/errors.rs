//! Provides the error type returned by the kind algorithms of this crate.
//!
//! Misuse of the dispatcher itself (pairing violations, dispatching the void joint
//! with a value-returning algorithm) is not reported here: it panics.

use thiserror::Error;

use crate::JointKind;

/// Errors raised by the algorithms of a concrete joint kind. The dispatcher
/// forwards them untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JointError {
    #[error("{kind} joint expects a configuration of size {expected}, got {found}")]
    ConfigurationSize {
        kind: JointKind,
        expected: usize,
        found: usize,
    },
    #[error("{kind} joint expects a velocity of size {expected}, got {found}")]
    VelocitySize {
        kind: JointKind,
        expected: usize,
        found: usize,
    },
    #[error("{kind} joint received a quaternion with (almost) zero norm")]
    DegenerateQuaternion { kind: JointKind },
}
