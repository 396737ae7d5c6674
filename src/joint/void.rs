//! Placeholder alternative standing for "no joint" (e.g., an unused slot).
//!
//! Neither type implements [super::JointModel]: the dispatcher never hands them to an algorithm.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JointModelVoid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JointDataVoid;
