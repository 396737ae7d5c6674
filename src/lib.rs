//! ## About
//!
//! This crate lets algorithms on the joints of an articulated body (a robot, a skeleton) be
//! written once, generically over the concrete joint kind, and be called on joints whose kind is
//! only known at run time. Joints of all kinds are stored as a [JointModelVariant] (static
//! description) and a [JointDataVariant] (workspace); the dispatcher in [visitor] resolves the
//! active kind with a single `match` and calls the algorithm instantiated for that kind. There is
//! no heap allocation and no virtual call involved.
//!
//! See [JointVisitor] and [JointDataVisitor] to get started, and [algorithms] for examples.
//!
//! ```
//! use joint_dispatch::{Joint, JointModel, JointModelVariant, JointVisitor, NoArg};
//! use joint_dispatch::joint::{JointModelRevolute, JointModelSpherical};
//!
//! struct DegreesOfFreedom;
//!
//! impl JointVisitor for DegreesOfFreedom {
//!     type Output = usize;
//!
//!     fn algo<J: JointModel>(model: &J, _: NoArg) -> usize {
//!         model.nv()
//!     }
//! }
//!
//! let model = JointModelVariant::from(JointModelSpherical);
//! assert_eq!(model.run::<DegreesOfFreedom>(), 3);
//!
//! let mut joint = Joint::new(JointModelRevolute::z());
//! joint.calc(&[1.0]).unwrap();
//! ```
//!
//! ## Naming conventions
//! * Traits – capabilities (`JointModel`, `JointVisitor`)
//! * Structs – `JointModel<Kind>` and `JointData<Kind>` for the two halves of a joint kind;
//!   algorithms are unit structs named after what they compute
//! * Methods – imperative forms with the exception of getters, which omit a `get_` prefix much
//!   like the standard library.
//!
//! ## Features
//! * `rayon` (default) – parallel dispatch over many joints, see [batch::par_run_data_each]

pub mod algorithms;
pub mod batch;
pub mod errors;
pub mod joint;
pub mod variant;
pub mod visitor;

pub use errors::JointError;
pub use joint::{JointData, JointKind, JointModel};
pub use variant::{Joint, JointDataVariant, JointModelVariant};
pub use visitor::{ExtraArgs, JointDataVisitor, JointModelExt, JointVisitor, NoArg};
