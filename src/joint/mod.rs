/*! The closed set of joint kinds: one model type and one companion data type per kind.
 *
 * A model holds the static description of a joint (its axis, for instance) while the data is the
 * workspace an algorithm writes into (placement and velocity of the joint frame). Both are tied
 * together at the type level by [JointModel::Data].
 */

use core::fmt;

use nalgebra::{Isometry3, Matrix3, Quaternion, Translation3, UnitQuaternion, Vector3, Vector6};

use crate::{JointDataVariant, JointError, JointModelVariant};

/// Declares the data of a live kind: placement and velocity of the joint frame, identity and zero
/// by default, retrieved from the `$variant` alternative of a [JointDataVariant].
macro_rules! live_data {
    ($(#[$meta:meta])* $data:ident => $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $data {
            placement: nalgebra::Isometry3<f64>,
            velocity: nalgebra::Vector6<f64>,
        }

        impl Default for $data {
            fn default() -> Self {
                Self {
                    placement: nalgebra::Isometry3::identity(),
                    velocity: nalgebra::Vector6::zeros(),
                }
            }
        }

        impl $crate::JointData for $data {
            fn placement(&self) -> &nalgebra::Isometry3<f64> {
                &self.placement
            }

            fn velocity(&self) -> &nalgebra::Vector6<f64> {
                &self.velocity
            }

            fn get(data: &$crate::JointDataVariant) -> Option<&Self> {
                match data {
                    $crate::JointDataVariant::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn get_mut(data: &mut $crate::JointDataVariant) -> Option<&mut Self> {
                match data {
                    $crate::JointDataVariant::$variant(data) => Some(data),
                    _ => None,
                }
            }
        }
    };
}

pub mod free_flyer;
pub mod prismatic;
pub mod revolute;
pub mod spherical;
pub mod void;

pub use free_flyer::{JointDataFreeFlyer, JointModelFreeFlyer};
pub use prismatic::{JointDataPrismatic, JointModelPrismatic};
pub use revolute::{JointDataRevolute, JointModelRevolute};
pub use spherical::{JointDataSpherical, JointModelSpherical};
pub use void::{JointDataVoid, JointModelVoid};

/// Tag of a joint kind. The order matches the alternatives of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    Revolute,
    Prismatic,
    Spherical,
    FreeFlyer,
    Void,
}

impl JointKind {
    /// All kinds, void last.
    pub const ALL: [JointKind; 5] = [
        JointKind::Revolute,
        JointKind::Prismatic,
        JointKind::Spherical,
        JointKind::FreeFlyer,
        JointKind::Void,
    ];

    pub fn shortname(&self) -> &'static str {
        match self {
            JointKind::Revolute => "Revolute",
            JointKind::Prismatic => "Prismatic",
            JointKind::Spherical => "Spherical",
            JointKind::FreeFlyer => "FreeFlyer",
            JointKind::Void => "Void",
        }
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shortname())
    }
}

/// Static description of a joint of one concrete kind.
///
/// Every implementor names its companion data type. This is what lets the dispatcher hand an
/// algorithm the correctly typed data for the model it resolved.
pub trait JointModel: fmt::Debug + Clone + PartialEq + Into<JointModelVariant> {
    /// The data type bound to this model
    type Data: JointData;

    const KIND: JointKind;
    /// Size of the configuration vector
    const NQ: usize;
    /// Size of the velocity (tangent) vector
    const NV: usize;

    fn nq(&self) -> usize {
        Self::NQ
    }

    fn nv(&self) -> usize {
        Self::NV
    }

    fn shortname(&self) -> &'static str {
        Self::KIND.shortname()
    }

    /// Allocates a fresh workspace for this model (identity placement, zero velocity).
    fn create_data(&self) -> Self::Data;

    /// Writes the neutral configuration into `q`.
    ///
    /// # Panics
    /// If `q.len()` differs from [JointModel::nq]. [crate::Joint::neutral] checks the size first and
    /// reports it as [JointError::ConfigurationSize] instead.
    fn neutral(&self, q: &mut [f64]);

    /// Computes the placement of the joint frame for the configuration `q`.
    fn calc(&self, data: &mut Self::Data, q: &[f64]) -> Result<(), JointError>;

    /// Computes placement and the joint velocity `[linear; angular]` for `q` and `v`.
    fn calc_velocity(&self, data: &mut Self::Data, q: &[f64], v: &[f64]) -> Result<(), JointError>;

    /// Integrates the configuration `q` along `v` for a unit time step and writes it into `q_out`.
    fn integrate(&self, q: &[f64], v: &[f64], q_out: &mut [f64]) -> Result<(), JointError>;
}

/// Workspace of a joint of one concrete kind.
///
/// Also the retrieval of this alternative out of a [JointDataVariant] (see [crate::variant]).
pub trait JointData: fmt::Debug + Clone + PartialEq + Into<JointDataVariant> {
    fn placement(&self) -> &Isometry3<f64>;

    /// Velocity of the joint frame, linear part first.
    fn velocity(&self) -> &Vector6<f64>;

    /// Borrows this alternative, `None` if `data` holds another kind.
    fn get(data: &JointDataVariant) -> Option<&Self>;

    /// Mutably borrows this alternative, `None` if `data` holds another kind.
    fn get_mut(data: &mut JointDataVariant) -> Option<&mut Self>;
}

pub(crate) fn configuration<const N: usize>(kind: JointKind, q: &[f64]) -> Result<&[f64; N], JointError> {
    let found = q.len();
    q.try_into().map_err(|_| JointError::ConfigurationSize {
        kind,
        expected: N,
        found,
    })
}

pub(crate) fn configuration_mut<const N: usize>(kind: JointKind, q: &mut [f64]) -> Result<&mut [f64; N], JointError> {
    let found = q.len();
    q.try_into().map_err(|_| JointError::ConfigurationSize {
        kind,
        expected: N,
        found,
    })
}

pub(crate) fn velocity<const N: usize>(kind: JointKind, v: &[f64]) -> Result<&[f64; N], JointError> {
    let found = v.len();
    v.try_into().map_err(|_| JointError::VelocitySize {
        kind,
        expected: N,
        found,
    })
}

/// Reads a quaternion stored as `[x, y, z, w]`.
pub(crate) fn unit_quaternion(kind: JointKind, xyzw: &[f64; 4]) -> Result<UnitQuaternion<f64>, JointError> {
    let [x, y, z, w] = *xyzw;
    let quaternion = Quaternion::new(w, x, y, z);
    if quaternion.norm() < f64::EPSILON {
        return Err(JointError::DegenerateQuaternion { kind });
    }
    Ok(UnitQuaternion::from_quaternion(quaternion))
}

/// Stores a quaternion as `[x, y, z, w]`.
pub(crate) fn store_quaternion(rotation: &UnitQuaternion<f64>, xyzw: &mut [f64]) {
    let coords = rotation.coords;
    xyzw.copy_from_slice(&[coords.x, coords.y, coords.z, coords.w]);
}

/// Exponential map of a twist `[linear; angular]` onto a rigid transformation.
pub(crate) fn exp6(twist: &Vector6<f64>) -> Isometry3<f64> {
    let linear = Vector3::new(twist[0], twist[1], twist[2]);
    let angular = Vector3::new(twist[3], twist[4], twist[5]);
    let theta = angular.norm();
    let skew = angular.cross_matrix();

    // Left Jacobian of SO(3); second order expansion close to zero rotation
    let jacobian = if theta < 1e-8 {
        Matrix3::identity() + skew * 0.5 + skew * skew / 6.0
    } else {
        let theta2 = theta * theta;
        Matrix3::identity()
            + skew * ((1.0 - theta.cos()) / theta2)
            + skew * skew * ((theta - theta.sin()) / (theta2 * theta))
    };

    Isometry3::from_parts(
        Translation3::from(jacobian * linear),
        UnitQuaternion::from_scaled_axis(angular),
    )
}
