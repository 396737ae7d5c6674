/*! Tagged unions over the closed set of joint kinds.
 *
 * [JointModelVariant] and [JointDataVariant] share the same alternatives in the same order. A
 * model variant and the data variant created from it always hold the same kind; [Joint] couples
 * the two so that a mismatch cannot be built at all.
 */

use nalgebra::{Isometry3, Vector6};

use crate::joint::{
    JointData, JointDataFreeFlyer, JointDataPrismatic, JointDataRevolute, JointDataSpherical, JointDataVoid,
    JointKind, JointModel, JointModelFreeFlyer, JointModelPrismatic, JointModelRevolute, JointModelSpherical,
    JointModelVoid,
};

/// A joint model of any kind, resolved at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum JointModelVariant {
    Revolute(JointModelRevolute),
    Prismatic(JointModelPrismatic),
    Spherical(JointModelSpherical),
    FreeFlyer(JointModelFreeFlyer),
    Void(JointModelVoid),
}

/// A joint data of any kind, companion of a [JointModelVariant].
#[derive(Debug, Clone, PartialEq)]
pub enum JointDataVariant {
    Revolute(JointDataRevolute),
    Prismatic(JointDataPrismatic),
    Spherical(JointDataSpherical),
    FreeFlyer(JointDataFreeFlyer),
    Void(JointDataVoid),
}

impl Default for JointModelVariant {
    fn default() -> Self {
        JointModelVariant::Void(JointModelVoid)
    }
}

impl Default for JointDataVariant {
    fn default() -> Self {
        JointDataVariant::Void(JointDataVoid)
    }
}

macro_rules! alternative {
    ($variant:ident, $model:ty, $data:ty) => {
        impl From<$model> for JointModelVariant {
            fn from(model: $model) -> Self {
                JointModelVariant::$variant(model)
            }
        }

        impl From<$data> for JointDataVariant {
            fn from(data: $data) -> Self {
                JointDataVariant::$variant(data)
            }
        }
    };
}

alternative!(Revolute, JointModelRevolute, JointDataRevolute);
alternative!(Prismatic, JointModelPrismatic, JointDataPrismatic);
alternative!(Spherical, JointModelSpherical, JointDataSpherical);
alternative!(FreeFlyer, JointModelFreeFlyer, JointDataFreeFlyer);
alternative!(Void, JointModelVoid, JointDataVoid);

impl JointModelVariant {
    /// The active alternative
    pub fn kind(&self) -> JointKind {
        match self {
            JointModelVariant::Revolute(_) => JointKind::Revolute,
            JointModelVariant::Prismatic(_) => JointKind::Prismatic,
            JointModelVariant::Spherical(_) => JointKind::Spherical,
            JointModelVariant::FreeFlyer(_) => JointKind::FreeFlyer,
            JointModelVariant::Void(_) => JointKind::Void,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JointModelVariant::Void(_))
    }

    pub fn nq(&self) -> usize {
        match self {
            JointModelVariant::Revolute(model) => model.nq(),
            JointModelVariant::Prismatic(model) => model.nq(),
            JointModelVariant::Spherical(model) => model.nq(),
            JointModelVariant::FreeFlyer(model) => model.nq(),
            JointModelVariant::Void(_) => 0,
        }
    }

    pub fn nv(&self) -> usize {
        match self {
            JointModelVariant::Revolute(model) => model.nv(),
            JointModelVariant::Prismatic(model) => model.nv(),
            JointModelVariant::Spherical(model) => model.nv(),
            JointModelVariant::FreeFlyer(model) => model.nv(),
            JointModelVariant::Void(_) => 0,
        }
    }

    pub fn shortname(&self) -> &'static str {
        self.kind().shortname()
    }

    /// Creates the data paired with this model. The void model yields void data.
    pub fn create_data(&self) -> JointDataVariant {
        match self {
            JointModelVariant::Revolute(model) => model.create_data().into(),
            JointModelVariant::Prismatic(model) => model.create_data().into(),
            JointModelVariant::Spherical(model) => model.create_data().into(),
            JointModelVariant::FreeFlyer(model) => model.create_data().into(),
            JointModelVariant::Void(_) => JointDataVoid.into(),
        }
    }
}

impl JointDataVariant {
    /// The active alternative
    pub fn kind(&self) -> JointKind {
        match self {
            JointDataVariant::Revolute(_) => JointKind::Revolute,
            JointDataVariant::Prismatic(_) => JointKind::Prismatic,
            JointDataVariant::Spherical(_) => JointKind::Spherical,
            JointDataVariant::FreeFlyer(_) => JointKind::FreeFlyer,
            JointDataVariant::Void(_) => JointKind::Void,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JointDataVariant::Void(_))
    }

    /// Placement of the joint frame, `None` for the void alternative.
    pub fn placement(&self) -> Option<&Isometry3<f64>> {
        match self {
            JointDataVariant::Revolute(data) => Some(data.placement()),
            JointDataVariant::Prismatic(data) => Some(data.placement()),
            JointDataVariant::Spherical(data) => Some(data.placement()),
            JointDataVariant::FreeFlyer(data) => Some(data.placement()),
            JointDataVariant::Void(_) => None,
        }
    }

    /// Velocity of the joint frame, `None` for the void alternative.
    pub fn velocity(&self) -> Option<&Vector6<f64>> {
        match self {
            JointDataVariant::Revolute(data) => Some(data.velocity()),
            JointDataVariant::Prismatic(data) => Some(data.velocity()),
            JointDataVariant::Spherical(data) => Some(data.velocity()),
            JointDataVariant::FreeFlyer(data) => Some(data.velocity()),
            JointDataVariant::Void(_) => None,
        }
    }
}

/// A model together with the data created from it.
///
/// Fields are private and the data is always created from the model, so both variants hold the
/// same kind for the whole lifetime of the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Joint {
    pub(crate) model: JointModelVariant,
    pub(crate) data: JointDataVariant,
}

impl Joint {
    pub fn new(model: impl Into<JointModelVariant>) -> Self {
        let model = model.into();
        let data = model.create_data();
        Self { model, data }
    }

    pub fn kind(&self) -> JointKind {
        self.model.kind()
    }

    pub fn model(&self) -> &JointModelVariant {
        &self.model
    }

    pub fn data(&self) -> &JointDataVariant {
        &self.data
    }

    /// Typed access to the data, `None` if `D` is not the data of this joint's kind.
    pub fn data_as<D: JointData>(&self) -> Option<&D> {
        D::get(&self.data)
    }

    pub fn into_parts(self) -> (JointModelVariant, JointDataVariant) {
        (self.model, self.data)
    }
}
