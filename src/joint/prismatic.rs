//! Joint sliding along a fixed unit axis.

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3, Vector6};

use super::{configuration, configuration_mut, velocity, JointKind, JointModel};
use crate::JointError;

/// One translational degree of freedom along `axis`, expressed in the parent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct JointModelPrismatic {
    axis: Unit<Vector3<f64>>,
}

impl JointModelPrismatic {
    pub fn x() -> Self {
        Self::unaligned(Vector3::x_axis())
    }

    pub fn y() -> Self {
        Self::unaligned(Vector3::y_axis())
    }

    pub fn z() -> Self {
        Self::unaligned(Vector3::z_axis())
    }

    pub fn unaligned(axis: Unit<Vector3<f64>>) -> Self {
        Self { axis }
    }

    pub fn axis(&self) -> &Unit<Vector3<f64>> {
        &self.axis
    }
}

impl Default for JointModelPrismatic {
    fn default() -> Self {
        Self::z()
    }
}

live_data!(JointDataPrismatic => Prismatic);

impl JointModel for JointModelPrismatic {
    type Data = JointDataPrismatic;

    const KIND: JointKind = JointKind::Prismatic;
    const NQ: usize = 1;
    const NV: usize = 1;

    fn create_data(&self) -> Self::Data {
        JointDataPrismatic::default()
    }

    fn neutral(&self, q: &mut [f64]) {
        q.copy_from_slice(&[0.0]);
    }

    fn calc(&self, data: &mut Self::Data, q: &[f64]) -> Result<(), JointError> {
        let [extension] = *configuration::<1>(Self::KIND, q)?;
        data.placement = Isometry3::from_parts(
            Translation3::from(self.axis.into_inner() * extension),
            UnitQuaternion::identity(),
        );
        Ok(())
    }

    fn calc_velocity(&self, data: &mut Self::Data, q: &[f64], v: &[f64]) -> Result<(), JointError> {
        let [rate] = *velocity::<1>(Self::KIND, v)?;
        self.calc(data, q)?;
        data.velocity = Vector6::zeros();
        data.velocity.fixed_rows_mut::<3>(0).copy_from(&(self.axis.into_inner() * rate));
        Ok(())
    }

    fn integrate(&self, q: &[f64], v: &[f64], q_out: &mut [f64]) -> Result<(), JointError> {
        let [extension] = *configuration::<1>(Self::KIND, q)?;
        let [rate] = *velocity::<1>(Self::KIND, v)?;
        let [out] = configuration_mut::<1>(Self::KIND, q_out)?;
        *out = extension + rate;
        Ok(())
    }
}
