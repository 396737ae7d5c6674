//! Unconstrained joint (six degrees of freedom), typically the root of a floating base.

use nalgebra::{Isometry3, Translation3, Vector3, Vector6};

use super::{
    configuration, configuration_mut, exp6, store_quaternion, unit_quaternion, velocity, JointKind,
    JointModel,
};
use crate::JointError;

/// Configuration `[tx, ty, tz, qx, qy, qz, qw]`, velocity `[linear; angular]` in the joint frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointModelFreeFlyer;

impl JointModelFreeFlyer {
    fn placement(q: &[f64; 7]) -> Result<Isometry3<f64>, JointError> {
        let [tx, ty, tz, qx, qy, qz, qw] = *q;
        Ok(Isometry3::from_parts(
            Translation3::new(tx, ty, tz),
            unit_quaternion(Self::KIND, &[qx, qy, qz, qw])?,
        ))
    }
}

live_data!(JointDataFreeFlyer => FreeFlyer);

impl JointModel for JointModelFreeFlyer {
    type Data = JointDataFreeFlyer;

    const KIND: JointKind = JointKind::FreeFlyer;
    const NQ: usize = 7;
    const NV: usize = 6;

    fn create_data(&self) -> Self::Data {
        JointDataFreeFlyer::default()
    }

    fn neutral(&self, q: &mut [f64]) {
        q.copy_from_slice(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    fn calc(&self, data: &mut Self::Data, q: &[f64]) -> Result<(), JointError> {
        data.placement = Self::placement(configuration::<7>(Self::KIND, q)?)?;
        Ok(())
    }

    fn calc_velocity(&self, data: &mut Self::Data, q: &[f64], v: &[f64]) -> Result<(), JointError> {
        let v = velocity::<6>(Self::KIND, v)?;
        self.calc(data, q)?;
        data.velocity = Vector6::from_row_slice(v);
        Ok(())
    }

    fn integrate(&self, q: &[f64], v: &[f64], q_out: &mut [f64]) -> Result<(), JointError> {
        let placement = Self::placement(configuration::<7>(Self::KIND, q)?)?;
        let v = velocity::<6>(Self::KIND, v)?;
        let out = configuration_mut::<7>(Self::KIND, q_out)?;

        let integrated = placement * exp6(&Vector6::from_row_slice(v));
        let translation: Vector3<f64> = integrated.translation.vector;
        out[..3].copy_from_slice(translation.as_slice());
        store_quaternion(&integrated.rotation, &mut out[3..]);
        Ok(())
    }
}
