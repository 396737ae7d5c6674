//! Ball joint, parametrized by a unit quaternion `[x, y, z, w]`.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3, Vector6};

use super::{
    configuration, configuration_mut, store_quaternion, unit_quaternion, velocity, JointKind, JointModel,
};
use crate::JointError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointModelSpherical;

live_data!(JointDataSpherical => Spherical);

impl JointModel for JointModelSpherical {
    type Data = JointDataSpherical;

    const KIND: JointKind = JointKind::Spherical;
    const NQ: usize = 4;
    const NV: usize = 3;

    fn create_data(&self) -> Self::Data {
        JointDataSpherical::default()
    }

    fn neutral(&self, q: &mut [f64]) {
        q.copy_from_slice(&[0.0, 0.0, 0.0, 1.0]);
    }

    fn calc(&self, data: &mut Self::Data, q: &[f64]) -> Result<(), JointError> {
        let rotation = unit_quaternion(Self::KIND, configuration::<4>(Self::KIND, q)?)?;
        data.placement = Isometry3::from_parts(Translation3::identity(), rotation);
        Ok(())
    }

    fn calc_velocity(&self, data: &mut Self::Data, q: &[f64], v: &[f64]) -> Result<(), JointError> {
        let [wx, wy, wz] = *velocity::<3>(Self::KIND, v)?;
        self.calc(data, q)?;
        data.velocity = Vector6::new(0.0, 0.0, 0.0, wx, wy, wz);
        Ok(())
    }

    fn integrate(&self, q: &[f64], v: &[f64], q_out: &mut [f64]) -> Result<(), JointError> {
        let rotation = unit_quaternion(Self::KIND, configuration::<4>(Self::KIND, q)?)?;
        let [wx, wy, wz] = *velocity::<3>(Self::KIND, v)?;
        let out = configuration_mut::<4>(Self::KIND, q_out)?;
        store_quaternion(
            &(rotation * UnitQuaternion::from_scaled_axis(Vector3::new(wx, wy, wz))),
            out,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JointData;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

    #[test]
    fn quaternion_is_normalized_on_read() {
        let model = JointModelSpherical;
        let mut data = model.create_data();
        // half turn about x, not normalized
        model.calc(&mut data, &[2.0, 0.0, 0.0, 0.0]).unwrap();
        assert_abs_diff_eq!(
            data.placement().rotation,
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI),
            epsilon = 1e-12
        );
    }

    #[test]
    fn integrate_from_neutral() {
        let model = JointModelSpherical;
        let mut q = [0.0; 4];
        model.neutral(&mut q);

        let mut q_out = [0.0; 4];
        model.integrate(&q, &[0.0, 0.0, FRAC_PI_2], &mut q_out).unwrap();
        assert_abs_diff_eq!(
            q_out.as_slice(),
            [0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2].as_slice(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_configuration_fails() {
        let model = JointModelSpherical;
        let mut data = model.create_data();
        assert_eq!(
            model.calc_velocity(&mut data, &[0.0; 4], &[0.0; 3]),
            Err(JointError::DegenerateQuaternion {
                kind: JointKind::Spherical
            })
        );
    }
}
