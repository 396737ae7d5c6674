//! Joint rotating about a fixed unit axis.

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3, Vector6};

use super::{configuration, configuration_mut, velocity, JointKind, JointModel};
use crate::JointError;

/// One rotational degree of freedom about `axis`, expressed in the parent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct JointModelRevolute {
    axis: Unit<Vector3<f64>>,
}

impl JointModelRevolute {
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

impl Default for JointModelRevolute {
    fn default() -> Self {
        Self::z()
    }
}

live_data!(JointDataRevolute => Revolute);

impl JointModel for JointModelRevolute {
    type Data = JointDataRevolute;

    const KIND: JointKind = JointKind::Revolute;
    const NQ: usize = 1;
    const NV: usize = 1;

    fn create_data(&self) -> Self::Data {
        JointDataRevolute::default()
    }

    fn neutral(&self, q: &mut [f64]) {
        q.copy_from_slice(&[0.0]);
    }

    fn calc(&self, data: &mut Self::Data, q: &[f64]) -> Result<(), JointError> {
        let [angle] = *configuration::<1>(Self::KIND, q)?;
        data.placement = Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(&self.axis, angle),
        );
        Ok(())
    }

    fn calc_velocity(&self, data: &mut Self::Data, q: &[f64], v: &[f64]) -> Result<(), JointError> {
        let [rate] = *velocity::<1>(Self::KIND, v)?;
        self.calc(data, q)?;
        data.velocity = Vector6::zeros();
        data.velocity.fixed_rows_mut::<3>(3).copy_from(&(self.axis.into_inner() * rate));
        Ok(())
    }

    fn integrate(&self, q: &[f64], v: &[f64], q_out: &mut [f64]) -> Result<(), JointError> {
        let [angle] = *configuration::<1>(Self::KIND, q)?;
        let [rate] = *velocity::<1>(Self::KIND, v)?;
        let [out] = configuration_mut::<1>(Self::KIND, q_out)?;
        *out = angle + rate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JointData;
    use approx::assert_abs_diff_eq;
    use nalgebra::Point3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_about_z() {
        let model = JointModelRevolute::z();
        let mut data = model.create_data();
        model.calc(&mut data, &[FRAC_PI_2]).unwrap();

        let rotated = data.placement() * Point3::new(10.0, 0.0, 0.0);
        assert_abs_diff_eq!(rotated, Point3::new(0.0, 10.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn velocity_is_angular_along_axis() {
        let model = JointModelRevolute::x();
        let mut data = model.create_data();
        model.calc_velocity(&mut data, &[0.0], &[2.0]).unwrap();
        assert_eq!(data.velocity(), &Vector6::new(0.0, 0.0, 0.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn wrong_sizes_are_reported() {
        let model = JointModelRevolute::y();
        let mut data = model.create_data();
        assert!(matches!(
            model.calc(&mut data, &[0.0, 1.0]),
            Err(JointError::ConfigurationSize { expected: 1, found: 2, .. })
        ));
        let mut out = [0.0; 1];
        assert!(model.integrate(&[0.0], &[], &mut out).is_err());
    }

    #[test]
    fn integrate_adds_rate() {
        let mut out = [0.0];
        JointModelRevolute::default()
            .integrate(&[0.25], &[0.5], &mut out)
            .unwrap();
        assert_eq!(out, [0.75]);
    }
}
