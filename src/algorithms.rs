//! Stock algorithms dispatched through [crate::visitor], and shortcuts on [Joint] for them.

use tracing::trace;

use crate::{Joint, JointDataVisitor, JointError, JointKind, JointModel, JointVisitor, NoArg};

/// Size of the configuration vector.
pub struct Nq;

impl JointVisitor for Nq {
    type Output = usize;

    fn algo<J: JointModel>(model: &J, _: NoArg) -> usize {
        model.nq()
    }
}

/// Size of the velocity vector.
pub struct Nv;

impl JointVisitor for Nv {
    type Output = usize;

    fn algo<J: JointModel>(model: &J, _: NoArg) -> usize {
        model.nv()
    }
}

pub struct Shortname;

impl JointVisitor for Shortname {
    type Output = &'static str;

    fn algo<J: JointModel>(model: &J, _: NoArg) -> &'static str {
        model.shortname()
    }
}

/// The kind resolved by the dispatcher.
pub struct Kind;

impl JointVisitor for Kind {
    type Output = JointKind;

    fn algo<J: JointModel>(_: &J, _: NoArg) -> JointKind {
        J::KIND
    }
}

/// Writes the neutral configuration into the given slice. A no-op on void joints.
///
/// Panics if the slice does not have the joint's configuration size, see [JointModel::neutral].
pub struct Neutral;

impl<'q> JointVisitor<(&'q mut [f64],)> for Neutral {
    type Output = ();

    fn algo<J: JointModel>(model: &J, (q,): (&'q mut [f64],)) {
        trace!(joint = J::KIND.shortname(), "neutral");
        model.neutral(q)
    }
}

/// Computes the placement of the joint for a configuration.
pub struct Calc;

impl<'q> JointDataVisitor<(&'q [f64],)> for Calc {
    type Output = Result<(), JointError>;

    fn algo<J: JointModel>(model: &J, data: &mut J::Data, (q,): (&'q [f64],)) -> Self::Output {
        trace!(joint = J::KIND.shortname(), "calc");
        model.calc(data, q)
    }
}

/// Computes placement and velocity of the joint for a configuration and a velocity.
pub struct CalcVelocity;

impl<'q, 'v> JointDataVisitor<(&'q [f64], &'v [f64])> for CalcVelocity {
    type Output = Result<(), JointError>;

    fn algo<J: JointModel>(model: &J, data: &mut J::Data, (q, v): (&'q [f64], &'v [f64])) -> Self::Output {
        trace!(joint = J::KIND.shortname(), "calc_velocity");
        model.calc_velocity(data, q, v)
    }
}

/// Integrates a configuration along a velocity for a unit time step.
pub struct Integrate;

impl<'q, 'v, 'o> JointVisitor<(&'q [f64], &'v [f64], &'o mut [f64])> for Integrate {
    type Output = Result<(), JointError>;

    fn algo<J: JointModel>(model: &J, (q, v, q_out): (&'q [f64], &'v [f64], &'o mut [f64])) -> Self::Output {
        trace!(joint = J::KIND.shortname(), "integrate");
        model.integrate(q, v, q_out)
    }
}

// Shortcuts. The fallible ones panic on void joints (see [crate::visitor]).
impl Joint {
    pub fn nq(&self) -> usize {
        self.model.nq()
    }

    pub fn nv(&self) -> usize {
        self.model.nv()
    }

    /// Writes the neutral configuration into `q`, untouched on a size mismatch.
    pub fn neutral(&self, q: &mut [f64]) -> Result<(), JointError> {
        if q.len() != self.nq() {
            return Err(JointError::ConfigurationSize {
                kind: self.kind(),
                expected: self.nq(),
                found: q.len(),
            });
        }
        self.run_with::<Neutral, _>((q,));
        Ok(())
    }

    pub fn calc(&mut self, q: &[f64]) -> Result<(), JointError> {
        self.run_data_with::<Calc, _>((q,))
    }

    pub fn calc_velocity(&mut self, q: &[f64], v: &[f64]) -> Result<(), JointError> {
        self.run_data_with::<CalcVelocity, _>((q, v))
    }

    pub fn integrate(&self, q: &[f64], v: &[f64], q_out: &mut [f64]) -> Result<(), JointError> {
        self.run_with::<Integrate, _>((q, v, q_out))
    }
}
