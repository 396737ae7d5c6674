//! Dispatch of one algorithm over many independent (model, data) pairs.
//!
//! The per-joint extra arguments are built by a callback receiving the index of the joint and its
//! model, e.g. to cut the joint's segment out of a configuration vector using [offsets].

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;
use tracing_attributes::instrument;

use crate::{ExtraArgs, JointDataVariant, JointDataVisitor, JointModelVariant};

/// Start index of each joint in the configuration and in the velocity vector, followed by the
/// total sizes `(nq, nv)` as last element.
pub fn offsets(models: &[JointModelVariant]) -> Vec<(usize, usize)> {
    models
        .iter()
        .scan((0, 0), |(idx_q, idx_v), model| {
            let result = Some((*idx_q, *idx_v));
            *idx_q += model.nq();
            *idx_v += model.nv();
            result
        })
        .chain(std::iter::once((
            models.iter().map(JointModelVariant::nq).sum(),
            models.iter().map(JointModelVariant::nv).sum(),
        )))
        .collect()
}

/// Dispatches `V` on every pair in order and collects the outputs.
///
/// # Panics
/// If `models` and `datas` differ in length, or for any pairing violation (see [crate::visitor]).
#[instrument(level = "debug", skip_all, fields(count = models.len()))]
pub fn run_data_each<V, A, F>(
    models: &[JointModelVariant],
    datas: &mut [JointDataVariant],
    mut args_for: F,
) -> Vec<V::Output>
where
    V: JointDataVisitor<A>,
    V::Output: 'static,
    A: ExtraArgs,
    F: FnMut(usize, &JointModelVariant) -> A,
{
    assert_eq!(models.len(), datas.len(), "every model needs exactly one data");
    debug!(arity = A::ARITY, "dispatching");
    models
        .iter()
        .zip_eq(datas.iter_mut())
        .enumerate()
        .map(|(index, (model, data))| model.run_data_with::<V, A>(data, args_for(index, model)))
        .collect_vec()
}

/// Parallel version of [run_data_each]. Outputs keep the order of the joints.
///
/// # Panics
/// If `models` and `datas` differ in length, or for any pairing violation (see [crate::visitor]).
#[cfg(feature = "rayon")]
#[instrument(level = "debug", skip_all, fields(count = models.len()))]
pub fn par_run_data_each<V, A, F>(models: &[JointModelVariant], datas: &mut [JointDataVariant], args_for: F) -> Vec<V::Output>
where
    V: JointDataVisitor<A>,
    V::Output: Send + 'static,
    A: ExtraArgs,
    F: Fn(usize, &JointModelVariant) -> A + Sync,
{
    assert_eq!(models.len(), datas.len(), "every model needs exactly one data");
    debug!(arity = A::ARITY, "dispatching in parallel");
    models
        .par_iter()
        .zip(datas.par_iter_mut())
        .enumerate()
        .map(|(index, (model, data))| model.run_data_with::<V, A>(data, args_for(index, model)))
        .collect()
}
