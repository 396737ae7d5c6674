/*! Dispatch of kind-generic algorithms onto joints whose kind is only known at run time.
 *
 * An algorithm is a type implementing [JointVisitor] (model only) or [JointDataVisitor] (model
 * and its data) with a single generic `algo` function. The dispatcher resolves the active kind of a
 * [JointModelVariant] with one exhaustive `match` and calls `algo` instantiated for that kind,
 * handing over the concrete model, the data of the same kind and the extra arguments, in that order.
 *
 * Four entry points cover the combinations of "with/without data" and "with/without extra
 * arguments": `run`, `run_with`, `run_data` and `run_data_with`. They exist on the variant
 * (run-time resolution), on [Joint] and, through [JointModelExt], on every concrete model
 * (compile-time resolution, a direct call).
 *
 * The void alternative never reaches an algorithm. Dispatching it is a no-op when the algorithm
 * returns `()` and a fatal contract violation otherwise. Telling the two apart needs `Any`, hence the
 * `V::Output: 'static` bound on the run-time entry points.
 */

use std::any::{type_name, Any};

use tracing::error;

use crate::{JointDataVariant, JointKind, JointModel, JointModelVariant, Joint};

/// Marker for "no extra arguments", distinct from an explicitly passed empty tuple `()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoArg;

/// Ordered pack of extra arguments forwarded verbatim to an algorithm.
///
/// Implemented for [NoArg] and tuples of up to twelve elements.
pub trait ExtraArgs {
    /// Number of forwarded values
    const ARITY: usize;
}

impl ExtraArgs for NoArg {
    const ARITY: usize = 0;
}

macro_rules! extra_args {
    ($($arity:literal => ($($name:ident),*);)*) => {
        $(
            impl<$($name),*> ExtraArgs for ($($name,)*) {
                const ARITY: usize = $arity;
            }
        )*
    };
}

extra_args! {
    0 => ();
    1 => (A);
    2 => (A, B);
    3 => (A, B, C);
    4 => (A, B, C, D);
    5 => (A, B, C, D, E);
    6 => (A, B, C, D, E, F);
    7 => (A, B, C, D, E, F, G);
    8 => (A, B, C, D, E, F, G, H);
    9 => (A, B, C, D, E, F, G, H, I);
    10 => (A, B, C, D, E, F, G, H, I, J);
    11 => (A, B, C, D, E, F, G, H, I, J, K);
    12 => (A, B, C, D, E, F, G, H, I, J, K, L);
}

/// An algorithm operating on a joint model of any kind.
pub trait JointVisitor<Args: ExtraArgs = NoArg> {
    /// The same for all kinds
    type Output;

    fn algo<J: JointModel>(model: &J, args: Args) -> Self::Output;
}

/// An algorithm operating on a joint model of any kind and the data bound to it.
pub trait JointDataVisitor<Args: ExtraArgs = NoArg> {
    /// The same for all kinds
    type Output;

    fn algo<J: JointModel>(model: &J, data: &mut J::Data, args: Args) -> Self::Output;
}

impl JointModelVariant {
    /// Dispatches `V` without extra arguments.
    ///
    /// `V::Output` must be `'static`, see [JointModelVariant::run_with].
    ///
    /// # Panics
    /// If the model is void and `V::Output` is not `()`.
    pub fn run<V>(&self) -> V::Output
    where
        V: JointVisitor,
        V::Output: 'static,
    {
        self.run_with::<V, NoArg>(NoArg)
    }

    /// Dispatches `V` forwarding `args`.
    ///
    /// `V::Output` must be `'static`, so an output borrowing from `args` is rejected at build time;
    /// use [JointModelExt] on the concrete model for those.
    ///
    /// # Panics
    /// If the model is void and `V::Output` is not `()`.
    pub fn run_with<V, A>(&self, args: A) -> V::Output
    where
        V: JointVisitor<A>,
        V::Output: 'static,
        A: ExtraArgs,
    {
        match self {
            JointModelVariant::Revolute(model) => V::algo(model, args),
            JointModelVariant::Prismatic(model) => V::algo(model, args),
            JointModelVariant::Spherical(model) => V::algo(model, args),
            JointModelVariant::FreeFlyer(model) => V::algo(model, args),
            JointModelVariant::Void(_) => void_output::<V::Output>(),
        }
    }

    /// Dispatches `V` on this model and `data` without extra arguments.
    ///
    /// `data` must have been created from this model (or one of the same kind).
    ///
    /// `V::Output` must be `'static`, see [JointModelVariant::run_with].
    ///
    /// # Panics
    /// If `data` holds another kind than the model, or if the model is void and `V::Output` is not `()`.
    pub fn run_data<V>(&self, data: &mut JointDataVariant) -> V::Output
    where
        V: JointDataVisitor,
        V::Output: 'static,
    {
        self.run_data_with::<V, NoArg>(data, NoArg)
    }

    /// Dispatches `V` on this model and `data` forwarding `args`.
    ///
    /// `V::Output` must be `'static`, so an output borrowing from `args` is rejected at build time;
    /// use [JointModelExt] on the concrete model for those.
    ///
    /// # Panics
    /// If `data` holds another kind than the model, or if the model is void and `V::Output` is not `()`.
    pub fn run_data_with<V, A>(&self, data: &mut JointDataVariant, args: A) -> V::Output
    where
        V: JointDataVisitor<A>,
        V::Output: 'static,
        A: ExtraArgs,
    {
        match self {
            JointModelVariant::Revolute(model) => V::algo(model, paired(model, data), args),
            JointModelVariant::Prismatic(model) => V::algo(model, paired(model, data), args),
            JointModelVariant::Spherical(model) => V::algo(model, paired(model, data), args),
            JointModelVariant::FreeFlyer(model) => V::algo(model, paired(model, data), args),
            JointModelVariant::Void(_) => {
                debug_assert!(data.is_void(), "void model paired with {} data", data.kind());
                void_output::<V::Output>()
            }
        }
    }
}

impl Joint {
    pub fn run<V>(&self) -> V::Output
    where
        V: JointVisitor,
        V::Output: 'static,
    {
        self.model.run::<V>()
    }

    pub fn run_with<V, A>(&self, args: A) -> V::Output
    where
        V: JointVisitor<A>,
        V::Output: 'static,
        A: ExtraArgs,
    {
        self.model.run_with::<V, A>(args)
    }

    pub fn run_data<V>(&mut self) -> V::Output
    where
        V: JointDataVisitor,
        V::Output: 'static,
    {
        self.model.run_data::<V>(&mut self.data)
    }

    pub fn run_data_with<V, A>(&mut self, args: A) -> V::Output
    where
        V: JointDataVisitor<A>,
        V::Output: 'static,
        A: ExtraArgs,
    {
        self.model.run_data_with::<V, A>(&mut self.data, args)
    }
}

/// Entry points for a model whose kind is known at compile time: no branch, a direct call.
pub trait JointModelExt: JointModel {
    fn run<V: JointVisitor>(&self) -> V::Output {
        V::algo(self, NoArg)
    }

    fn run_with<V: JointVisitor<A>, A: ExtraArgs>(&self, args: A) -> V::Output {
        V::algo(self, args)
    }

    fn run_data<V: JointDataVisitor>(&self, data: &mut Self::Data) -> V::Output {
        V::algo(self, data, NoArg)
    }

    fn run_data_with<V: JointDataVisitor<A>, A: ExtraArgs>(&self, data: &mut Self::Data, args: A) -> V::Output {
        V::algo(self, data, args)
    }
}

impl<J: JointModel> JointModelExt for J {}

/// Retrieves the alternative of `data` bound to the model kind `J`.
fn paired<'d, J: JointModel>(_model: &J, data: &'d mut JointDataVariant) -> &'d mut J::Data {
    let found = data.kind();
    match <J::Data as crate::JointData>::get_mut(data) {
        Some(data) => data,
        None => pairing_violation(J::KIND, found),
    }
}

/// The value of a void dispatch: `()` for unit algorithms, a contract violation for all others.
fn void_output<R: 'static>() -> R {
    let mut output: Option<R> = None;
    if let Some(unit) = (&mut output as &mut dyn Any).downcast_mut::<Option<()>>() {
        *unit = Some(());
    }
    match output {
        Some(output) => output,
        None => void_misuse(type_name::<R>()),
    }
}

#[cold]
#[inline(never)]
fn pairing_violation(model: JointKind, data: JointKind) -> ! {
    error!(%model, %data, "joint model and data are not paired");
    panic!("pairing violation: {model} model dispatched with {data} data");
}

#[cold]
#[inline(never)]
fn void_misuse(output: &str) -> ! {
    error!(output, "void joint dispatched to an algorithm returning a value");
    panic!("void joint dispatched to an algorithm returning `{output}`");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::{
        JointDataPrismatic, JointDataRevolute, JointModelFreeFlyer, JointModelPrismatic, JointModelRevolute,
        JointModelSpherical, JointModelVoid,
    };
    use std::cell::Cell;

    struct DegreesOfFreedom;

    impl JointVisitor for DegreesOfFreedom {
        type Output = usize;

        fn algo<J: JointModel>(model: &J, _: NoArg) -> usize {
            model.nv()
        }
    }

    /// Reports which branch was taken
    struct Branch;

    impl JointVisitor for Branch {
        type Output = JointKind;

        fn algo<J: JointModel>(_: &J, _: NoArg) -> JointKind {
            J::KIND
        }
    }

    struct Labelled;

    impl<'a> JointVisitor<(&'a str,)> for Labelled {
        type Output = (usize, &'a str);

        fn algo<J: JointModel>(model: &J, (label,): (&'a str,)) -> (usize, &'a str) {
            (model.nq(), label)
        }
    }

    /// Records the call order of its arguments
    struct Ordered;

    impl JointVisitor<(u8, char, &'static str)> for Ordered {
        type Output = (JointKind, u8, char, &'static str);

        fn algo<J: JointModel>(_: &J, (a, b, c): (u8, char, &'static str)) -> Self::Output {
            (J::KIND, a, b, c)
        }
    }

    /// Counts its invocations, returns nothing
    struct Count;

    impl<'c> JointVisitor<(&'c Cell<usize>,)> for Count {
        type Output = ();

        fn algo<J: JointModel>(_: &J, (counter,): (&'c Cell<usize>,)) {
            counter.set(counter.get() + 1);
        }
    }

    impl<'c> JointDataVisitor<(&'c Cell<usize>,)> for Count {
        type Output = ();

        fn algo<J: JointModel>(_: &J, _: &mut J::Data, (counter,): (&'c Cell<usize>,)) {
            counter.set(counter.get() + 1);
        }
    }

    /// Counts its invocations without extra arguments
    struct Tally;

    thread_local! {
        static TALLY: Cell<usize> = const { Cell::new(0) };
    }

    impl JointVisitor for Tally {
        type Output = ();

        fn algo<J: JointModel>(_: &J, _: NoArg) {
            TALLY.with(|tally| tally.set(tally.get() + 1));
        }
    }

    impl JointDataVisitor for Tally {
        type Output = ();

        fn algo<J: JointModel>(_: &J, _: &mut J::Data, _: NoArg) {
            TALLY.with(|tally| tally.set(tally.get() + 1));
        }
    }

    /// Reports the kind of the data it received
    struct DataKind;

    impl JointDataVisitor for DataKind {
        type Output = JointKind;

        fn algo<J: JointModel>(_: &J, data: &mut J::Data, _: NoArg) -> JointKind {
            let variant: JointDataVariant = data.clone().into();
            variant.kind()
        }
    }

    /// Distinguishes the marker from an explicit empty tuple
    struct Shape;

    impl JointVisitor for Shape {
        type Output = &'static str;

        fn algo<J: JointModel>(_: &J, _: NoArg) -> &'static str {
            "no argument"
        }
    }

    impl JointVisitor<()> for Shape {
        type Output = &'static str;

        fn algo<J: JointModel>(_: &J, _: ()) -> &'static str {
            "empty tuple"
        }
    }

    fn live() -> Vec<JointModelVariant> {
        vec![
            JointModelRevolute::z().into(),
            JointModelPrismatic::x().into(),
            JointModelSpherical.into(),
            JointModelFreeFlyer.into(),
        ]
    }

    #[test]
    fn every_kind_takes_its_own_branch() {
        for model in live() {
            assert_eq!(model.run::<Branch>(), model.kind());
        }
    }

    #[test]
    fn degrees_of_freedom() {
        let revolute = JointModelVariant::from(JointModelRevolute::z());
        let prismatic = JointModelVariant::from(JointModelPrismatic::z());
        assert_eq!(revolute.run::<DegreesOfFreedom>(), 1);
        assert_eq!(prismatic.run::<DegreesOfFreedom>(), 1);
        assert_eq!(JointModelVariant::from(JointModelFreeFlyer).run::<DegreesOfFreedom>(), 6);
    }

    #[test]
    fn label_is_forwarded_unchanged() {
        let model = JointModelVariant::from(JointModelSpherical);
        assert_eq!(model.run_with::<Labelled, _>(("label",)), (4, "label"));
    }

    #[test]
    fn argument_order_is_preserved() {
        for model in live() {
            assert_eq!(
                model.run_with::<Ordered, _>((1u8, 'b', "c")),
                (model.kind(), 1, 'b', "c")
            );
        }
    }

    #[test]
    fn no_arg_and_empty_tuple_are_distinct() {
        let model = JointModelVariant::from(JointModelRevolute::x());
        assert_eq!(model.run::<Shape>(), "no argument");
        assert_eq!(model.run_with::<Shape, _>(()), "empty tuple");
        assert_eq!(<NoArg as ExtraArgs>::ARITY, <() as ExtraArgs>::ARITY);
        assert_eq!(<(u8, char, &str) as ExtraArgs>::ARITY, 3);
    }

    #[test]
    fn data_of_the_same_kind_is_passed() {
        for model in live() {
            let mut data = model.create_data();
            assert_eq!(model.run_data::<DataKind>(&mut data), model.kind());
        }
    }

    #[test]
    fn void_is_a_no_op_for_unit_algorithms() {
        let counter = Cell::new(0);
        let model = JointModelVariant::from(JointModelVoid);
        let mut data = model.create_data();

        model.run_with::<Count, _>((&counter,));
        model.run_data_with::<Count, _>(&mut data, (&counter,));
        assert_eq!(counter.get(), 0);
        assert!(data.is_void());

        JointModelVariant::from(JointModelPrismatic::y()).run_with::<Count, _>((&counter,));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn void_is_a_no_op_without_arguments() {
        let model = JointModelVariant::from(JointModelVoid);
        let mut data = model.create_data();

        model.run::<Tally>();
        model.run_data::<Tally>(&mut data);
        assert_eq!(TALLY.with(Cell::get), 0);

        let mut joint = Joint::default();
        joint.run::<Tally>();
        joint.run_data::<Tally>();
        assert_eq!(TALLY.with(Cell::get), 0);

        JointModelVariant::from(JointModelSpherical).run::<Tally>();
        assert_eq!(TALLY.with(Cell::get), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "void model paired with Revolute data")]
    fn void_model_with_live_data_is_caught() {
        let counter = Cell::new(0);
        let mut data = JointDataVariant::from(JointDataRevolute::default());
        JointModelVariant::from(JointModelVoid).run_data_with::<Count, _>(&mut data, (&counter,));
    }

    #[test]
    #[should_panic(expected = "void joint dispatched")]
    fn void_with_a_value_is_rejected() {
        JointModelVariant::from(JointModelVoid).run::<DegreesOfFreedom>();
    }

    #[test]
    #[should_panic(expected = "void joint dispatched")]
    fn void_with_data_and_a_value_is_rejected() {
        let mut data = JointDataVariant::default();
        JointModelVariant::from(JointModelVoid).run_data::<DataKind>(&mut data);
    }

    #[test]
    #[should_panic(expected = "pairing violation: Revolute model dispatched with Prismatic data")]
    fn mismatched_pair_is_fatal() {
        let model = JointModelVariant::from(JointModelRevolute::z());
        let mut data = JointDataVariant::from(JointDataPrismatic::default());
        model.run_data::<DataKind>(&mut data);
    }

    #[test]
    fn concrete_models_are_called_directly() {
        let model = JointModelRevolute::y();
        let mut data = model.create_data();
        assert_eq!(model.run::<DegreesOfFreedom>(), 1);
        assert_eq!(model.run_with::<Labelled, _>(("direct",)), (1, "direct"));
        assert_eq!(model.run_data::<DataKind>(&mut data), JointKind::Revolute);
        assert_eq!(data, JointDataRevolute::default());

        let label = String::from("borrowed");
        assert_eq!(model.run_with::<Labelled, _>((label.as_str(),)), (1, "borrowed"));
    }

    #[test]
    fn repeated_dispatch_is_idempotent() {
        let mut joint = Joint::new(JointModelFreeFlyer);
        let first = (joint.run::<Branch>(), joint.run_data::<DataKind>());
        let second = (joint.run::<Branch>(), joint.run_data::<DataKind>());
        assert_eq!(first, second);
        assert_eq!(first, (JointKind::FreeFlyer, JointKind::FreeFlyer));
    }
}
