use std::collections::BTreeSet;

use crate::value::{Scalar, ScalarKind};

/// Distinct kinds among `scalars`, in canonical order. One alternative per kind,
/// never one per value.
pub fn distinct_kinds(scalars: &[&Scalar]) -> BTreeSet<ScalarKind> {
    scalars.iter().map(|s| s.kind()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn kinds_collapse_by_runtime_type() {
        let a = Scalar::Int(1);
        let b = Scalar::Int(2);
        let c = Scalar::Float(OrderedFloat(1.0));
        let d = Scalar::String("1".into());
        let kinds = distinct_kinds(&[&a, &b, &c, &d]);
        assert_eq!(
            kinds.into_iter().collect::<Vec<_>>(),
            vec![ScalarKind::Int, ScalarKind::Float, ScalarKind::String]
        );
    }
}
