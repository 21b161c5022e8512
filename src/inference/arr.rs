use crate::ir::TypeDescriptor;
use crate::value::Value;

/// Pool every element of every sequence sample and unify the pool.
///
/// Elements are unified anonymously: records found inside sequences get the
/// default name. An empty pool (only empty sequences) gives `Sequence(Null)`.
pub(super) fn unify_sequences(sequences: &[&[Value]]) -> TypeDescriptor {
    let pooled: Vec<&Value> = sequences.iter().flat_map(|xs| xs.iter()).collect();
    TypeDescriptor::sequence(super::unify(&pooled, None))
}
