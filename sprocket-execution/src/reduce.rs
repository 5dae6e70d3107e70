//! Index-ordered reduction of map outputs
//!
//! Map consumers rely on positional semantics, so folds always walk the
//! output collection in index order even when the combining operation is
//! not commutative.

use crate::error::ExecutionResult;

/// Fold an ordered output collection into one aggregate, strictly in index
/// order
pub fn fold_ordered<T, A, F>(outputs: Vec<T>, init: A, mut combine: F) -> A
where
    F: FnMut(A, T) -> A,
{
    let mut acc = init;
    for output in outputs {
        acc = combine(acc, output);
    }
    acc
}

/// Fallible variant of [`fold_ordered`]; stops at the first error
pub fn try_fold_ordered<T, A, F>(outputs: Vec<T>, init: A, mut combine: F) -> ExecutionResult<A>
where
    F: FnMut(A, T) -> ExecutionResult<A>,
{
    let mut acc = init;
    for output in outputs {
        acc = combine(acc, output)?;
    }
    Ok(acc)
}

/// Concatenate mapped string outputs in index order
pub fn coalesce<S: AsRef<str>>(outputs: Vec<S>) -> String {
    fold_ordered(outputs, String::new(), |mut acc, part| {
        acc.push_str(part.as_ref());
        acc
    })
}
