use linreg_core::{Float, LinregError, LinregResult, Matrix};

/// Matrix inverse via Gauss–Jordan elimination with partial pivoting.
///
/// Fails with [`LinregError::SingularMatrix`] when no usable pivot remains,
/// e.g. for rank-deficient normal-equation matrices built from collinear
/// features or from fewer rows than columns.
pub fn inv<T: Float>(a: &Matrix<T>) -> LinregResult<Matrix<T>> {
    let n = a.rows();
    if n != a.cols() {
        return Err(LinregError::InvalidOperation(
            "inv: matrix must be square".to_string(),
        ));
    }

    // Augmented system [A | I], reduced in place to [I | A⁻¹].
    let mut work = a.data().to_vec();
    let mut result = Matrix::<T>::zeros(n, n);
    for i in 0..n {
        result.set(i, i, T::ONE)?;
    }

    for k in 0..n {
        // Partial pivoting: largest magnitude in column k at or below the diagonal.
        let mut pivot_row = k;
        let mut pivot_val = work[k * n + k].abs();
        for i in (k + 1)..n {
            let v = work[i * n + k].abs();
            if v > pivot_val {
                pivot_val = v;
                pivot_row = i;
            }
        }
        if pivot_val < T::EPSILON {
            return Err(LinregError::SingularMatrix);
        }

        if pivot_row != k {
            for j in 0..n {
                work.swap(k * n + j, pivot_row * n + j);
                let tmp = result.get(k, j)?;
                result.set(k, j, result.get(pivot_row, j)?)?;
                result.set(pivot_row, j, tmp)?;
            }
        }

        // Scale pivot row to make the pivot 1.
        let pivot = work[k * n + k];
        for j in 0..n {
            work[k * n + j] /= pivot;
            let v = result.get(k, j)? / pivot;
            result.set(k, j, v)?;
        }

        // Eliminate column k from every other row.
        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = work[i * n + k];
            if factor == T::ZERO {
                continue;
            }
            for j in 0..n {
                let pivot_entry = work[k * n + j];
                work[i * n + j] -= factor * pivot_entry;
                let v = result.get(i, j)? - factor * result.get(k, j)?;
                result.set(i, j, v)?;
            }
        }
    }

    Ok(result)
}
