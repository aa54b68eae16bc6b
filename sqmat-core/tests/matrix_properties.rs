use approx::assert_relative_eq;
use sqmat_core::{SqmatError, SquareMatrix, SumOrd, Vector};

// Helper for float comparison of whole matrices
fn assert_approx_eq_matrix(a: &SquareMatrix, b: &SquareMatrix, tolerance: f64) {
    assert_eq!(a.size(), b.size(), "Matrix sizes differ");
    for (r, (row_a, row_b)) in a.rows().iter().zip(b.rows()).enumerate() {
        for (c, (x, y)) in row_a.iter().zip(row_b.iter()).enumerate() {
            let (x, y) = (x.value().unwrap(), y.value().unwrap());
            assert!(
                (x - y).abs() <= tolerance,
                "Mismatch at ({}, {}): {} vs {}",
                r,
                c,
                x,
                y
            );
        }
    }
}

fn sample(n: usize, seed: f64) -> SquareMatrix {
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| ((i * n + j) as f64 * 0.37 + seed).sin() * 5.0)
                .collect()
        })
        .collect();
    SquareMatrix::from_rows(rows).unwrap()
}

#[test]
fn test_identity_shape_and_self_transpose() -> Result<(), SqmatError> {
    for n in 0..6 {
        let identity = SquareMatrix::identity(n);
        assert!(identity.all_initialized());
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(identity.value(i as isize, j as isize)?, expected);
            }
        }
        let mut transposed = identity.clone();
        transposed.transpose()?;
        assert_approx_eq_matrix(&transposed, &identity, 0.0);
    }
    Ok(())
}

#[test]
fn test_identity_determinant_is_one() -> Result<(), SqmatError> {
    for n in 0..7 {
        assert_eq!(SquareMatrix::identity(n).determinant()?, 1.0, "n = {}", n);
    }
    Ok(())
}

#[test]
fn test_add_sub_round_trip_and_commutativity() -> Result<(), SqmatError> {
    for n in 1..5 {
        let a = sample(n, 0.1);
        let b = sample(n, 2.3);
        let sum = a.checked_add(&b)?;
        let back = sum.checked_sub(&b)?;
        assert!(back.sum_eq(&a)?);
        assert_approx_eq_matrix(&back, &a, 1e-12);
        assert_approx_eq_matrix(&sum, &b.checked_add(&a)?, 0.0);
    }
    Ok(())
}

#[test]
fn test_multiply_by_identity() -> Result<(), SqmatError> {
    for n in 0..5 {
        let a = sample(n, 1.7);
        let product = a.matmul(&SquareMatrix::identity(n))?;
        assert_approx_eq_matrix(&product, &a, 1e-12);
        let product = SquareMatrix::identity(n).matmul(&a)?;
        assert_approx_eq_matrix(&product, &a, 1e-12);
    }
    Ok(())
}

#[test]
fn test_known_determinant() -> Result<(), SqmatError> {
    let a = SquareMatrix::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![0.0, 1.0, 4.0],
        vec![5.0, 6.0, 0.0],
    ])?;
    assert_relative_eq!(a.determinant()?, 1.0);
    Ok(())
}

#[test]
fn test_determinant_of_product_is_product_of_determinants() -> Result<(), SqmatError> {
    let a = SquareMatrix::from_rows(vec![
        vec![2.0, 0.0, 1.0, 3.0],
        vec![1.0, 1.0, 0.0, 2.0],
        vec![0.0, 3.0, 1.0, 1.0],
        vec![4.0, 1.0, 2.0, 0.0],
    ])?;
    let b = SquareMatrix::from_rows(vec![
        vec![1.0, 2.0, 0.0, 1.0],
        vec![0.0, 1.0, 3.0, 2.0],
        vec![2.0, 0.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0, 0.0],
    ])?;
    let det_ab = (&a * &b)?.determinant()?;
    assert_relative_eq!(det_ab, a.determinant()? * b.determinant()?);
    Ok(())
}

#[test]
fn test_power_identities() -> Result<(), SqmatError> {
    let a = sample(3, 0.9);
    assert_approx_eq_matrix(&a.pow(0)?, &SquareMatrix::identity(3), 0.0);
    assert_approx_eq_matrix(&a.pow(1)?, &a, 0.0);
    assert_approx_eq_matrix(&a.pow(2)?, &a.matmul(&a)?, 1e-12);
    let a5 = a.matmul(&a)?.matmul(&a)?.matmul(&a)?.matmul(&a)?;
    assert_approx_eq_matrix(&a.pow(5)?, &a5, 1e-6);
    Ok(())
}

#[test]
fn test_transpose_helper_twice_recovers_columns() -> Result<(), SqmatError> {
    let columns: Vec<Vector> = (0..3)
        .map(|c| Vector::from((0..5).map(|r| (r * 3 + c) as f64).collect::<Vec<_>>()))
        .collect();
    let rows = Vector::transpose_columns_to_rows(&columns)?;
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row.len() == 3));
    assert_eq!(Vector::transpose_columns_to_rows(&rows)?, columns);
    Ok(())
}

#[test]
fn test_double_transpose_restores_matrix() -> Result<(), SqmatError> {
    let a = sample(4, 5.0);
    let mut t = a.clone();
    t.transpose()?.transpose()?;
    assert_approx_eq_matrix(&t, &a, 0.0);
    Ok(())
}

#[test]
fn test_structurally_different_matrices_compare_by_sum() -> Result<(), SqmatError> {
    let a = SquareMatrix::from_rows(vec![vec![10.0, 0.0], vec![0.0, 0.0]])?;
    let b = SquareMatrix::from_rows(vec![vec![2.5, 2.5], vec![2.5, 2.5]])?;
    assert!(a.sum_eq(&b)?);
    assert!(a.sum_le(&b)?);
    assert!(!a.sum_lt(&b)?);
    Ok(())
}

#[test]
fn test_display_matrix() -> Result<(), SqmatError> {
    let a = SquareMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
    assert_eq!(a.to_string(), "1 2 \n3 4 \n");
    assert_eq!(SquareMatrix::new(1)?.to_string(), "[ ] \n");
    Ok(())
}
