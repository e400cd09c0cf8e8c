pub(crate) fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity with norms precomputed by the caller, so one query
/// norm is shared across a whole index scan. Callers must reject zero
/// norms first.
pub(crate) fn cosine(a: &[f32], b: &[f32], a_norm: f32, b_norm: f32) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (a_norm * b_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [2.0f32, 4.0, 6.0];
        let sim = cosine(&a, &b, l2_norm(&a), l2_norm(&b));
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 5.0];
        let sim = cosine(&a, &b, l2_norm(&a), l2_norm(&b));
        assert!(sim.abs() < 1e-6);
    }
}
