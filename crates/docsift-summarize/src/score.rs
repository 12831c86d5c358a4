/// Cosine similarity between two vectors of equal dimension. Returns 0.0
/// when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Element-wise mean of a non-empty set of equal-dimension vectors; a
/// proxy for "document-representative" content.
pub fn centroid(vectors: &[Vec<f32>]) -> Vec<f32> {
    assert!(!vectors.is_empty(), "centroid of empty set");
    let dim = vectors[0].len();
    let mut mean = vec![0.0f32; dim];
    for v in vectors {
        for (m, x) in mean.iter_mut().zip(v.iter()) {
            *m += x;
        }
    }
    let n = vectors.len() as f32;
    for m in &mut mean {
        *m /= n;
    }
    mean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.6, 0.8, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero_not_nan() {
        let s = cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn centroid_is_elementwise_mean() {
        let c = centroid(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(c, vec![0.5, 0.5]);
    }
}
