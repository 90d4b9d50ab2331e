/// Added to every norm so an all-zero vector normalizes to zeros, not NaN.
pub const NORM_EPSILON: f32 = 1e-12;

pub fn l2_norm(v: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for x in v {
        sum += x * x;
    }
    sum.sqrt()
}

pub fn normalize_in_place(v: &mut [f32]) {
    let norm = l2_norm(v) + NORM_EPSILON;
    for x in v.iter_mut() {
        *x /= norm;
    }
}

/// Dot product. Equals cosine similarity when both inputs are unit length.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += x * y;
    }
    sum
}
