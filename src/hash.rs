//! Cheap deterministic hash for procedural placement (mock data, stars).

/// Multiply-xor hash of `seed`, low 16 bits.
pub fn hash16(seed: usize) -> u32 {
    let x = seed.wrapping_mul(2654435761) ^ seed.wrapping_mul(340573321);
    (x & 0xFFFF) as u32
}

/// [`hash16`] mapped onto `0.0..=1.0`.
pub fn unit(seed: usize) -> f32 {
    hash16(seed) as f32 / 65535.0
}
