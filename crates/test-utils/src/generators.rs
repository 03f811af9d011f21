//! Test data generators for synthetic heightmaps.
//!
//! Every generator returns nested rows (`Vec<Vec<f64>>`, top row first) so
//! callers can build grids with whatever constructor they test.

/// Creates a terrain-like surface in metres.
///
/// A smooth hill centred in the grid on top of a west-east slope, with
/// values between roughly 100 m and 600 m and plenty of non-round decimals.
pub fn create_terrain_rows(rows: usize, cols: usize) -> Vec<Vec<f64>> {
    let cy = rows as f64 / 2.0;
    let cx = cols as f64 / 2.0;
    let radius = (cx * cx + cy * cy).sqrt().max(1.0);

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let dx = col as f64 - cx;
                    let dy = row as f64 - cy;
                    let dist = (dx * dx + dy * dy).sqrt() / radius;
                    let hill = 400.0 * (1.0 - dist).max(0.0).powi(2);
                    let slope = 100.0 * col as f64 / cols.max(1) as f64;
                    100.0 + hill + slope + 0.123_456 * row as f64
                })
                .collect()
        })
        .collect()
}

/// Creates a grid filled with a constant value.
pub fn create_constant_rows(rows: usize, cols: usize, value: f64) -> Vec<Vec<f64>> {
    vec![vec![value; cols]; rows]
}

/// Creates deterministic pseudo-random elevations in `[0, 1000)`.
pub fn create_noise_rows(rows: usize, cols: usize, seed: u32) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| (simple_hash(col as u32, row as u32, seed) % 100_000) as f64 / 100.0)
                .collect()
        })
        .collect()
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Creates a boolean pattern selecting a centred rectangle.
///
/// The rectangle covers rows `rows/4 .. 3*rows/4` and the same fraction of
/// columns.
pub fn create_center_selection(rows: usize, cols: usize) -> Vec<Vec<bool>> {
    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    row >= rows / 4 && row < 3 * rows / 4 && col >= cols / 4 && col < 3 * cols / 4
                })
                .collect()
        })
        .collect()
}
