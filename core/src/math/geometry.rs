/// Euclidean distance between two points in 3D.
pub fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Magnitude of the horizontal (x, y) component.
pub fn planar_norm(x: f64, y: f64) -> f64 {
    x.hypot(y)
}
