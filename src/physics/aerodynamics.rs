use nalgebra::Vector2;

/// Dynamic pressure q = 0.5 * rho * v^2.
pub fn dynamic_pressure(density: f64, speed: f64) -> f64 {
    0.5 * density * speed * speed
}

/// Planar drag force `[horizontal, vertical]`, opposing the velocity vector.
///
/// Magnitude D = q * Cd * A. At exactly zero speed the direction is undefined
/// and the drag contribution is the zero vector.
pub fn drag_force(vel: &Vector2<f64>, density: f64, cd: f64, area: f64) -> Vector2<f64> {
    let speed = vel.norm();
    if speed > 0.0 {
        let drag_mag = dynamic_pressure(density, speed) * cd * area;
        -(vel / speed) * drag_mag
    } else {
        Vector2::zeros()
    }
}
