//! Spawn policy: сколько гоблинов и где (annulus вокруг игрока)

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

/// Случайная точка на кольце [inner, outer] вокруг `center` (горизонтально)
///
/// Угол равномерный, радиус равномерный в [inner, outer].
/// Высота = высота центра (дальше гоблина ставит ground probe).
pub fn annulus_point<R: Rng + ?Sized>(center: Vec3, inner: f32, outer: f32, rng: &mut R) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = if outer > inner {
        rng.gen_range(inner..=outer)
    } else {
        inner
    };

    center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

/// `count` точек спавна (порядок = порядок спавна)
pub fn spawn_points<R: Rng + ?Sized>(
    center: Vec3,
    count: usize,
    inner: f32,
    outer: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    (0..count)
        .map(|_| annulus_point(center, inner, outer, rng))
        .collect()
}

/// Случайное количество гоблинов в [min, max]
pub fn spawn_count<R: Rng + ?Sized>(min: u32, max: u32, rng: &mut R) -> u32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}
