//! CollisionWorld — граница с physics backend host engine
//!
//! Симуляция не считает коллизии сама: ground probe, move-with-collision и
//! контакт тел делегируются реализации `CollisionWorld`. Headless режим
//! использует `FlatGround` (плоскость + опциональная круглая арена).

use bevy::prelude::*;

/// Physics collaborator (host engine или headless заглушка)
pub trait CollisionWorld: Send + Sync {
    /// Луч вниз из `origin` длиной `max_distance`; Some(точка контакта) или None
    fn probe_ground(&self, origin: Vec3, max_distance: f32) -> Option<Vec3>;

    /// Применить смещение с разрешением коллизий, вернуть новую позицию
    fn move_with_collision(&self, position: Vec3, displacement: Vec3) -> Vec3;

    /// Касаются ли тела с центрами `a` и `b`
    fn bodies_touch(&self, a: Vec3, b: Vec3, contact_radius: f32) -> bool {
        a.distance(b) <= contact_radius
    }
}

/// Resource: активный physics backend
#[derive(Resource)]
pub struct PhysicsWorld(pub Box<dyn CollisionWorld>);

impl PhysicsWorld {
    pub fn new(world: impl CollisionWorld + 'static) -> Self {
        Self(Box::new(world))
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(FlatGround::default())
    }
}

impl std::ops::Deref for PhysicsWorld {
    type Target = dyn CollisionWorld;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Headless мир: пол на высоте `height`, стены арены радиусом `arena_radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    pub height: f32,
    pub arena_radius: Option<f32>,
}

impl Default for FlatGround {
    fn default() -> Self {
        Self {
            height: 0.0,
            arena_radius: None,
        }
    }
}

impl CollisionWorld for FlatGround {
    fn probe_ground(&self, origin: Vec3, max_distance: f32) -> Option<Vec3> {
        let drop = origin.y - self.height;
        if (0.0..=max_distance).contains(&drop) {
            Some(Vec3::new(origin.x, self.height, origin.z))
        } else {
            None
        }
    }

    fn move_with_collision(&self, position: Vec3, displacement: Vec3) -> Vec3 {
        let mut next = position + displacement;

        // Пол непроницаем
        next.y = next.y.max(self.height);

        // Стена арены: обрезаем горизонтальную часть по радиусу
        if let Some(radius) = self.arena_radius {
            let flat = Vec2::new(next.x, next.z);
            if flat.length() > radius {
                let clamped = flat.normalize_or_zero() * radius;
                next.x = clamped.x;
                next.z = clamped.y;
            }
        }

        next
    }
}
