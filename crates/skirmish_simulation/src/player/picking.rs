//! Picking service + pointer input (внешний слой → симуляция)
//!
//! Симуляция не знает про камеру и физику: screen point → hit резолвит
//! `Picker`, подложенный хостом (raycast в клиенте, замыкание в тестах).

use bevy::prelude::*;

/// Результат pick'а по screen point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickHit {
    /// Попали в землю / статичную геометрию
    Ground(Vec3),
    /// Попали в entity (interactable или нет - решает selection)
    Object { entity: Entity, point: Vec3 },
}

impl PickHit {
    pub fn point(&self) -> Vec3 {
        match *self {
            PickHit::Ground(point) => point,
            PickHit::Object { point, .. } => point,
        }
    }
}

/// Picking service: screen point → world hit
pub trait Picker: Send + Sync + 'static {
    fn pick(&self, screen_point: Vec2) -> Option<PickHit>;
}

impl<F> Picker for F
where
    F: Fn(Vec2) -> Option<PickHit> + Send + Sync + 'static,
{
    fn pick(&self, screen_point: Vec2) -> Option<PickHit> {
        self(screen_point)
    }
}

/// Resource: активный picking backend
#[derive(Resource)]
pub struct PickingBackend(Box<dyn Picker>);

impl PickingBackend {
    pub fn new(picker: impl Picker) -> Self {
        Self(Box::new(picker))
    }

    pub fn pick(&self, screen_point: Vec2) -> Option<PickHit> {
        self.0.pick(screen_point)
    }
}

/// Resource: состояние select кнопки (пишется input слоем каждый кадр)
///
/// `pressed_this_frame` потребляется `player_select_input` (сбрасывается в false).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pub screen_point: Vec2,
    pub pressed_this_frame: bool,
    pub held: bool,
}

impl PointerInput {
    /// Свежее нажатие в точке
    pub fn press(&mut self, screen_point: Vec2) {
        self.screen_point = screen_point;
        self.pressed_this_frame = true;
        self.held = true;
    }

    pub fn release(&mut self) {
        self.pressed_this_frame = false;
        self.held = false;
    }
}
