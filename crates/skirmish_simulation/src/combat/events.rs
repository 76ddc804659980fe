//! Combat events (для UI, звуков, эффектов и тестов)

use bevy::prelude::*;

/// Атака стартовала (WindUp)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackStarted {
    pub attacker: Entity,
    pub target: Entity,
    /// Время старта (SimClock)
    pub at: f32,
    /// Когда сработает hit frame
    pub hit_at: f32,
    /// Когда сработает ResetAttack
    pub recover_at: f32,
}

/// Attack cycle завершён (ResetAttack отработал)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackFinished {
    pub attacker: Entity,
    pub at: f32,
}

/// Событие: урон нанесен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    /// Время применения (SimClock)
    pub at: f32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Player взаимодействовал с предметом (`interact(invoker)` для внешнего слоя)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ItemInteracted {
    pub item: Entity,
    pub invoker: Entity,
}

/// Вид косметического эффекта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Попадание (над целью)
    Hit,
    /// Маркер клика (над точкой выбора)
    Click,
}

/// Fire-and-forget запрос эффекта (никогда не влияет на state)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EffectRequested {
    pub kind: EffectKind,
    pub position: Vec3,
}

/// Система: ротация буферов combat событий (TickSet::Clock, конец тика)
///
/// `step_simulation` не проходит через `First` schedule, поэтому Bevy сам
/// события не чистит. Двойной буфер: событие живёт до конца следующего тика,
/// внешний читатель должен вычитывать события каждый тик.
pub fn update_combat_events(
    mut started: ResMut<Events<AttackStarted>>,
    mut finished: ResMut<Events<AttackFinished>>,
    mut damage: ResMut<Events<DamageDealt>>,
    mut died: ResMut<Events<EntityDied>>,
    mut items: ResMut<Events<ItemInteracted>>,
    mut effects: ResMut<Events<EffectRequested>>,
) {
    started.update();
    finished.update();
    damage.update();
    died.update();
    items.update();
    effects.update();
}
