use std::collections::HashMap;

use bevy::prelude::*;

use crate::combat::{CombatTarget, DamageDealt, EntityDied};
use crate::components::{Dead, Health};

/// Система: регистрация смертей (TickSet::Timers, после fire_due_timers)
///
/// Любой путь к health == 0 (hit frame или внешний `Health::take_damage`)
/// даёт ровно один EntityDied. Killer берётся из DamageDealt этого тика,
/// для внешнего урона killer = None.
pub fn detect_deaths(
    mut damage_events: EventReader<DamageDealt>,
    changed: Query<(Entity, &Health), (Changed<Health>, Without<Dead>)>,
    mut died_events: EventWriter<EntityDied>,
) {
    let killers: HashMap<Entity, Entity> = damage_events
        .read()
        .filter(|hit| hit.target_died)
        .map(|hit| (hit.target, hit.attacker))
        .collect();

    // Детерминированный порядок событий
    let mut dead: Vec<Entity> = changed
        .iter()
        .filter(|(_, health)| !health.is_alive())
        .map(|(entity, _)| entity)
        .collect();
    dead.sort_by_key(|entity| entity.index());

    for entity in dead {
        died_events.write(EntityDied {
            entity,
            killer: killers.get(&entity).copied(),
        });
    }
}

/// Система: обработка смертей
///
/// Вешает маркер Dead и сбрасывает CombatTarget у всех, кто целился в мёртвого.
/// Pending DealDamage по мёртвой цели и так no-op (перепроверка при срабатывании).
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut targets: Query<&mut CombatTarget>,
) {
    for event in death_events.read() {
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }

        for mut target in targets.iter_mut() {
            if target.is(event.entity) {
                target.clear();
            }
        }

        crate::log_info(&format!(
            "☠️ Entity {:?} killed by {:?}",
            event.entity, event.killer
        ));
    }
}
