//! Headless симуляция Skirmish
//!
//! Запускает сценарий без рендера: player против кольца hostile.
//! Player "кликает" по ближайшему живому hostile раз в секунду (интервал в тиках
//! считается из tick_rate сценария).
//!
//! Usage: skirmish_simulation [scenario.ron]
//! Уровень логов: SKIRMISH_LOG=debug|info|warning|error (по умолчанию info)

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use skirmish_simulation::{
    create_headless_app, log_error, log_info, set_log_level, spawn_scenario, step_simulation,
    AttackStarted, CombatTimers, DamageDealt, EntityDied, Health, HostileAgent, LogLevel, PickHit,
    PickingBackend, PointerInput, ScenarioConfig,
};

/// Как часто player перевыбирает цель (секунды)
const RESELECT_INTERVAL: f32 = 1.0;

/// Счётчики событий за весь прогон
///
/// Буферы Events ротируются каждый тик, поэтому вычитываем после каждого тика.
#[derive(Default)]
struct EventTally {
    attacks: EventCursor<AttackStarted>,
    hits: EventCursor<DamageDealt>,
    deaths: EventCursor<EntityDied>,
    attack_count: usize,
    hit_count: usize,
    death_count: usize,
}

impl EventTally {
    fn record(&mut self, world: &World) {
        self.attack_count += self.attacks.read(world.resource::<Events<AttackStarted>>()).count();
        self.hit_count += self.hits.read(world.resource::<Events<DamageDealt>>()).count();
        self.death_count += self.deaths.read(world.resource::<Events<EntityDied>>()).count();
    }
}

fn main() {
    let level = std::env::var("SKIRMISH_LOG")
        .ok()
        .and_then(|value| LogLevel::parse(&value))
        .unwrap_or(LogLevel::Info);
    set_log_level(level);

    let config = match std::env::args().nth(1) {
        Some(path) => match ScenarioConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                // logger ещё не установлен (его ставит create_headless_app)
                eprintln!("Failed to load scenario '{}': {}", path, error);
                std::process::exit(1);
            }
        },
        None => ScenarioConfig::default(),
    };

    let mut app = create_headless_app(config.seed);
    log_info(&format!(
        "Starting Skirmish headless simulation (seed: {}, {} ticks @ {} Hz)",
        config.seed, config.ticks, config.tick_rate
    ));

    let entities = match spawn_scenario(app.world_mut(), &config) {
        Ok(entities) => entities,
        Err(error) => {
            log_error(&format!("Invalid scenario: {}", error));
            std::process::exit(1);
        }
    };

    let delta = config.tick_delta();
    let reselect_every = ticks_per_reselect(config.tick_rate);
    let mut tally = EventTally::default();

    for tick in 0..config.ticks {
        if tick % reselect_every == 0 {
            click_nearest_hostile(app.world_mut(), entities.player);
        }

        step_simulation(app.world_mut(), delta);
        tally.record(app.world());

        if tick % (reselect_every * 5) == 0 {
            let player_hp = app
                .world()
                .get::<Health>(entities.player)
                .map_or(0, |health| health.current);
            log_info(&format!(
                "Tick {}: player HP {}, hostiles alive {}",
                tick,
                player_hp,
                alive_hostiles(app.world_mut()).len()
            ));
        }
    }

    print_summary(app.world_mut(), entities.player, &tally);
}

/// Интервал перевыбора в тиках (tick_rate уже проверен spawn_scenario)
fn ticks_per_reselect(tick_rate: f32) -> u32 {
    ((RESELECT_INTERVAL * tick_rate).round() as u32).max(1)
}

/// Эмуляция клика: picking backend "попадает" в ближайшего живого hostile
fn click_nearest_hostile(world: &mut World, player: Entity) {
    let Some(origin) = world.get::<Transform>(player).map(|t| t.translation) else {
        return;
    };

    let nearest = alive_hostiles(world)
        .into_iter()
        .min_by(|(_, a), (_, b)| origin.distance(*a).total_cmp(&origin.distance(*b)));
    let Some((entity, point)) = nearest else {
        return;
    };

    world.insert_resource(PickingBackend::new(move |_screen: Vec2| {
        Some(PickHit::Object { entity, point })
    }));
    world.resource_mut::<PointerInput>().press(Vec2::ZERO);
}

fn alive_hostiles(world: &mut World) -> Vec<(Entity, Vec3)> {
    let mut query = world.query_filtered::<(Entity, &Transform, &Health), With<HostileAgent>>();
    let mut hostiles: Vec<_> = query
        .iter(world)
        .filter(|(_, _, health)| health.is_alive())
        .map(|(entity, transform, _)| (entity, transform.translation))
        .collect();
    hostiles.sort_by_key(|(entity, _)| entity.index());
    hostiles
}

fn print_summary(world: &mut World, player: Entity, tally: &EventTally) {
    let pending = world.resource::<CombatTimers>().len();
    let player_hp = world.get::<Health>(player).map_or(0, |health| health.current);
    let survivors = alive_hostiles(world).len();

    log_info("Simulation complete!");
    log_info(&format!(
        "Attacks: {}, hits: {}, deaths: {}, player HP: {}, hostiles alive: {}",
        tally.attack_count, tally.hit_count, tally.death_count, player_hp, survivors
    ));
    if pending > 0 {
        log_info(&format!("{} combat actions still pending at shutdown", pending));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reselect_interval_follows_tick_rate() {
        assert_eq!(ticks_per_reselect(64.0), 64);
        assert_eq!(ticks_per_reselect(30.0), 30);
        // Очень низкая частота - всё равно не реже одного раза в тик
        assert_eq!(ticks_per_reselect(0.25), 1);
    }
}
