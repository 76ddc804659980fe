//! Virtual clock для SimulationTick

use bevy::prelude::*;

/// Виртуальные часы симуляции
///
/// Тик выполняется "в момент" `elapsed`, затем `advance_clock` сдвигает время
/// на `delta`. Отложенные действия с fire_at ≤ elapsed срабатывают в начале тика.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    /// Текущее время симуляции (секунды)
    pub elapsed: f32,
    /// Длительность текущего тика (секунды)
    pub delta: f32,
    /// Номер текущего тика
    pub tick: u64,
}

impl SimClock {
    pub fn advance(&mut self) {
        self.elapsed += self.delta;
        self.tick = self.tick.wrapping_add(1); // Wraparound safe
    }
}

/// System: продвинуть часы (TickSet::Clock, последней в тике)
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates_delta() {
        let mut clock = SimClock {
            delta: 1.0 / 64.0,
            ..Default::default()
        };

        for _ in 0..64 {
            clock.advance();
        }

        // 1/64 точно представимо - без дрейфа
        assert_eq!(clock.elapsed, 1.0);
        assert_eq!(clock.tick, 64);
    }
}
