//! Tests for AttackScheduler.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::combat::scheduler::{AttackScheduler, ResumeContext, SchedulerPhase, SchedulerTiming};
    use crate::error::CombatError;

    const TICK: Duration = Duration::from_nanos(16_666_667); // 60 Hz

    const ALIVE: ResumeContext = ResumeContext {
        self_dead: false,
        target_available: true,
    };

    /// Тикает scheduler `seconds` и возвращает моменты (сек) каждой атаки
    fn run_for(
        scheduler: &mut AttackScheduler,
        seconds: f32,
        context: ResumeContext,
        rng: &mut ChaCha8Rng,
    ) -> Vec<f32> {
        let timing = SchedulerTiming::default();
        let ticks = (seconds / TICK.as_secs_f32()).ceil() as usize;
        let mut fired_at = Vec::new();

        for tick in 1..=ticks {
            if scheduler.tick(TICK, context, &timing, rng).is_some() {
                fired_at.push(tick as f32 * TICK.as_secs_f32());
            }
        }

        fired_at
    }

    #[test]
    fn test_scheduler_starts_idle() {
        let scheduler = AttackScheduler::default();
        assert!(!scheduler.is_scheduled());
        assert!(matches!(scheduler.phase(), SchedulerPhase::Idle));
        assert_eq!(scheduler.current_attack(), None);
    }

    #[test]
    fn test_stop_right_after_start_fires_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();

        scheduler.start(0.6, &timing, &mut rng).unwrap();
        assert!(scheduler.stop());

        let fired = run_for(&mut scheduler, 10.0, ALIVE, &mut rng);
        assert!(fired.is_empty());
        assert_eq!(scheduler.attacks_fired(), 0);
    }

    #[test]
    fn test_double_start_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();

        let run_id = scheduler.start(0.6, &timing, &mut rng).unwrap();
        assert_eq!(
            scheduler.start(0.6, &timing, &mut rng),
            Err(CombatError::SchedulerAlreadyRunning { run_id })
        );

        // Всё ещё одна и та же run
        assert_eq!(scheduler.run_id(), Some(run_id));
    }

    #[test]
    fn test_stop_is_idempotent_and_restart_gets_new_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();

        assert!(!scheduler.stop());

        let first = scheduler.start(0.6, &timing, &mut rng).unwrap();
        assert!(scheduler.stop());
        assert!(!scheduler.stop());

        let second = scheduler.start(0.6, &timing, &mut rng).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_first_attack_after_initial_delay() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let timing = SchedulerTiming::default();
            let mut scheduler = AttackScheduler::default();
            scheduler.start(0.6, &timing, &mut rng).unwrap();

            let fired = run_for(&mut scheduler, 2.1, ALIVE, &mut rng);
            let first = fired.first().copied().expect("attack within initial delay bound");
            assert!(
                (0.5..=2.0 + TICK.as_secs_f32()).contains(&first),
                "seed {seed}: first attack at {first}"
            );
        }
    }

    #[test]
    fn test_attack_lands_in_cadence_window() {
        // Окно [0.5 + cadence_min, 2.0 + cadence_max]
        let cadence = 0.6;
        let window_start = 0.5 + cadence * 0.8;
        let window_end = 2.0 + cadence * 1.2;

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(100 + seed);
            let timing = SchedulerTiming::default();
            let mut scheduler = AttackScheduler::default();
            scheduler.start(cadence, &timing, &mut rng).unwrap();

            let fired = run_for(&mut scheduler, window_end + 0.1, ALIVE, &mut rng);
            assert!(
                fired
                    .iter()
                    .any(|&t| t >= window_start && t <= window_end + TICK.as_secs_f32()),
                "seed {seed}: attacks at {fired:?}"
            );
        }
    }

    #[test]
    fn test_jittered_intervals_within_bounds() {
        let cadence = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();
        scheduler.start(cadence, &timing, &mut rng).unwrap();

        let fired = run_for(&mut scheduler, 20.0, ALIVE, &mut rng);
        assert!(fired.len() > 5);

        let tolerance = TICK.as_secs_f32() * 1.5;
        for pair in fired.windows(2) {
            let interval = pair[1] - pair[0];
            assert!(
                interval >= cadence * 0.8 - tolerance && interval <= cadence * 1.2 + tolerance,
                "interval {interval} outside jitter bounds"
            );
        }
    }

    #[test]
    fn test_target_death_ends_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();
        scheduler.start(0.6, &timing, &mut rng).unwrap();

        let target_dead = ResumeContext {
            self_dead: false,
            target_available: false,
        };
        let fired = run_for(&mut scheduler, 3.0, target_dead, &mut rng);

        assert!(fired.is_empty());
        assert!(!scheduler.is_scheduled(), "run must return to Idle on resumption");
    }

    #[test]
    fn test_self_death_ends_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();
        scheduler.start(0.6, &timing, &mut rng).unwrap();

        let fired = run_for(&mut scheduler, 1.0, ALIVE, &mut rng);
        let before = fired.len();

        let self_dead = ResumeContext {
            self_dead: true,
            target_available: true,
        };
        let after = run_for(&mut scheduler, 5.0, self_dead, &mut rng);

        assert!(after.is_empty());
        assert!(!scheduler.is_scheduled());
        assert_eq!(scheduler.attacks_fired() as usize, before);
    }

    #[test]
    fn test_current_attack_slot_overwritten() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();
        scheduler.start(0.3, &timing, &mut rng).unwrap();

        let mut last = None;
        for _ in 0..600 {
            if let Some(attack) = scheduler.tick(TICK, ALIVE, &timing, &mut rng) {
                last = Some(attack);
                assert_eq!(scheduler.current_attack(), Some(attack));
            }
        }
        assert!(last.is_some());
    }

    #[test]
    fn test_reset_clears_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let timing = SchedulerTiming::default();
        let mut scheduler = AttackScheduler::default();
        scheduler.start(0.3, &timing, &mut rng).unwrap();
        run_for(&mut scheduler, 3.0, ALIVE, &mut rng);
        assert!(scheduler.current_attack().is_some());

        scheduler.reset();
        assert!(!scheduler.is_scheduled());
        assert_eq!(scheduler.current_attack(), None);
    }
}
