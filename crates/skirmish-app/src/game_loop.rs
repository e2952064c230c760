//! Battle loop: steps the engine until the tick budget runs out or only one
//! team is left standing, optionally paced to wall-clock time.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use log::info;

use skirmish_core::constants::TICK_RATE;
use skirmish_core::events::SimEvent;
use skirmish_core::state::SimSnapshot;
use skirmish_sim::engine::SimulationEngine;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Upper bound on ticks to run.
    pub max_ticks: u64,
    /// Sleep between ticks so the battle runs at wall-clock speed.
    pub realtime: bool,
}

/// Running totals over the whole battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleTally {
    pub shots: u32,
    pub hits: u32,
    pub kills: u32,
    pub crates_dropped: u32,
    pub crates_collected: u32,
}

impl BattleTally {
    fn record(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::ShellFired { .. } => self.shots += 1,
                SimEvent::TankHit { .. } => self.hits += 1,
                SimEvent::TankDestroyed { .. } => self.kills += 1,
                SimEvent::AmmoDropped { .. } => self.crates_dropped += 1,
                SimEvent::AmmoCollected { .. } => self.crates_collected += 1,
                SimEvent::TankStateChanged { .. } => {}
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BattleOutcome {
    pub ticks: u64,
    /// The only team with tanks left, if the battle was decided.
    pub winner: Option<u32>,
    pub tally: BattleTally,
    pub last: SimSnapshot,
}

/// Step `engine` until `options.max_ticks` or until a single team survives.
pub fn run_battle(engine: &mut SimulationEngine, options: &LoopOptions) -> BattleOutcome {
    let mut tally = BattleTally::default();
    let mut last = SimSnapshot::default();
    let mut teams = BTreeSet::new();
    let mut winner = None;
    let mut ticks = 0;
    let mut next_tick_time = Instant::now();

    while ticks < options.max_ticks {
        last = engine.step();
        ticks += 1;
        tally.record(&last.events);
        teams.extend(last.tanks.iter().map(|tank| tank.team));

        winner = decided(&last, &teams);
        if let Some(team) = winner {
            info!("team {team} wins after {:.1}s", last.time.elapsed_secs);
            break;
        }

        if options.realtime {
            pace(&mut next_tick_time, engine.time_scale());
        }
    }

    BattleOutcome {
        ticks,
        winner,
        tally,
        last,
    }
}

/// The single surviving team, once at least two teams have taken part.
fn decided(snapshot: &SimSnapshot, teams: &BTreeSet<u32>) -> Option<u32> {
    if teams.len() < 2 {
        return None;
    }
    let mut alive = teams.iter().filter(|&&team| snapshot.survivors(team) > 0);
    match (alive.next(), alive.next()) {
        (Some(&team), None) => Some(team),
        _ => None,
    }
}

/// Sleep until the next tick is due, scaled by the engine's time scale.
fn pace(next_tick_time: &mut Instant, time_scale: f32) {
    let effective_tick_duration = if time_scale > 0.001 {
        TICK_DURATION.div_f64(f64::from(time_scale))
    } else {
        TICK_DURATION
    };

    *next_tick_time += effective_tick_duration;
    let now = Instant::now();
    if *next_tick_time > now {
        std::thread::sleep(*next_tick_time - now);
    } else if now - *next_tick_time > effective_tick_duration * 2 {
        // Too far behind; reset rather than catch up.
        *next_tick_time = now;
    }
}

/// One status line per tank for the end-of-battle report.
pub fn summary_lines(snapshot: &SimSnapshot) -> Vec<String> {
    snapshot
        .tanks
        .iter()
        .map(|tank| {
            format!(
                "{:<6} team {} {:<12} {:>4} HP  {:<8} {:>2} shots  {:>2} rounds left",
                tank.name,
                tank.team,
                tank.template,
                tank.hp,
                tank.state.label(),
                tank.shots_fired,
                tank.ammunition,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::commands::SimCommand;
    use skirmish_core::enums::TankState;
    use skirmish_sim::engine::SimConfig;
    use skirmish_sim::scenario::Scenario;

    fn skirmish() -> SimulationEngine {
        SimulationEngine::with_scenario(SimConfig::default(), &Scenario::default()).unwrap()
    }

    #[test]
    fn test_tick_duration_constant() {
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_runs_to_tick_budget() {
        let mut engine = skirmish();
        let outcome = run_battle(
            &mut engine,
            &LoopOptions {
                max_ticks: 30,
                realtime: false,
            },
        );
        assert_eq!(outcome.ticks, 30);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.last.time.tick, 30);
        assert_eq!(outcome.tally.shots, 0, "nobody fires before StartAll");
    }

    #[test]
    fn test_stops_when_one_team_remains() {
        let mut engine = skirmish();
        let team_one: Vec<_> = engine
            .step()
            .tanks
            .iter()
            .filter(|tank| tank.team == 1)
            .map(|tank| tank.uid)
            .collect();
        for uid in team_one {
            engine.context_mut().hit_tank(uid, 1_000);
        }
        engine.queue_command(SimCommand::StartAll);

        let outcome = run_battle(
            &mut engine,
            &LoopOptions {
                max_ticks: 600,
                realtime: false,
            },
        );
        assert_eq!(outcome.winner, Some(0));
        assert_eq!(outcome.ticks, 1);
        assert_eq!(outcome.tally.kills, 2);
        assert!(outcome
            .last
            .tanks
            .iter()
            .filter(|tank| tank.team == 1)
            .all(|tank| tank.state == TankState::Dead));
    }

    #[test]
    fn test_summary_has_a_line_per_tank() {
        let mut engine = skirmish();
        let lines = summary_lines(&engine.step());
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("A-1"));
        assert!(lines[0].contains("Rogue Scout"));
        assert!(lines[3].contains("Inactive"));
    }
}
