pub mod core {
    pub mod car;
    pub mod driver;
    pub mod handle_race;
    pub mod race;
    pub mod race_entry;
    pub mod strategy;
    pub mod team;
    pub mod tire_compound;
    pub mod track;
}
pub mod interfaces {
    pub mod live_interface;
}
pub mod post {
    pub mod race_result;
    pub mod race_summary;
}
pub mod pre {
    pub mod check_sim_opts_pars;
    pub mod read_sim_pars;
    pub mod sim_opts;
}



#[cfg(test)]
mod race_entry_tests {
    use crate::core::car::CarStats;
    use crate::core::race_entry::{calc_tire_penalty, RaceEntry, T_DNF_PENALTY};
    use crate::core::track::Track;
    use crate::test_pars::{driver_pars, entry_pars, stint, track_pars};
    use approx::{assert_relative_eq, assert_ulps_eq};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tire_penalty_1() {
        assert_ulps_eq!(calc_tire_penalty(0.0), 0.0);
        assert_ulps_eq!(calc_tire_penalty(30.0), 0.5);
        assert_ulps_eq!(calc_tire_penalty(60.0), 1.0);
    }
    #[test]
    fn test_tire_penalty_2() {
        // saturated cliff at 100% wear
        assert_relative_eq!(
            calc_tire_penalty(100.0),
            1.0 + 40.0_f64.powf(1.35) / 15.0,
            epsilon = 1e-9
        );
        assert!(calc_tire_penalty(100.0) > 3.9 && calc_tire_penalty(100.0) < 4.1);
    }
    #[test]
    fn test_tire_penalty_3() {
        // imminent failure beyond 105% wear
        assert_relative_eq!(
            calc_tire_penalty(106.0),
            1.0 + 40.0_f64.powf(1.35) / 15.0 + 5.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            calc_tire_penalty(106.0) - calc_tire_penalty(105.0),
            5.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_laptime_tire_penalty() {
        let track = Track::new(&track_pars(10));
        let mut entry = RaceEntry::new(&entry_pars(
            driver_pars("A", 100, 100),
            CarStats::default(),
            vec![stint("Soft", 10)],
        ));
        let mut rng = StdRng::seed_from_u64(1);

        let t_fresh = entry.calc_laptime(&track, &mut rng);
        entry.tire_wear = 106.0;
        let t_worn = entry.calc_laptime(&track, &mut rng);

        assert_relative_eq!(
            t_worn - t_fresh,
            1.0 + 40.0_f64.powf(1.35) / 15.0 + 5.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_empty_strategy() {
        let entry = RaceEntry::new(&entry_pars(
            driver_pars("A", 80, 80),
            CarStats::default(),
            vec![],
        ));
        assert_eq!(entry.compound.name, "Hard");
        assert_eq!(entry.target_laps, 100);
        assert_eq!(entry.get_stints_remaining(), 0);
    }
    #[test]
    fn test_unknown_compound() {
        let entry = RaceEntry::new(&entry_pars(
            driver_pars("A", 80, 80),
            CarStats::default(),
            vec![stint("Ultrasoft", 12), stint("Medium", 20)],
        ));
        assert_eq!(entry.compound.name, "Hard");
        assert_eq!(entry.target_laps, 12);
        assert_eq!(entry.get_stints_remaining(), 1);
    }

    #[test]
    fn test_scheduled_pitstop() {
        let track = Track::new(&track_pars(10));
        let mut entry = RaceEntry::new(&entry_pars(
            driver_pars("A", 100, 100),
            CarStats::default(),
            vec![stint("Soft", 1), stint("Hard", 10)],
        ));
        let mut rng = StdRng::seed_from_u64(2);

        entry.drive_lap(&track, &mut rng);

        assert_eq!(entry.pit_stops, 1);
        assert_ulps_eq!(entry.tire_wear, 0.0);
        assert_eq!(entry.stint_laps, 0);
        assert_eq!(entry.compound.name, "Hard");
        assert_eq!(entry.target_laps, 10);
        assert_eq!(entry.get_stints_remaining(), 0);
        assert_relative_eq!(entry.cur_laptime, 87.2 + 22.0, epsilon = 1e-9);
        assert_relative_eq!(entry.racetime, 87.2 + 22.0, epsilon = 1e-9);
    }
    #[test]
    fn test_emergency_pitstop() {
        let track = Track::new(&track_pars(10));
        let mut entry = RaceEntry::new(&entry_pars(
            driver_pars("A", 100, 100),
            CarStats::default(),
            vec![stint("Soft", 50), stint("Hard", 10)],
        ));
        let mut rng = StdRng::seed_from_u64(3);

        // 99.0 + 3.78 -> beyond the emergency threshold but below the failure risk
        entry.tire_wear = 99.0;
        entry.drive_lap(&track, &mut rng);

        assert_eq!(entry.pit_stops, 1);
        assert_ulps_eq!(entry.tire_wear, 0.0);
        assert_eq!(entry.stint_laps, 0);
        assert_eq!(entry.compound.name, "Hard");
        assert_relative_eq!(
            entry.cur_laptime,
            90.0 - 2.0 + calc_tire_penalty(99.0) - 0.8 + 25.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_no_stints_left() {
        let track = Track::new(&track_pars(10));
        let mut entry = RaceEntry::new(&entry_pars(
            driver_pars("A", 100, 100),
            CarStats::default(),
            vec![stint("Hard", 1)],
        ));
        let mut rng = StdRng::seed_from_u64(4);

        entry.tire_wear = 99.0;
        let t_before = entry.calc_laptime(&track, &mut rng);
        entry.drive_lap(&track, &mut rng);

        // beyond 100% wear but no pit stop possible, the tires keep degrading
        assert!(entry.check_pitstop().is_none());
        assert_eq!(entry.pit_stops, 0);
        assert_relative_eq!(entry.tire_wear, 99.0 + 2.1 * 0.8, epsilon = 1e-9);
        assert!(!entry.dnf);
        assert!(entry.calc_laptime(&track, &mut rng) > t_before);
    }

    #[test]
    fn test_dnf() {
        let track = Track::new(&track_pars(300));
        let mut entry = RaceEntry::new(&entry_pars(
            driver_pars("A", 100, 100),
            CarStats::default(),
            vec![stint("Soft", 1)],
        ));
        let mut rng = StdRng::seed_from_u64(5);

        entry.tire_wear = 120.0;
        for _ in 0..200 {
            entry.drive_lap(&track, &mut rng);
            if entry.dnf {
                break;
            }
        }
        assert!(entry.dnf);
        assert_ulps_eq!(entry.cur_laptime, 0.0);

        // a retired car only collects the penalty
        let racetime = entry.racetime;
        let tire_wear = entry.tire_wear;
        entry.drive_lap(&track, &mut rng);
        entry.drive_lap(&track, &mut rng);
        assert!(entry.dnf);
        assert_relative_eq!(entry.racetime, racetime + 2.0 * T_DNF_PENALTY, epsilon = 1e-9);
        assert_ulps_eq!(entry.tire_wear, tire_wear);
    }
}


#[cfg(test)]
mod race_tests {
    use crate::core::car::CarStats;
    use crate::core::handle_race::handle_race;
    use crate::core::race::Race;
    use crate::post::race_result::Interval;
    use crate::post::race_summary::RaceSummary;
    use crate::test_pars::{driver_pars, entry_pars, stint, track_pars, uniform_car};
    use approx::{assert_relative_eq, assert_ulps_eq};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_entries() -> Vec<crate::core::race_entry::EntryPars> {
        vec![
            entry_pars(
                driver_pars("Slow", 60, 90),
                uniform_car(60),
                vec![stint("Medium", 20), stint("Hard", 40)],
            ),
            entry_pars(
                driver_pars("Fast", 95, 95),
                uniform_car(90),
                vec![stint("Medium", 25), stint("Hard", 35)],
            ),
            entry_pars(
                driver_pars("Reckless", 85, 40),
                uniform_car(80),
                vec![stint("Soft", 60)],
            ),
            entry_pars(
                driver_pars("Steady", 80, 85),
                uniform_car(75),
                vec![stint("Hard", 60)],
            ),
        ]
    }

    #[test]
    fn test_single_lap_race() {
        let entries = vec![entry_pars(
            driver_pars("A", 100, 100),
            CarStats::default(),
            vec![stint("Soft", 1)],
        )];
        let mut rng = StdRng::seed_from_u64(10);
        let result = handle_race(&track_pars(1), &entries, &mut rng, None, 1.0).unwrap();

        assert_eq!(result.log.len(), 1);
        assert_eq!(result.standings.len(), 1);
        assert_relative_eq!(result.standings[0].total_time, 87.2, epsilon = 1e-9);
        assert_eq!(result.standings[0].stops, 0);
        assert!(!result.standings[0].dnf);

        let lap_standing = &result.log[0].standings[0];
        assert_relative_eq!(lap_standing.lap_time, 87.2, epsilon = 1e-9);
        assert_relative_eq!(lap_standing.wear, 3.78, epsilon = 1e-9);
        assert_eq!(lap_standing.interval, Interval::Gap(0.0));
        assert_eq!(lap_standing.compound, "Soft");
    }

    #[test]
    fn test_lap_and_race_times() {
        let entries = vec![entry_pars(
            driver_pars("A", 100, 100),
            CarStats::default(),
            vec![stint("Soft", 1)],
        )];
        let mut rng = StdRng::seed_from_u64(10);
        let result = handle_race(&track_pars(1), &entries, &mut rng, None, 1.0).unwrap();

        let (laptimes, racetimes) = result.get_lap_and_race_times();
        assert_eq!(laptimes, "lap, A\n  1,   87.200s\n");
        assert_eq!(racetimes, "lap, A\n  1,    87.200s\n");
    }

    #[test]
    fn test_qualifying() {
        let entries = vec![
            entry_pars(
                driver_pars("B", 50, 100),
                CarStats::default(),
                vec![stint("Hard", 5)],
            ),
            entry_pars(
                driver_pars("A", 100, 100),
                CarStats::default(),
                vec![stint("Hard", 5)],
            ),
        ];
        let mut race = Race::new(&track_pars(5), &entries);
        let mut rng = StdRng::seed_from_u64(11);
        let grid = race.qualifying(&mut rng);

        assert_eq!(grid[0].driver, "A");
        assert_eq!(grid[1].driver, "B");
        assert_ulps_eq!(grid[0].time, 88.0);
        assert_ulps_eq!(grid[1].time, 89.0);

        // the grid determines the entry order, the race state stays untouched
        assert_eq!(race.entries[0].driver.name, "A");
        assert_eq!(race.cur_lap, 0);
        assert!(race.entries.iter().all(|x| x.tire_wear == 0.0));
    }

    #[test]
    fn test_standings_order() {
        let mut rng = StdRng::seed_from_u64(12);
        let result = handle_race(&track_pars(60), &grid_entries(), &mut rng, None, 1.0).unwrap();

        assert_eq!(result.log.len(), 60);
        assert_eq!(result.grid.len(), 4);

        for lap_standings in result.log.iter() {
            let dnfs: Vec<bool> = lap_standings
                .standings
                .iter()
                .map(|x| x.interval == Interval::Dnf)
                .collect();
            assert!(dnfs.windows(2).all(|x| x[0] <= x[1]));
        }

        let standings = &result.standings;
        assert!(standings.windows(2).all(|x| x[0].dnf <= x[1].dnf));
        assert!(standings
            .windows(2)
            .filter(|x| x[0].dnf == x[1].dnf)
            .all(|x| x[0].total_time <= x[1].total_time));
    }

    #[test]
    fn test_same_seed() {
        let mut rng_1 = StdRng::seed_from_u64(13);
        let mut rng_2 = StdRng::seed_from_u64(13);
        let result_1 = handle_race(&track_pars(30), &grid_entries(), &mut rng_1, None, 1.0).unwrap();
        let result_2 = handle_race(&track_pars(30), &grid_entries(), &mut rng_2, None, 1.0).unwrap();
        assert_eq!(result_1, result_2);
    }

    #[test]
    fn test_live_stream() {
        let (tx, rx) = flume::unbounded();
        let mut rng = StdRng::seed_from_u64(14);
        let result =
            handle_race(&track_pars(3), &grid_entries(), &mut rng, Some(&tx), 1000.0).unwrap();

        let lap_states: Vec<_> = rx.try_iter().collect();
        assert_eq!(lap_states.len(), 3);
        assert_eq!(lap_states[2].tot_no_laps, 3);
        assert_eq!(lap_states[2].lap_standings, result.log[2]);
    }

    #[test]
    fn test_race_summary() {
        let results: Vec<_> = (0..5)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(100 + i);
                handle_race(&track_pars(20), &grid_entries(), &mut rng, None, 1.0).unwrap()
            })
            .collect();
        let summary = RaceSummary::new(&results);

        assert_eq!(summary.no_sim_runs, 5);
        assert_eq!(summary.drivers.len(), 4);
        assert_eq!(summary.drivers.iter().map(|x| x.wins).sum::<u32>(), 5);
        assert_eq!(summary.drivers.iter().map(|x| x.podiums).sum::<u32>(), 15);
        assert!(summary
            .drivers
            .windows(2)
            .all(|x| x[0].avg_position <= x[1].avg_position));
    }

    #[test]
    fn test_interval_serialization() {
        assert_eq!(serde_json::to_string(&Interval::Dnf).unwrap(), "\"DNF\"");
        assert_eq!(serde_json::to_string(&Interval::Gap(1.5)).unwrap(), "1.5");
    }
}
