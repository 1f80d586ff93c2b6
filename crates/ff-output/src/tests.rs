//! Integration tests for ff-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, DAILY_HEADERS, STEP_HEADERS};
    use crate::row::{DailyRow, StepRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn step_row(step: u64) -> StepRow {
        StepRow {
            step,
            day:            step / 24,
            step_in_day:    (step % 24) as u32,
            healthy:        90,
            infected:       8,
            recovered:      2,
            dead:           0,
            new_infections: 1,
            quarantined:    3,
            productivity:   0.75,
            reward:         1.3,
            action_cost:    0.0,
            tested:         10,
            positives:      2,
            shift_changed:  true,
        }
    }

    fn daily_row(day: u64) -> DailyRow {
        DailyRow {
            day,
            new_infections:    4,
            healthy:           90,
            infected:          8,
            recovered:         2,
            dead:              0,
            quarantined:       3,
            productivity:      0.5,
            mean_productivity: 0.625,
            cumulative_reward: 12.0,
        }
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(headers(&dir.path().join("steps.csv")), STEP_HEADERS);
        assert_eq!(headers(&dir.path().join("daily.csv")), DAILY_HEADERS);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("steps.csv").exists());
    }

    #[test]
    fn step_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_step(&step_row(1)).unwrap();
        w.write_step(&step_row(2)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[1][0], "2");
        assert_eq!(&rows[0][9], "0.75"); // productivity
        assert_eq!(&rows[0][14], "1"); // shift_changed
    }

    #[test]
    fn daily_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_day(&daily_row(0)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("daily.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "4");
        assert_eq!(&rows[0][8], "0.625");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use ff_core::EnvConfig;
    use ff_sim::FactoryEnvironment;

    use crate::{CsvWriter, EnvOutputObserver};

    fn config(max_steps: u64) -> EnvConfig {
        EnvConfig {
            width: 12,
            height: 12,
            num_agents: 40,
            max_steps,
            seed: 3,
            ..EnvConfig::default()
        }
    }

    fn count_rows(path: &std::path::Path) -> usize {
        csv::Reader::from_path(path).unwrap().records().count()
    }

    #[test]
    fn run_writes_one_row_per_step_and_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = FactoryEnvironment::standard(config(48)).unwrap();
        let mut obs = EnvOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let steps = env.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        assert_eq!(count_rows(&dir.path().join("steps.csv")), steps as usize);
        assert_eq!(count_rows(&dir.path().join("daily.csv")), env.stats.daily_stats().len());
    }

    #[test]
    fn manual_stepping_then_finish() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = FactoryEnvironment::standard(config(200)).unwrap();
        let mut obs = EnvOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        for _ in 0..24 {
            env.step_observed(None, &mut obs).unwrap();
        }
        obs.finish().unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(count_rows(&dir.path().join("steps.csv")), 24);
        assert_eq!(count_rows(&dir.path().join("daily.csv")), 1);
    }
}
