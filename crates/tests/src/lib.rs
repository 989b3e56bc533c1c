//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! - Contract snapshot tests
//! - Worked feature scenarios against the public pipeline API
//! - Recording -> pipeline -> dispatcher -> sink flows

/// Shared fixtures
#[cfg(test)]
mod fixtures {
    use contracts::{DegeneratePolicy, ImuReading, PipelineConfig, SegmentationConfig};

    pub fn config(
        sampling_rate: f64,
        window_duration: f64,
        overlap_fraction: f64,
        degenerate_policy: DegeneratePolicy,
    ) -> PipelineConfig {
        PipelineConfig {
            segmentation: SegmentationConfig {
                sampling_rate,
                window_duration,
                overlap_fraction,
                start_window_id: 0,
            },
            degenerate_policy,
        }
    }

    /// 1 Hz recording with a gyroscope that is never degenerate
    pub fn walking(count: usize) -> Vec<ImuReading> {
        (0..count)
            .map(|i| {
                let t = i as f64;
                let phase = t * 0.7;
                ImuReading::new(
                    t,
                    t,
                    phase.sin(),
                    phase.cos(),
                    9.81 + 0.1 * phase.sin(),
                    0.3 + phase.cos(),
                    0.2 + phase.sin(),
                    0.05 * t,
                )
            })
            .collect()
    }

    /// CSV text for `readings`, in the recorder's column layout
    pub fn csv_text(readings: &[ImuReading]) -> String {
        let mut text =
            String::from("time,seconds_elapsed,accel_x,accel_y,accel_z,gyro_x,gyro_y,gyro_z\n");
        for r in readings {
            text.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                r.time,
                r.seconds_elapsed,
                r.accelerometer.x,
                r.accelerometer.y,
                r.accelerometer.z,
                r.gyroscope.x,
                r.gyroscope.y,
                r.gyroscope.z
            ));
        }
        text
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{ConfigVersion, FeatureBlueprint, WindowSummary};

    #[test]
    fn test_blueprint_defaults() {
        let blueprint = FeatureBlueprint::default();
        assert_eq!(blueprint.version, ConfigVersion::V1);
        assert_eq!(blueprint.segmentation.step_samples(), 980);
    }

    #[test]
    fn test_summary_column_order() {
        assert_eq!(
            WindowSummary::COLUMNS,
            [
                "window_id",
                "mean_accel_magnitude",
                "mean_gyro_magnitude",
                "min_accel_magnitude",
                "mean_gyro_energy",
                "mean_accel_energy",
                "gyro_angle_cosine",
                "gyro_z_std_dev",
            ]
        );
    }
}

#[cfg(test)]
mod scenario_tests {
    use contracts::{ContractError, DegeneratePolicy, GyroAxis, ImuReading, PipelineConfig};
    use feature_engine::FeaturePipeline;

    use crate::fixtures::{config, walking};

    fn pipeline(config: PipelineConfig) -> FeaturePipeline {
        FeaturePipeline::new(config).unwrap()
    }

    #[test]
    fn test_short_recording_fits_one_window() {
        let readings = vec![
            ImuReading::new(0.0, 0.0, 0.0, 0.0, 9.8, 0.1, 0.2, 0.0),
            ImuReading::new(1.0, 10.0, 0.0, 0.0, 9.8, 0.3, 0.1, 0.0),
            ImuReading::new(2.0, 19.0, 0.0, 0.0, 9.8, 0.2, 0.4, 0.0),
        ];
        let windows = pipeline(config(1.0, 20.0, 0.5, DegeneratePolicy::Flag))
            .extract_windows(&readings)
            .unwrap();

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].len(), 3);
        assert_eq!(windows[0].time_span(), Some((0.0, 19.0)));
    }

    #[test]
    fn test_orthogonal_gyro_channels() {
        let readings = vec![
            ImuReading::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0),
            ImuReading::new(1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0),
        ];
        let summaries = pipeline(config(1.0, 20.0, 0.5, DegeneratePolicy::Flag))
            .run(&readings)
            .unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].gyro_angle_cosine, Some(0.0));
    }

    #[test]
    fn test_zero_accelerometer() {
        let readings = vec![
            ImuReading::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.2, 0.1),
            ImuReading::new(1.0, 1.0, 0.0, 0.0, 0.0, 0.1, 0.7, 0.3),
            ImuReading::new(2.0, 2.0, 0.0, 0.0, 0.0, 0.4, 0.4, 0.2),
        ];
        let summaries = pipeline(config(1.0, 20.0, 0.5, DegeneratePolicy::Flag))
            .run(&readings)
            .unwrap();

        let summary = &summaries[0];
        assert_eq!(summary.mean_accel_energy, 0.0);
        assert_eq!(summary.min_accel_magnitude, 0.0);
        assert_eq!(summary.mean_accel_magnitude, 0.0);
        assert!(summary.mean_gyro_energy > 0.0);
    }

    #[test]
    fn test_empty_input() {
        let err = pipeline(PipelineConfig::default()).run(&[]).unwrap_err();
        assert!(matches!(err, ContractError::EmptyInput));
    }

    #[test]
    fn test_full_overlap_rejected() {
        let err = FeaturePipeline::new(config(98.0, 20.0, 1.0, DegeneratePolicy::Flag))
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidConfiguration { ref field, .. } if field.contains("overlap_fraction")
        ));
    }

    #[test]
    fn test_window_layout() {
        let mut cfg = config(1.0, 8.0, 0.5, DegeneratePolicy::Flag);
        cfg.segmentation.start_window_id = 100;

        let windows = pipeline(cfg).extract_windows(&walking(40)).unwrap();

        // Starts 0, 4, ..., 28; a start at 32 would need elapsed 40.
        assert_eq!(windows.len(), 8);
        for (k, window) in windows.iter().enumerate() {
            assert_eq!(window.id(), 100 + k as u64);
            assert_eq!(window.start_index(), 4 * k);
            assert_eq!(window.len(), 8);
        }
    }

    #[test]
    fn test_magnitudes_match_axes() {
        let readings = walking(12);
        let windows = pipeline(config(1.0, 4.0, 0.5, DegeneratePolicy::Flag))
            .extract_windows(&readings)
            .unwrap();

        for window in &windows {
            for sample in window.samples() {
                let a = sample.accelerometer();
                let expected = (a.x * a.x + a.y * a.y + a.z * a.z).sqrt();
                assert!((sample.accel_magnitude() - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_policies_on_flat_gyro() {
        // Gyro Y is zero across the whole second window (samples 4..12).
        let mut readings = walking(24);
        for r in &mut readings[4..12] {
            r.gyroscope.y = 0.0;
        }

        let flag = pipeline(config(1.0, 8.0, 0.5, DegeneratePolicy::Flag))
            .run(&readings)
            .unwrap();
        let skip = pipeline(config(1.0, 8.0, 0.5, DegeneratePolicy::Skip))
            .run(&readings)
            .unwrap();
        let fail = pipeline(config(1.0, 8.0, 0.5, DegeneratePolicy::Fail))
            .run(&readings)
            .unwrap_err();

        assert_eq!(flag[1].gyro_angle_cosine, None);
        assert_eq!(skip.len(), flag.len() - 1);
        assert!(skip.iter().all(|s| s.window_id != 1));
        assert_eq!(skip[1], flag[2]);
        assert!(matches!(
            fail,
            ContractError::DegenerateWindow {
                window_id: 1,
                axis: GyroAxis::Y
            }
        ));
    }

    #[test]
    fn test_deterministic_with_mock_source() {
        let readings = ingestion::MockSampleSource::seeded(2_000, 98.0, 7).generate();
        let again = ingestion::MockSampleSource::seeded(2_000, 98.0, 7).generate();
        assert_eq!(readings, again);

        let p = pipeline(config(98.0, 5.0, 0.5, DegeneratePolicy::Flag));
        let first = p.run(&readings).unwrap();
        let second = p.run(&again).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{DegeneratePolicy, InputFormat};

    const CONFIG: &str = r#"
version = "V1"

[segmentation]
sampling_rate = 50.0
window_duration = 4.0
overlap_fraction = 0.25
start_window_id = 3

[features]
degenerate_policy = "skip"

[input]
path = "walk.csv"

[[sinks]]
name = "console"
sink_type = "log"

[[sinks]]
name = "archive"
sink_type = "file"
queue_capacity = 16
[sinks.params]
path = "out/summaries.csv"
format = "csv"
"#;

    #[test]
    fn test_toml_json_round_trip() {
        let from_toml = ConfigLoader::load_from_str(CONFIG, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&from_toml).unwrap();
        let from_json = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();

        assert_eq!(from_toml.to_pipeline_config(), from_json.to_pipeline_config());
        assert_eq!(
            from_json.features.degenerate_policy,
            DegeneratePolicy::Skip
        );
        assert_eq!(from_json.sinks.len(), 2);
        assert_eq!(from_json.sinks[1].queue_capacity, 16);
        assert_eq!(from_json.sinks[1].param("format"), Some("csv"));

        let input = from_json.input.unwrap();
        assert_eq!(
            input.path.as_deref().and_then(InputFormat::from_path),
            Some(InputFormat::Csv)
        );
    }

    #[test]
    fn test_loaded_config_drives_pipeline() {
        let blueprint = ConfigLoader::load_from_str(CONFIG, ConfigFormat::Toml).unwrap();
        let pipeline = feature_engine::FeaturePipeline::new(blueprint.to_pipeline_config()).unwrap();
        assert_eq!(pipeline.segmenter().step_samples(), 50);
    }

    #[test]
    fn test_invalid_segmentation_rejected_at_load() {
        let err = ConfigLoader::load_from_str(
            "[segmentation]\nsampling_rate = 0.0\n",
            ConfigFormat::Toml,
        )
        .unwrap_err();
        assert!(err.to_string().contains("sampling_rate"), "got: {err}");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;

    use contracts::{
        DegeneratePolicy, SampleSource, SinkConfig, SinkType, WindowSummary,
    };
    use dispatcher::create_dispatcher;
    use feature_engine::FeaturePipeline;
    use ingestion::CsvSampleSource;
    use observability::FeatureMetricsAggregator;
    use tokio::sync::mpsc;

    use crate::fixtures::{config, csv_text, walking};

    fn file_sink(name: &str, path: &std::path::Path) -> SinkConfig {
        SinkConfig {
            name: name.to_string(),
            sink_type: SinkType::File,
            queue_capacity: 4,
            params: HashMap::from([("path".to_string(), path.display().to_string())]),
        }
    }

    async fn dispatch(summaries: &[WindowSummary], sinks: Vec<SinkConfig>) -> Vec<(String, u64)> {
        let (tx, rx) = mpsc::channel(8);
        let handle = create_dispatcher(sinks, rx).await.unwrap().spawn();
        for summary in summaries {
            tx.send(*summary).await.unwrap();
        }
        drop(tx);

        handle
            .await
            .unwrap()
            .into_iter()
            .map(|(name, snapshot)| (name, snapshot.write_count))
            .collect()
    }

    /// End-to-end: CSV recording -> FeaturePipeline -> Dispatcher -> CSV file sink
    #[tokio::test]
    async fn test_csv_recording_to_csv_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let recording = dir.path().join("walk.csv");
        std::fs::write(&recording, csv_text(&walking(30))).unwrap();

        let source = CsvSampleSource::new(&recording);
        let readings = source.load().unwrap();
        assert_eq!(readings.len(), 30);

        let summaries = FeaturePipeline::new(config(1.0, 10.0, 0.5, DegeneratePolicy::Flag))
            .unwrap()
            .run(&readings)
            .unwrap();
        assert_eq!(summaries.len(), 4);

        let out = dir.path().join("out").join("summaries.csv");
        let delivered = dispatch(&summaries, vec![file_sink("archive", &out)]).await;
        assert_eq!(delivered, vec![("archive".to_string(), 4)]);

        let written = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], WindowSummary::COLUMNS.join(","));
        assert!(lines[1].starts_with("0,"));
        assert!(lines[4].starts_with("3,"));
    }

    /// Every summary reaches every sink, in order
    #[tokio::test]
    async fn test_fan_out_to_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.jsonl");
        let second = dir.path().join("b.jsonl");

        let summaries = FeaturePipeline::new(config(1.0, 6.0, 0.5, DegeneratePolicy::Flag))
            .unwrap()
            .run(&walking(200))
            .unwrap();
        assert!(summaries.len() > 8, "queues should overflow their capacity");

        let delivered = dispatch(
            &summaries,
            vec![
                SinkConfig::log("console"),
                file_sink("a", &first),
                file_sink("b", &second),
            ],
        )
        .await;
        assert_eq!(delivered.len(), 3);
        for (_, count) in &delivered {
            assert_eq!(*count, summaries.len() as u64);
        }

        for path in [&first, &second] {
            let ids: Vec<u64> = std::fs::read_to_string(path)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str::<WindowSummary>(line).unwrap().window_id)
                .collect();
            let expected: Vec<u64> = summaries.iter().map(|s| s.window_id).collect();
            assert_eq!(ids, expected);
        }
    }

    #[tokio::test]
    async fn test_malformed_recording_names_row() {
        let dir = tempfile::tempdir().unwrap();
        let recording = dir.path().join("broken.csv");
        let mut text = csv_text(&walking(5));
        text.push_str("5,5,0.1,oops,9.8,0.1,0.1,0.1\n");
        std::fs::write(&recording, text).unwrap();

        let err = CsvSampleSource::new(&recording).load().unwrap_err();
        assert!(err.to_string().contains("row 6"), "got: {err}");
    }

    #[test]
    fn test_aggregator_over_run() {
        let mut readings = walking(40);
        for r in &mut readings[8..16] {
            r.gyroscope.x = 0.0;
        }
        let summaries = FeaturePipeline::new(config(1.0, 8.0, 0.5, DegeneratePolicy::Flag))
            .unwrap()
            .run(&readings)
            .unwrap();

        let mut aggregator = FeatureMetricsAggregator::new();
        for summary in &summaries {
            aggregator.update(summary);
        }
        let report = aggregator.summary();

        assert_eq!(report.total_windows, summaries.len() as u64);
        assert_eq!(report.degenerate_windows, 1);
        assert_eq!(report.gyro_angle_cosine.count, summaries.len() as u64 - 1);
    }
}
