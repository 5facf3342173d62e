use std::fs;

use chn_convert::{ConversionPipeline, ConvertConfig, ConvertError};
use chn_core::{read_chn_file, FixedClock, CHN_FILE_SIZE};
use chrono::NaiveDate;

fn clock() -> FixedClock {
    FixedClock::utc(
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 30, 0)
            .unwrap(),
    )
}

#[test]
fn test_deferred_date_crosses_midnight() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ConvertConfig {
        input_path: dir.path().join("CAN_REP.$$$"),
        output_path: dir.path().join("SP_BUFF.$$$"),
        ..ConvertConfig::default()
    };
    fs::write(
        &cfg.input_path,
        "Start: not recorded\r\nLive time: 3500\r\nReal time: 3600\r\nChannels: 1 2 3\r\n",
    )
    .unwrap();

    let summary = ConversionPipeline::new(cfg.clone())
        .run_with_clock(clock())
        .unwrap();

    assert!(summary.date_reconstructed);

    let record = read_chn_file(&cfg.output_path).unwrap();
    assert_eq!(&record.header.start_date, b"01JAN241");
    assert_eq!(&record.header.start_time, b"2330");
    assert_eq!(record.header.livetime, 175_000);
    assert_eq!(record.header.realtime, 180_000);
    assert_eq!(record.spectrum.total_counts(), 6);
}

#[test]
fn test_failed_run_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ConvertConfig {
        input_path: dir.path().join("CAN_REP.$$$"),
        output_path: dir.path().join("SP_BUFF.$$$"),
        ..ConvertConfig::default()
    };
    fs::write(&cfg.output_path, b"previous").unwrap();
    fs::write(&cfg.input_path, "Start: 01.13.2020 10:00:00\nLive: 1\nReal: 1\n").unwrap();

    let err = ConversionPipeline::new(cfg.clone())
        .run_with_clock(clock())
        .unwrap_err();

    assert!(matches!(err, ConvertError::Chn(_)));
    assert_eq!(fs::read(&cfg.output_path).unwrap(), b"previous");
}

#[test]
fn test_output_size_without_channels() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ConvertConfig {
        input_path: dir.path().join("report.txt"),
        output_path: dir.path().join("out.chn"),
        verify: true,
        ..ConvertConfig::default()
    };
    fs::write(&cfg.input_path, "Start: 30.03.2011 09:24:45\nLive: 0\nReal: 0\n").unwrap();

    ConversionPipeline::new(cfg.clone())
        .run_with_clock(clock())
        .unwrap();

    assert_eq!(
        fs::metadata(&cfg.output_path).unwrap().len(),
        CHN_FILE_SIZE as u64
    );
}
