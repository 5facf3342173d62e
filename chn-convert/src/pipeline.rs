use std::{fs::File, io::BufReader, time::Instant};

use chn_core::{
    read_chn_file, write_chn_file, ChnError, ChnRecord, Clock, ReportParser, SystemClock,
};
use log::{debug, info};

use crate::{ConversionSummary, ConvertConfig, ConvertError, ConvertResult};

/// Оркестрирует одну конвертацию: отчёт → запись → файл.
pub struct ConversionPipeline {
    config: ConvertConfig,
}

impl ConversionPipeline {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Запускает конвертацию с системными часами.
    pub fn run(&self) -> ConvertResult<ConversionSummary> {
        self.run_with_clock(SystemClock)
    }

    /// Запускает конвертацию с заданным источником «сейчас».
    ///
    /// Выходной файл появляется только если отчёт разобран полностью.
    pub fn run_with_clock<C: Clock>(
        &self,
        clock: C,
    ) -> ConvertResult<ConversionSummary> {
        let cfg = &self.config;
        let started = Instant::now();

        info!("Converting {:?} -> {:?}", cfg.input_path, cfg.output_path);

        let input = File::open(&cfg.input_path).map_err(|source| ConvertError::OpenInput {
            path: cfg.input_path.clone(),
            source,
        })?;

        let mut parser = ReportParser::new(clock)?;
        parser.feed_reader(BufReader::new(input))?;

        let stats = parser.stats().clone();
        let mut record = parser.finish();

        if let Some(ref text) = cfg.detector_description {
            record.footer.set_detector_description(text.as_bytes())?;
        }

        if let Some(ref text) = cfg.sample_description {
            record.footer.set_sample_description(text.as_bytes())?;
        }

        let bytes_written = write_chn_file(&cfg.output_path, &record).map_err(|e| match e {
            ChnError::Io(source) => ConvertError::CreateOutput {
                path: cfg.output_path.clone(),
                source,
            },
            other => ConvertError::Chn(other),
        })?;

        if cfg.verify {
            self.verify(&record)?;
        }

        Ok(ConversionSummary::new(
            &record,
            &stats,
            cfg.output_path.clone(),
            bytes_written,
            &started,
        ))
    }

    fn verify(
        &self,
        expected: &ChnRecord,
    ) -> ConvertResult<()> {
        let actual = read_chn_file(&self.config.output_path)?;

        if actual.header != expected.header {
            return Err(ConvertError::Verify(format!(
                "header mismatch: {:?} != {:?}",
                actual.header, expected.header
            )));
        }

        let diverged = actual
            .spectrum
            .counts()
            .iter()
            .zip(expected.spectrum.counts())
            .position(|(a, e)| a != e);

        if let Some(channel) = diverged {
            return Err(ConvertError::Verify(format!(
                "channel {channel} differs"
            )));
        }

        if actual.footer != expected.footer {
            return Err(ConvertError::Verify("footer mismatch".into()));
        }

        debug!("verified {:?}", self.config.output_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use chn_core::{FixedClock, CHN_FILE_SIZE, CHN_SPECTRUM_SIZE};
    use chrono::NaiveDate;

    use super::*;

    fn clock() -> FixedClock {
        FixedClock::utc(
            NaiveDate::from_ymd_opt(2011, 3, 30)
                .unwrap()
                .and_hms_opt(10, 24, 45)
                .unwrap(),
        )
    }

    fn config(dir: &Path) -> ConvertConfig {
        ConvertConfig {
            input_path: dir.join("CAN_REP.$$$"),
            output_path: dir.join("SP_BUFF.$$$"),
            ..ConvertConfig::default()
        }
    }

    fn write_report(
        path: &Path,
        channels: usize,
    ) {
        let mut report = String::from("Start: 30.03.2011 09:24:45\r\nLive: 10\r\nReal: 20\r\n");
        for _ in 0..channels {
            report.push_str("Data: 3\r\n");
        }
        fs::write(path, report).unwrap();
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        write_report(&cfg.input_path, 4);

        let summary = ConversionPipeline::new(cfg.clone())
            .run_with_clock(clock())
            .unwrap();

        assert_eq!(summary.channels_filled, 4);
        assert_eq!(summary.total_counts, 12);
        assert_eq!(summary.bytes_written, CHN_FILE_SIZE as u64);
        assert_eq!(
            fs::metadata(&cfg.output_path).unwrap().len(),
            CHN_FILE_SIZE as u64
        );
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());

        let err = ConversionPipeline::new(cfg.clone())
            .run_with_clock(clock())
            .unwrap_err();

        assert!(matches!(err, ConvertError::OpenInput { .. }));
        assert!(err.to_string().starts_with("Unable to open"));
        assert!(!cfg.output_path.exists());
    }

    #[test]
    fn test_overflow_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let line = vec!["1"; CHN_SPECTRUM_SIZE + 1].join(" ");
        fs::write(
            &cfg.input_path,
            format!("Start: 30.03.2011 09:24:45\nLive: 1\nReal: 1\nData: {line}\n"),
        )
        .unwrap();

        let err = ConversionPipeline::new(cfg.clone())
            .run_with_clock(clock())
            .unwrap_err();

        assert_eq!(err.to_string(), "Spectrum has more than 8192 channels");
        assert!(!cfg.output_path.exists());
    }

    #[test]
    fn test_descriptions_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConvertConfig {
            detector_description: Some("HPGe 30%".into()),
            sample_description: Some("soil #7".into()),
            verify: true,
            ..config(dir.path())
        };
        write_report(&cfg.input_path, 2);

        ConversionPipeline::new(cfg.clone())
            .run_with_clock(clock())
            .unwrap();

        let record = read_chn_file(&cfg.output_path).unwrap();
        assert_eq!(record.footer.detector_description(), b"HPGe 30%");
        assert_eq!(record.footer.sample_description(), b"soil #7");
    }

    #[test]
    fn test_description_too_long() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConvertConfig {
            sample_description: Some("x".repeat(64)),
            ..config(dir.path())
        };
        write_report(&cfg.input_path, 1);

        let err = ConversionPipeline::new(cfg.clone())
            .run_with_clock(clock())
            .unwrap_err();

        assert!(matches!(
            err,
            ConvertError::Chn(ChnError::DescriptionTooLong { .. })
        ));
        assert!(!cfg.output_path.exists());
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConvertConfig {
            output_path: dir.path().join("nope").join("SP_BUFF.$$$"),
            ..config(dir.path())
        };
        write_report(&cfg.input_path, 1);

        let err = ConversionPipeline::new(cfg)
            .run_with_clock(clock())
            .unwrap_err();

        assert!(matches!(err, ConvertError::CreateOutput { .. }));
    }
}
