use std::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, Metadata, Record};
use sythin::{Sampler, parse, sample};

struct CountingLogger {
    warnings: AtomicUsize,
}

impl log::Log for CountingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static LOGGER: CountingLogger = CountingLogger { warnings: AtomicUsize::new(0) };

#[test]
fn one_second_of_broken_audio_logs_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Warn);

    let program = parse("main = \\f.\\t. missing").unwrap();
    let mut sampler = Sampler::new(&program);
    for i in 0..48_000 {
        assert_eq!(sampler.sample("main", 440.0, f64::from(i) / 48_000.0), 0.0);
        assert_eq!(sample(&program, "main", 440.0, f64::from(i) / 48_000.0), 0.0);
    }

    assert_eq!(LOGGER.warnings.load(Ordering::SeqCst), 1);
}
