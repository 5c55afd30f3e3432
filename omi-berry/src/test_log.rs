//! 测试用日志: 转发给 `simple_logger` 的同时记下每条警告, 以便断言诊断信息确实被输出.

use std::sync::{Mutex, Once, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};
use simple_logger::SimpleLogger;

struct Recorder {
    inner: SimpleLogger,
    lines: Mutex<Vec<String>>,
}

impl Log for Recorder {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(record.args().to_string());
        }
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

static RECORDER: OnceLock<Recorder> = OnceLock::new();

/// 安装日志器. 可重复调用.
pub(crate) fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let recorder = RECORDER.get_or_init(|| Recorder {
            inner: SimpleLogger::new()
                .with_level(LevelFilter::Warn)
                .without_timestamps(),
            lines: Mutex::new(vec![]),
        });
        if log::set_logger(recorder).is_ok() {
            log::set_max_level(LevelFilter::Warn);
        }
    });
}

/// 是否有某条警告包含 `pattern`?
pub(crate) fn warned(pattern: &str) -> bool {
    RECORDER.get().is_some_and(|r| {
        r.lines
            .lock()
            .map(|lines| lines.iter().any(|l| l.contains(pattern)))
            .unwrap_or(false)
    })
}
