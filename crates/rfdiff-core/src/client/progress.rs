#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    DownloadStart { total_bytes: Option<u64> },
    DownloadIncrement { bytes: u64 },
    DownloadFinish,

    /// Emitted once the service has answered, before the output is written.
    ResponseReceived { status: String, preview: String },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_is_a_no_op() {
        ProgressReporter::new().report(Progress::PhaseFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            sink.lock().unwrap().push(p);
        }));

        reporter.report(Progress::PhaseStart { name: "Fetch" });
        reporter.report(Progress::DownloadIncrement { bytes: 42 });
        reporter.report(Progress::PhaseFinish);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Progress::PhaseStart { name: "Fetch" },
                Progress::DownloadIncrement { bytes: 42 },
                Progress::PhaseFinish,
            ]
        );
    }
}
