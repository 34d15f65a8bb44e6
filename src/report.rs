//! Progress and message reporting.

/// Severity of a terminal message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Sink for progress updates and terminal messages.
///
/// `report_progress` is called after every unit of work and must be cheap;
/// `report_message` is called once per terminal condition (success or fatal
/// error). Presentation is entirely up to the implementor.
pub trait Reporter {
    fn report_progress(&mut self, percent: u8);
    fn report_message(&mut self, text: &str, severity: Severity);
}

/// Bounded work counter shared by the collection and emission phases.
///
/// The total is fixed to twice the feature count before iteration begins:
/// one unit per feature for collection and one per emitted placemark.
/// Filtering a feature out removes the emission unit it will never consume
/// from the total rather than advancing the counter.
pub(crate) struct Progress {
    counter: usize,
    total: usize,
}

impl Progress {
    pub fn new() -> Self {
        Progress { counter: 0, total: 1 }
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Truncating integer percentage. Defined as 100 when the total is
    /// zero (every feature filtered out), so the bar completes instead of
    /// dividing by zero.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.counter * 100 / self.total).min(100) as u8
    }

    pub fn report(&self, reporter: &mut dyn Reporter) {
        reporter.report_progress(self.percent());
    }

    /// Report the current percentage, then count one unit of work.
    pub fn step(&mut self, reporter: &mut dyn Reporter) {
        self.report(reporter);
        self.counter += 1;
    }

    /// Remove one unit from the total (a filtered-out feature's emission
    /// unit).
    pub fn drop_unit(&mut self) {
        self.total = self.total.saturating_sub(1);
    }

    /// Force the counter to the total and report 100%. Used on both the
    /// success path and fatal aborts.
    pub fn finish(&mut self, reporter: &mut dyn Reporter) {
        self.counter = self.total;
        self.report(reporter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Percents(Vec<u8>);

    impl Reporter for Percents {
        fn report_progress(&mut self, percent: u8) {
            self.0.push(percent);
        }
        fn report_message(&mut self, _text: &str, _severity: Severity) {}
    }

    #[test]
    fn percent_is_100_when_total_is_zero() {
        let mut progress = Progress::new();
        progress.set_total(0);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn steps_reach_exactly_100() {
        let mut reporter = Percents(Vec::new());
        let mut progress = Progress::new();
        progress.set_total(4);
        for _ in 0..4 {
            progress.step(&mut reporter);
        }
        progress.finish(&mut reporter);
        assert_eq!(reporter.0, vec![0, 25, 50, 75, 100]);
    }

    #[test]
    fn finish_jumps_to_100_after_abort() {
        let mut reporter = Percents(Vec::new());
        let mut progress = Progress::new();
        progress.set_total(10);
        progress.step(&mut reporter);
        progress.finish(&mut reporter);
        assert_eq!(*reporter.0.last().unwrap(), 100);
    }

    #[test]
    fn dropping_units_keeps_percentage_bounded() {
        let mut progress = Progress::new();
        progress.set_total(6);
        // three features collected, all filtered out
        for _ in 0..3 {
            progress.drop_unit();
            progress.counter += 1;
        }
        assert_eq!(progress.percent(), 100);
    }
}
