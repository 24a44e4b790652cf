// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// Statistics of the most recent run invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunStatistics {
    /// Number of batches executed by the last run.
    pub batches: u64,
    /// Number of batches executed since construction or the last `init`.
    pub total_batches: u64,
    /// Wall-clock duration of the last run.
    pub run_duration: std::time::Duration,
}

impl std::fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Run Statistics:")?;
        writeln!(f, "  Batches (last run): {}", self.batches)?;
        writeln!(f, "  Batches (total): {}", self.total_batches)?;
        writeln!(
            f,
            "  Run Duration (secs): {:.3}",
            self.run_duration.as_secs_f64()
        )
    }
}

/// Builder for `RunStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunStatisticsBuilder {
    batches: u64,
    total_batches: u64,
    run_duration: std::time::Duration,
}

impl RunStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn batches(mut self, batches: u64) -> Self {
        self.batches = batches;
        self
    }

    #[inline]
    pub fn total_batches(mut self, total_batches: u64) -> Self {
        self.total_batches = total_batches;
        self
    }

    #[inline]
    pub fn run_duration(mut self, run_duration: std::time::Duration) -> Self {
        self.run_duration = run_duration;
        self
    }

    #[inline]
    pub fn build(self) -> RunStatistics {
        RunStatistics {
            batches: self.batches,
            total_batches: self.total_batches,
            run_duration: self.run_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RunStatistics, RunStatisticsBuilder};
    use std::time::Duration;

    #[test]
    fn test_builder_constructs_expected_struct() {
        let stats = RunStatisticsBuilder::new()
            .batches(3)
            .total_batches(9)
            .run_duration(Duration::from_millis(1500))
            .build();

        assert_eq!(stats.batches, 3);
        assert_eq!(stats.total_batches, 9);
        assert_eq!(stats.run_duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = RunStatistics {
            batches: 2,
            total_batches: 5,
            run_duration: Duration::from_millis(1234),
        };
        let rendered = format!("{}", stats);

        assert!(rendered.contains("Run Statistics:"), "missing header");
        assert!(rendered.contains("Batches (last run): 2"));
        assert!(rendered.contains("Batches (total): 5"));
        assert!(rendered.contains("Run Duration (secs): 1.234"));
    }

    #[test]
    fn test_default_is_zeroed() {
        let stats = RunStatistics::default();
        assert_eq!(stats.batches, 0);
        assert_eq!(stats.total_batches, 0);
        assert_eq!(stats.run_duration, Duration::ZERO);
    }
}
