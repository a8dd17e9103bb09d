use std::io::{self, Write};
use std::time::Duration;

/// Outcome of one timed benchmark operation
#[derive(Debug, Clone)]
pub struct OperationReport {
    /// Human readable name, e.g. "Embedded Model Write"
    pub label: &'static str,

    /// Wall-clock time of the database calls only
    pub elapsed: Duration,

    /// Documents touched per collection, in call order
    pub counts: Vec<(&'static str, usize)>,
}

impl OperationReport {
    pub fn new(label: &'static str, elapsed: Duration) -> Self {
        OperationReport {
            label,
            elapsed,
            counts: Vec::new(),
        }
    }

    pub fn with_count(mut self, collection: &'static str, documents: usize) -> Self {
        self.counts.push((collection, documents));
        self
    }

    /// Documents recorded for `collection`, if it was touched
    pub fn count(&self, collection: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| *name == collection)
            .map(|(_, n)| *n)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Print the single timing line, e.g. `Embedded Model Write Time: 0.0123`
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{} Time: {}", self.label, self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_line() {
        let report = OperationReport::new("Embedded Model Write", Duration::from_millis(1500));
        let mut buffer = Vec::new();
        report.write_to(&mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "Embedded Model Write Time: 1.5\n");
    }

    #[test]
    fn test_counts() {
        let report = OperationReport::new("Separate Entities Write", Duration::ZERO)
            .with_count("customers", 2)
            .with_count("addresses", 3);

        assert_eq!(report.count("customers"), Some(2));
        assert_eq!(report.count("payments"), None);
        assert_eq!(report.total(), 5);
    }
}
