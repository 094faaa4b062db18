//! Regression test parameters and operations

use bilateral_core::{Frame, FramePlanes, Plane, Sample};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check results (default)
    #[default]
    Compare,
    /// Check results and print plane statistics
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check and every failure,
/// so that a test can run all of its checks and report them together.
pub struct RegParams {
    /// Name of the test (e.g., "bilateral_direct")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Record a boolean condition
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        }
    }

    /// Compare two planes for exact equality
    pub fn compare_planes<T: Sample>(&mut self, plane1: &Plane<T>, plane2: &Plane<T>) -> bool {
        self.compare_planes_within(plane1, plane2, 0)
    }

    /// Compare two planes, allowing each sample to differ by `max_diff`
    pub fn compare_planes_within<T: Sample>(
        &mut self,
        plane1: &Plane<T>,
        plane2: &Plane<T>,
        max_diff: u32,
    ) -> bool {
        self.index += 1;

        let stats = match plane1.diff_stats(plane2) {
            Ok(stats) => stats,
            Err(_) => {
                let msg = format!(
                    "Failure in {}_reg: plane comparison for index {} - dimension mismatch",
                    self.test_name, self.index
                );
                return self.fail(msg);
            }
        };

        if self.display() {
            eprintln!(
                "  index {}: {} samples differ, max diff {}, mean abs diff {:.4}",
                self.index, stats.n_diff, stats.max_diff, stats.mean_abs_diff
            );
        }

        if stats.max_diff > max_diff {
            let msg = format!(
                "Failure in {}_reg: plane comparison for index {} - \
                 max diff {} exceeds {} ({} samples differ)",
                self.test_name, self.index, stats.max_diff, max_diff, stats.n_diff
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two frames for exact equality of format and every plane
    pub fn compare_frames(&mut self, frame1: &Frame, frame2: &Frame) -> bool {
        self.index += 1;

        if !frame1.sizes_equal(frame2) {
            let msg = format!(
                "Failure in {}_reg: frame comparison for index {} - format mismatch",
                self.test_name, self.index
            );
            return self.fail(msg);
        }

        let mismatch = match (frame1.planes(), frame2.planes()) {
            (FramePlanes::U8(a), FramePlanes::U8(b)) => first_mismatch(a, b),
            (FramePlanes::U16(a), FramePlanes::U16(b)) => first_mismatch(a, b),
            _ => Some(0),
        };

        match mismatch {
            Some(plane) => {
                let msg = format!(
                    "Failure in {}_reg: frame comparison for index {} - plane {} differs",
                    self.test_name, self.index, plane
                );
                self.fail(msg)
            }
            None => true,
        }
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn first_mismatch<T: PartialEq>(a: &[Plane<T>], b: &[Plane<T>]) -> Option<usize> {
    if a.len() != b.len() {
        return Some(a.len().min(b.len()));
    }
    a.iter().zip(b).position(|(p, q)| p != q)
}
