/// ProgressReporter port for user-facing status messages
///
/// Messages go to the user (stderr in the CLI) and never mix with the
/// rendered output. Diagnostic detail belongs in `tracing`, not here.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports entry into one pipeline stage
    ///
    /// # Arguments
    /// * `current` - 1-based number of the stage being entered
    /// * `total` - Total number of stages
    /// * `message` - What the stage does
    fn report_stage(&self, current: usize, total: usize, message: &str);

    /// Reports a warning that does not stop the run
    fn report_warning(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &T {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_stage(&self, current: usize, total: usize, message: &str) {
        (**self).report_stage(current, total, message)
    }

    fn report_warning(&self, message: &str) {
        (**self).report_warning(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }
}
