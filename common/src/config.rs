/// Settings that shape how a run reports itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Prints progress lines and extra failure details.
    ///
    /// Does not change which requests are sent.
    pub verbose: bool,
}
