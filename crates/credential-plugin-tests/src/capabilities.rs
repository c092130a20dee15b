/// Optional plugin behaviors exercised by the suite.
#[derive(Clone, Copy, Debug, Default)]
pub struct Capabilities {
    /// The harness environment can complete a mint during the run.
    pub mint: bool,
}

impl Capabilities {
    pub const fn with_mint(mut self) -> Self {
        self.mint = true;
        self
    }
}
