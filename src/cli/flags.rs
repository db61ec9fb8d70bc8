use zeroize::Zeroizing;

use passkit::pass::ClassSet;

#[derive(Default)]
pub struct CliFlags {
    pub help: bool,
    pub version: bool,
    pub quiet: bool,
    pub clipboard: bool,
    pub stdin: bool,
    pub no_lower: bool,
    pub no_upper: bool,
    pub no_digits: bool,
    pub no_symbols: bool,
    pub length: Option<usize>,
    pub number: Option<usize>,
    pub evaluate: Option<Zeroizing<String>>,
}

impl CliFlags {
    pub fn classes(&self) -> ClassSet {
        ClassSet {
            lowercase: !self.no_lower,
            uppercase: !self.no_upper,
            digits: !self.no_digits,
            symbols: !self.no_symbols,
        }
    }

    /// Score a password instead of generating one.
    pub fn evaluating(&self) -> bool {
        self.evaluate.is_some() || self.stdin
    }
}
