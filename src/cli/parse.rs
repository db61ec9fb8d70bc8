use zeroize::Zeroizing;

use super::CliFlags;

/// Most passwords `-b` will join onto the clipboard at once.
pub const MAX_BOARD_COUNT: usize = 100;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidNumber(String),
    MissingValue(String),
    UnknownArg(String),
    TooManyToCopy(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidNumber(s) => write!(f, "Invalid number: {}", s),
            ParseError::MissingValue(s) => write!(f, "Missing value for {}", s),
            ParseError::UnknownArg(s) => write!(f, "Unknown argument: {}", s),
            ParseError::TooManyToCopy(n) => write!(
                f,
                "Cannot copy {} passwords at once (max {})",
                n, MAX_BOARD_COUNT
            ),
        }
    }
}

/// Parse `args` as given by `env::args()`; the program name is skipped.
pub fn parse(args: &[String]) -> Result<CliFlags, ParseError> {
    let mut flags = CliFlags::default();
    let mut i = 1;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => flags.help = true,
            "-v" | "--version" => flags.version = true,
            "-q" | "--quiet" => flags.quiet = true,
            "-b" | "--board" => flags.clipboard = true,
            "--stdin" => flags.stdin = true,
            "--no-lower" => flags.no_lower = true,
            "--no-upper" => flags.no_upper = true,
            "--no-digits" => flags.no_digits = true,
            "--no-symbols" => flags.no_symbols = true,
            "-l" | "--length" => {
                i += 1;
                flags.length = Some(number(arg, args.get(i))?);
            }
            "-n" | "--number" => {
                i += 1;
                flags.number = Some(number(arg, args.get(i))?);
            }
            "-e" | "--evaluate" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| ParseError::MissingValue(arg.to_string()))?;
                flags.evaluate = Some(Zeroizing::new(value.clone()));
            }
            arg => return Err(ParseError::UnknownArg(arg.to_string())),
        }
        i += 1;
    }

    if flags.clipboard {
        if let Some(n) = flags.number.filter(|&n| n > MAX_BOARD_COUNT) {
            return Err(ParseError::TooManyToCopy(n));
        }
    }
    Ok(flags)
}

fn number(flag: &str, value: Option<&String>) -> Result<usize, ParseError> {
    let value = value.ok_or_else(|| ParseError::MissingValue(flag.to_string()))?;
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.clone()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("passkit")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn generation_flags() {
        let flags = parse(&args(&["-l", "20", "--no-symbols", "-n", "3", "-b"])).unwrap();
        assert_eq!(flags.length, Some(20));
        assert_eq!(flags.number, Some(3));
        assert!(flags.clipboard);
        assert!(!flags.classes().symbols);
        assert!(flags.classes().lowercase);
        assert!(!flags.evaluating());
    }

    #[test]
    fn evaluate_takes_a_value() {
        let flags = parse(&args(&["-e", "hunter2", "-q"])).unwrap();
        assert_eq!(flags.evaluate.as_deref().map(String::as_str), Some("hunter2"));
        assert!(flags.quiet);
        assert!(flags.evaluating());
        assert!(parse(&args(&["--stdin"])).unwrap().evaluating());
    }

    #[test]
    fn count_only_capped_when_copying() {
        let flags = parse(&args(&["-n", "18446744073709551615", "-q"])).unwrap();
        assert_eq!(flags.number, Some(usize::MAX));
        let flags = parse(&args(&["-n", "100", "-b"])).unwrap();
        assert_eq!(flags.number, Some(MAX_BOARD_COUNT));
    }

    #[rstest]
    #[case(&["-l"], ParseError::MissingValue("-l".into()))]
    #[case(&["--number", "many"], ParseError::InvalidNumber("many".into()))]
    #[case(&["-e"], ParseError::MissingValue("-e".into()))]
    #[case(&["--special"], ParseError::UnknownArg("--special".into()))]
    #[case(&["-b", "-n", "101"], ParseError::TooManyToCopy(101))]
    #[case(&["-n", "18446744073709551615", "--board"], ParseError::TooManyToCopy(usize::MAX))]
    fn rejects(#[case] input: &[&str], #[case] expected: ParseError) {
        assert_eq!(parse(&args(input)).err(), Some(expected));
    }
}
