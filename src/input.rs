//! User input parsing
//!
//! The launcher accepts what the user typed as if it were a command line:
//! leading flags, then a package identity, then arguments for the program.
//! The history store re-parses stored inputs through [`InputParser`] when
//! searching, so parsing must be cheap and must never panic.

use thiserror::Error;

/// Why a piece of user input could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unbalanced quotes in input")]
    UnbalancedQuotes,

    #[error("no package name given")]
    MissingPackage,
}

/// Structured form of a single user request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Flags that appeared before the package name, e.g. `--clear-cache`
    pub flags: Vec<String>,

    /// Package identity, e.g. `com.example:app` or `example.com`
    pub package: String,

    /// Everything after the package name, passed through to the program
    pub args: Vec<String>,
}

impl LaunchRequest {
    /// Whether a flag was given, matched exactly (`--offline`)
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// Turns raw user input into a [`LaunchRequest`]
pub trait InputParser: Send + Sync {
    fn parse(&self, input: &str) -> Result<LaunchRequest, ParseError>;
}

impl<F> InputParser for F
where
    F: Fn(&str) -> Result<LaunchRequest, ParseError> + Send + Sync,
{
    fn parse(&self, input: &str) -> Result<LaunchRequest, ParseError> {
        self(input)
    }
}

/// Default parser using shell quoting rules
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLineParser;

impl InputParser for CommandLineParser {
    fn parse(&self, input: &str) -> Result<LaunchRequest, ParseError> {
        let tokens = shlex::split(input).ok_or(ParseError::UnbalancedQuotes)?;
        let mut tokens = tokens.into_iter();

        let mut flags = Vec::new();
        let package = loop {
            match tokens.next() {
                Some(token) if token.starts_with('-') => flags.push(token),
                Some(token) => break token,
                None => return Err(ParseError::MissingPackage),
            }
        };

        Ok(LaunchRequest {
            flags,
            package,
            args: tokens.collect(),
        })
    }
}
