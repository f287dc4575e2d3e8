// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line parsing for `hbjson-to-glb`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions accepted without a warning.
pub const MODEL_EXTENSIONS: [&str; 2] = ["hbjson", "json"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Missing input path (use '-' to read from stdin)")]
    MissingInput,

    #[error("Option {0} expects a value")]
    MissingValue(&'static str),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Where the HBJSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Where the GLB goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input: Input,
    pub output: Option<Output>,
    pub rotate: bool,
    pub quiet: bool,
    /// Print conversion stats as JSON on stderr
    pub stats: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Convert(Args),
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse_from<I>(args: I) -> Result<Command, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut input = None;
        let mut output = None;
        let mut rotate = false;
        let mut quiet = false;
        let mut stats = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-o" | "--output" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--output"))?;
                    output = Some(parse_output(value));
                }
                "--rotate" => rotate = true,
                "-q" | "--quiet" => quiet = true,
                "--stats" => stats = true,
                "-" => input = set_input(input, &arg, Input::Stdin)?,
                other if other.starts_with('-') => {
                    return Err(ArgsError::UnknownOption(other.to_string()))
                }
                _ => {
                    input = set_input(input, &arg, Input::File(PathBuf::from(&arg)))?;
                }
            }
        }

        Ok(Command::Convert(Args {
            input: input.ok_or(ArgsError::MissingInput)?,
            output,
            rotate,
            quiet,
            stats,
        }))
    }

    /// Explicit output, else the input path with a `.glb` extension, else stdout.
    pub fn output_target(&self) -> Output {
        match (&self.output, &self.input) {
            (Some(output), _) => output.clone(),
            (None, Input::File(path)) => Output::File(path.with_extension("glb")),
            (None, Input::Stdin) => Output::Stdout,
        }
    }
}

fn set_input(current: Option<Input>, raw: &str, input: Input) -> Result<Option<Input>, ArgsError> {
    match current {
        Some(_) => Err(ArgsError::UnexpectedArgument(raw.to_string())),
        None => Ok(Some(input)),
    }
}

fn parse_output(value: String) -> Output {
    if value == "-" {
        Output::Stdout
    } else {
        Output::File(PathBuf::from(value))
    }
}

/// Whether `path` carries one of [`MODEL_EXTENSIONS`] (case-insensitive).
pub fn has_model_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MODEL_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

pub fn usage() -> &'static str {
    "Convert an HBJSON building model into a categorized binary glTF (GLB)

Usage:
  hbjson-to-glb <input|-> [options]

Options:
  -o, --output <path|->  Output file (default: input with .glb extension, stdout for stdin)
      --rotate           Rotate Z-up model coordinates into Y-up
  -q, --quiet            Only log warnings and errors
      --stats            Print conversion stats as JSON on stderr
  -h, --help             Show this help

Environment:
  HBMESH_ROTATE          Same as --rotate when set to 1/true/yes/on
  HBMESH_LOG, RUST_LOG   tracing filter directive (default: info)"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, ArgsError> {
        Args::parse_from(args.iter().map(|s| s.to_string()))
    }

    fn convert(args: &[&str]) -> Args {
        match parse(args) {
            Ok(Command::Convert(args)) => args,
            other => panic!("expected convert command, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let args = convert(&["model.hbjson"]);
        assert_eq!(args.input, Input::File(PathBuf::from("model.hbjson")));
        assert!(!args.rotate && !args.quiet && !args.stats);
        assert_eq!(args.output_target(), Output::File(PathBuf::from("model.glb")));
    }

    #[test]
    fn test_all_options() {
        let args = convert(&["--rotate", "in.json", "-o", "out/scene.glb", "--quiet", "--stats"]);
        assert!(args.rotate && args.quiet && args.stats);
        assert_eq!(args.output_target(), Output::File(PathBuf::from("out/scene.glb")));
    }

    #[test]
    fn test_stdin_defaults_to_stdout() {
        let args = convert(&["-"]);
        assert_eq!(args.input, Input::Stdin);
        assert_eq!(args.output_target(), Output::Stdout);

        let args = convert(&["-", "--output", "x.glb"]);
        assert_eq!(args.output_target(), Output::File(PathBuf::from("x.glb")));

        let args = convert(&["model.hbjson", "--output", "-"]);
        assert_eq!(args.output_target(), Output::Stdout);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(&[]), Err(ArgsError::MissingInput));
        assert_eq!(parse(&["a.hbjson", "--output"]), Err(ArgsError::MissingValue("--output")));
        assert_eq!(
            parse(&["a.hbjson", "--verbose"]),
            Err(ArgsError::UnknownOption("--verbose".into()))
        );
        assert_eq!(
            parse(&["a.hbjson", "b.hbjson"]),
            Err(ArgsError::UnexpectedArgument("b.hbjson".into()))
        );
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&["a.hbjson", "--help"]), Ok(Command::Help));
    }

    #[test]
    fn test_model_extension() {
        assert!(has_model_extension(Path::new("a/b.hbjson")));
        assert!(has_model_extension(Path::new("b.JSON")));
        assert!(!has_model_extension(Path::new("b.txt")));
        assert!(!has_model_extension(Path::new("hbjson")));
    }
}
