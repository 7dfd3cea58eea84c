//! Command-line arguments

use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: spear [OPTIONS] [INPUT]

Ranks users by expertise and resources by quality from an activity file.

Arguments:
  [INPUT]              Activity file (JSON array or JSON Lines); defaults to input.path

Options:
  -c, --config <PATH>  Load settings from PATH instead of the config/ directory
  -h, --help           Print this help
  -V, --version        Print the version";

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunArgs),
    Help,
    Version,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
}

/// Parse arguments, program name excluded
pub fn parse<I>(args: I) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut run = RunArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a path\n\n{}", arg, USAGE))?;
                run.config = Some(PathBuf::from(path));
            }
            _ if arg.starts_with("--config=") => {
                run.config = Some(PathBuf::from(&arg["--config=".len()..]));
            }
            _ if arg.starts_with('-') && arg != "-" => {
                anyhow::bail!("unknown option '{}'\n\n{}", arg, USAGE);
            }
            _ if run.input.is_none() => run.input = Some(PathBuf::from(&arg)),
            _ => anyhow::bail!("unexpected argument '{}'\n\n{}", arg, USAGE),
        }
    }

    Ok(Command::Run(run))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_strs(args: &[&str]) -> anyhow::Result<Command> {
        parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_positional_input() {
        let command = parse_strs(&["activities.json"]).unwrap();
        assert_eq!(
            command,
            Command::Run(RunArgs {
                config: None,
                input: Some(PathBuf::from("activities.json")),
            })
        );
    }

    #[test]
    fn test_help_is_not_a_path() {
        assert_eq!(parse_strs(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse_strs(&["activities.json", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse_strs(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_config_option() {
        let expected = Command::Run(RunArgs {
            config: Some(PathBuf::from("ranking.toml")),
            input: Some(PathBuf::from("activities.jsonl")),
        });
        assert_eq!(
            parse_strs(&["--config", "ranking.toml", "activities.jsonl"]).unwrap(),
            expected
        );
        assert_eq!(
            parse_strs(&["activities.jsonl", "--config=ranking.toml"]).unwrap(),
            expected
        );
        assert_eq!(
            parse_strs(&["-c", "ranking.toml", "activities.jsonl"]).unwrap(),
            expected
        );
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        assert!(parse_strs(&["--config"]).is_err());
        assert!(parse_strs(&["--iterations", "10"]).is_err());
        assert!(parse_strs(&["a.json", "b.json"]).is_err());
    }
}
