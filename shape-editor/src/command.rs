//! Parsing of host commands.

use std::path::PathBuf;

use shape_core::{Color, Position, ShapeKind, UnknownShapeKind};
use thiserror::Error;

/// Errors produced while parsing a command line.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    /// The command word is not recognized.
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    /// A required argument is missing.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// An argument could not be parsed.
    #[error("invalid {what}: {value}")]
    InvalidArgument {
        /// Which argument was invalid.
        what: &'static str,
        /// The offending text.
        value: String,
    },

    /// The shape kind is not one of rect, circle, line.
    #[error(transparent)]
    Kind(#[from] UnknownShapeKind),

    /// More arguments than the command accepts.
    #[error("too many arguments")]
    TooManyArguments,
}

/// A host command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a shape, optionally at an explicit position and color.
    Add {
        /// Kind of shape to add.
        kind: ShapeKind,
        /// Explicit placement; random when absent.
        at: Option<(Position, Color)>,
    },
    /// Print the shapes in the scene.
    List,
    /// Pick the shape at a list index, as a click would.
    Pick(usize),
    /// Drag the shape at a list index to a position.
    Drag(usize, Position),
    /// Press a key.
    Key(String),
    /// Delete the selected shape.
    Delete,
    /// Delete every shape.
    Clear,
    /// Export the scene to the data directory.
    Export,
    /// Import a scene, from `path` or the default document.
    Import(Option<PathBuf>),
    /// Print usage.
    Help,
    /// Leave the editor.
    Quit,
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  add <rect|circle|line> [x y z r g b]  add a shape (random placement without coordinates)
  list                                  list shapes; * marks the selection
  pick <index>                          select the shape at a list index
  drag <index> <x> <y> <z>              move the shape at a list index
  key <name>                            press a key (Delete removes the selection)
  delete                                delete the selected shape
  clear                                 delete all shapes
  export                                save the scene as JSON
  import [path]                         replace the scene with a JSON document
  help                                  show this text
  quit                                  exit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns a [`CommandError`] describing what is wrong with the line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb {
        "add" => parse_add(&args)?,
        "list" | "ls" => no_args(&args, Command::List)?,
        "pick" | "select" => {
            exact(&args, 1)?;
            Command::Pick(index(args.first().copied())?)
        }
        "drag" | "move" => {
            exact(&args, 4)?;
            let [x, y, z] = numbers::<3>(&args[1..], "coordinate")?;
            Command::Drag(index(args.first().copied())?, Position::new(x, y, z))
        }
        "key" => {
            exact(&args, 1)?;
            Command::Key(args[0].to_string())
        }
        "delete" | "del" => no_args(&args, Command::Delete)?,
        "clear" => no_args(&args, Command::Clear)?,
        "export" | "save" => no_args(&args, Command::Export)?,
        "import" | "open" => match args.as_slice() {
            [] => Command::Import(None),
            [path] => Command::Import(Some(PathBuf::from(path))),
            _ => return Err(CommandError::TooManyArguments),
        },
        "help" | "?" => no_args(&args, Command::Help)?,
        "quit" | "exit" => no_args(&args, Command::Quit)?,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_add(args: &[&str]) -> Result<Command, CommandError> {
    let kind: ShapeKind = args
        .first()
        .ok_or(CommandError::MissingArgument("shape kind"))?
        .parse()?;
    let at = match args.len() {
        1 => None,
        7 => {
            let [x, y, z] = numbers::<3>(&args[1..4], "coordinate")?;
            let [r, g, b] = numbers::<3>(&args[4..7], "color channel")?;
            Some((Position::new(x, y, z), Color::rgb(r, g, b)))
        }
        n if n < 7 => return Err(CommandError::MissingArgument("x y z r g b")),
        _ => return Err(CommandError::TooManyArguments),
    };
    Ok(Command::Add { kind, at })
}

fn no_args(args: &[&str], command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::TooManyArguments)
    }
}

fn exact(args: &[&str], n: usize) -> Result<(), CommandError> {
    match args.len().cmp(&n) {
        std::cmp::Ordering::Less => Err(CommandError::MissingArgument("arguments")),
        std::cmp::Ordering::Greater => Err(CommandError::TooManyArguments),
        std::cmp::Ordering::Equal => Ok(()),
    }
}

fn index(arg: Option<&str>) -> Result<usize, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument("index"))?;
    arg.parse().map_err(|_| CommandError::InvalidArgument {
        what: "index",
        value: arg.to_string(),
    })
}

fn numbers<const N: usize>(args: &[&str], what: &'static str) -> Result<[f64; N], CommandError> {
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandError::InvalidArgument {
                what,
                value: (*arg).to_string(),
            })?;
    }
    Ok(out)
}
