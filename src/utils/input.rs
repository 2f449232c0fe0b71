use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::data::features::{Field, FieldKind, UnknownField};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Set(Field, f64),
    Show,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown command `{0}` (type `help` for usage)")]
    UnknownCommand(String),
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error("{field} needs a value")]
    MissingValue { field: Field },
    #[error("`{value}` is not a valid value for {field}")]
    InvalidValue { field: Field, value: String },
}

/// Parses a control value. Steppers take whole numbers only; sliders take
/// any finite decimal. Range clamping happens when the value is applied.
pub fn parse_value(field: Field, raw: &str) -> Result<f64, InputError> {
    let raw = raw.trim();
    let invalid = || InputError::InvalidValue {
        field,
        value: raw.to_string(),
    };
    match field.spec().kind {
        FieldKind::Integer => raw.parse::<i64>().map(|v| v as f64).map_err(|_| invalid()),
        FieldKind::Slider => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid()),
        },
    }
}

/// Accepts `field=value`, `field value`, `show`, `reset`, `help`, `quit`/`q`.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" | "show" => return Ok(Command::Show),
        "reset" => return Ok(Command::Reset),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let (name, value) = match line.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => match line.split_once(char::is_whitespace) {
            Some((name, value)) => (name, Some(value)),
            None => (line, None),
        },
    };

    let field: Field = name.parse().map_err(|_| {
        if value.is_some() {
            InputError::UnknownField(UnknownField(name.trim().to_string()))
        } else {
            InputError::UnknownCommand(line.to_string())
        }
    })?;

    match value.map(str::trim) {
        None | Some("") => Err(InputError::MissingValue { field }),
        Some(raw) => Ok(Command::Set(field, parse_value(field, raw)?)),
    }
}

pub fn get_input<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(writer, "{prompt}")?;
    writer.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_forms() {
        assert_eq!(parse_command("N=60"), Ok(Command::Set(Field::Nitrogen, 60.0)));
        assert_eq!(
            parse_command("rainfall 120.5"),
            Ok(Command::Set(Field::Rainfall, 120.5))
        );
        assert_eq!(
            parse_command("  humidity = 71 "),
            Ok(Command::Set(Field::Humidity, 71.0))
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_command("Q"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("reset"), Ok(Command::Reset));
        assert_eq!(parse_command("help"), Ok(Command::Help));
    }

    #[test]
    fn test_steppers_reject_fractions() {
        assert!(matches!(
            parse_command("K=10.5"),
            Err(InputError::InvalidValue { field: Field::Potassium, .. })
        ));
        assert!(parse_command("ph=nan").is_err());
    }

    #[test]
    fn test_unknown_input() {
        assert!(matches!(parse_command("dance"), Err(InputError::UnknownCommand(_))));
        assert!(matches!(parse_command("wind=3"), Err(InputError::UnknownField(_))));
        assert_eq!(
            parse_command("ph"),
            Err(InputError::MissingValue { field: Field::Ph })
        );
    }

    #[test]
    fn test_get_input_reads_one_line() {
        let mut reader = "N=5\r\nrest\n".as_bytes();
        let mut out = Vec::new();
        let line = get_input(&mut reader, &mut out, "> ").unwrap();
        assert_eq!(line.as_deref(), Some("N=5"));
        assert_eq!(out, b"> ");

        let mut empty = "".as_bytes();
        assert_eq!(get_input(&mut empty, &mut out, "> ").unwrap(), None);
    }
}
