//! Operator terminal input

use std::io::{BufRead, Write};

use mockall::automock;

use crate::error::{AppError, AppResult};

/// Where the services read operator answers from
#[automock]
pub trait OperatorInput {
    /// Registration number of the vehicle at the gate
    fn read_vehicle_registration_number(&mut self) -> AppResult<String>;

    /// Numeric menu choice; `-1` when the answer is not a number
    fn read_selection(&mut self) -> i32;

    /// The operator can no longer answer (input closed)
    fn is_closed(&self) -> bool {
        false
    }
}

/// Operator answering prompts on a text console
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    /// Writer used for prompts and reports
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_line(&mut self) -> AppResult<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            self.closed = true;
            return Err(AppError::Io(std::io::ErrorKind::UnexpectedEof.into()));
        }
        Ok(line.trim().to_string())
    }

    fn prompt(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }
}

fn validate_registration_number(registration: String) -> AppResult<String> {
    if registration.is_empty() {
        return Err(AppError::InvalidInput(
            "vehicle registration number must not be empty".to_string(),
        ));
    }
    Ok(registration)
}

impl<R: BufRead, W: Write> OperatorInput for ConsoleOperator<R, W> {
    /// Prompts again until a non-empty number is typed; fails only when
    /// the console breaks or input is closed
    fn read_vehicle_registration_number(&mut self) -> AppResult<String> {
        loop {
            self.prompt("Please type the vehicle registration number and press enter key")?;
            match validate_registration_number(self.read_line()?) {
                Ok(registration) => return Ok(registration),
                Err(AppError::InvalidInput(msg)) => {
                    tracing::debug!("Rejected registration number: {}", msg);
                    writeln!(self.output, "Invalid input: {}", msg)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn read_selection(&mut self) -> i32 {
        match self.read_line() {
            Ok(line) => line.parse().unwrap_or_else(|_| {
                tracing::debug!("Selection {:?} is not a number", line);
                -1
            }),
            Err(e) => {
                tracing::error!("Error while reading user input from shell: {}", e);
                -1
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn console(input: &str) -> ConsoleOperator<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleOperator::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_registration_number() {
        let mut operator = console("  ABCDEF \n");
        assert_eq!(operator.read_vehicle_registration_number().unwrap(), "ABCDEF");

        let prompt = String::from_utf8(operator.output().clone()).unwrap();
        assert!(prompt.contains("registration number"));
    }

    #[test]
    fn test_empty_registration_number_is_asked_again() {
        let mut operator = console("\n   \nABCDEF\n");
        assert_eq!(operator.read_vehicle_registration_number().unwrap(), "ABCDEF");

        let output = String::from_utf8(operator.output().clone()).unwrap();
        assert_eq!(output.matches("Please type the vehicle registration number").count(), 3);
        assert_eq!(output.matches("must not be empty").count(), 2);
        assert!(!operator.is_closed());
    }

    #[test]
    fn test_empty_registration_number_then_eof() {
        let mut operator = console("\n");
        assert!(matches!(operator.read_vehicle_registration_number(), Err(AppError::Io(_))));
        assert!(operator.is_closed());
    }

    #[test]
    fn test_validate_registration_number() {
        assert_eq!(validate_registration_number("AB-123-CD".to_string()).unwrap(), "AB-123-CD");
        assert!(matches!(
            validate_registration_number(String::new()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_registration_number_at_eof() {
        let mut operator = console("");
        assert!(matches!(operator.read_vehicle_registration_number(), Err(AppError::Io(_))));
    }

    #[test]
    fn test_read_selection() {
        let mut operator = console("2\nbike\n\n");
        assert_eq!(operator.read_selection(), 2);
        assert_eq!(operator.read_selection(), -1);
        assert_eq!(operator.read_selection(), -1);
        assert!(!operator.is_closed());
        assert_eq!(operator.read_selection(), -1);
        assert!(operator.is_closed());
    }
}
