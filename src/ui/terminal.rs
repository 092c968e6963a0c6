use std::io::{self, Write};

/// Line-oriented input and output for the shell.
pub trait ChatTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()>;

    fn print_lines(&mut self, lines: &[String]) -> io::Result<()> {
        lines.iter().try_for_each(|line| self.print_line(line))
    }

    /// Returns `None` on end of input.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
    /// Reads a line without echo.
    fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

pub struct StdTerminal;

impl ChatTerminal for StdTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        println!("{line}");
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match rpassword::prompt_password(prompt) {
            Ok(password) => Ok(Some(password.trim().to_owned())),
            Err(source) if source.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(source) => Err(source),
        }
    }
}
