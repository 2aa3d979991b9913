use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `message` and read one line. `None` at end of input.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// True only when the answer matches `expected`, ignoring case.
    pub fn confirm(&mut self, message: &str, expected: &str) -> io::Result<bool> {
        Ok(self
            .prompt(message)?
            .map(|answer| answer.trim().eq_ignore_ascii_case(expected))
            .unwrap_or(false))
    }

    /// Ask for a 1-based entry out of `count`, re-prompting on bad input.
    /// Returns the 0-based position, or `None` on `0` or end of input.
    pub fn choose(&mut self, what: &str, count: usize) -> io::Result<Option<usize>> {
        loop {
            let message = format!("Enter the number of the {} (0 to cancel): ", what);
            let Some(answer) = self.prompt(&message)? else {
                return Ok(None);
            };
            match answer.trim().parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(n) if n <= count => return Ok(Some(n - 1)),
                Ok(_) => self.say(format!(
                    "Invalid {} number. Please enter a number within the range.",
                    what.split_whitespace().next().unwrap_or(what)
                ))?,
                Err(_) => self.say("Invalid input. Please enter a number.")?,
            }
        }
    }
}
