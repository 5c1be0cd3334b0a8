//! Interactive console logger.

use std::io::{self, BufRead, Write};

use washsale_core::{Highlights, Ledger, LotLogger};

use crate::render::{LotTable, RenderConfig};

/// Shows every wash step as a table and waits for Enter before continuing.
pub struct TermLogger<R, W> {
    input: R,
    output: W,
    config: RenderConfig,
}

impl TermLogger<io::StdinLock<'static>, io::Stdout> {
    /// A logger on the process's stdin and stdout.
    #[must_use]
    pub fn stdio(config: RenderConfig) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), config)
    }
}

impl<R: BufRead, W: Write> TermLogger<R, W> {
    /// Create a logger reading from `input` and writing to `output`.
    pub const fn new(input: R, output: W, config: RenderConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Consume the logger, returning its output.
    pub fn into_output(self) -> W {
        self.output
    }

    fn show(&mut self, message: &str, ledger: &Ledger, highlights: &Highlights) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", LotTable::new(ledger, highlights, self.config))?;
        write!(self.output, "{message}. Hit enter to continue>")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> LotLogger for TermLogger<R, W> {
    fn print_lots(&mut self, message: &str, ledger: &Ledger, highlights: &Highlights) {
        // The port has no error channel; a closed terminal just stops pausing.
        if let Err(e) = self.show(message, ledger, highlights) {
            tracing::warn!(error = %e, "interactive logger failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use washsale_core::{Lot, NaiveDate, WashSession};

    #[test]
    fn test_pauses_after_each_step() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let mut ledger = Ledger::from_lots(vec![
            Lot::new(10, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
            Lot::new(10, date(2012, 1, 1), 10_000),
        ]);

        let input = "\n\n\n".as_bytes();
        let mut logger = TermLogger::new(input, Vec::new(), RenderConfig::default());
        WashSession::new(&mut logger).run(&mut ledger).unwrap();

        let output = String::from_utf8(logger.into_output()).unwrap();
        let prompts: Vec<&str> = output
            .lines()
            .filter_map(|line| line.strip_suffix(". Hit enter to continue>"))
            .collect();
        assert_eq!(
            prompts,
            vec![
                "Found loss",
                "Found replacement",
                "Adjusted basis and buy date of replacement"
            ]
        );
        assert!(output.starts_with('\n'));
        assert_eq!(output.matches("Matched").count(), 3);
    }

    #[test]
    fn test_eof_does_not_stop_the_session() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let mut ledger = Ledger::from_lots(vec![
            Lot::new(10, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
        ]);
        let mut logger = TermLogger::new(io::empty(), Vec::new(), RenderConfig::default());
        let summary = WashSession::new(&mut logger).run(&mut ledger).unwrap();
        assert_eq!(summary.unmatched_losses, 1);
    }
}
