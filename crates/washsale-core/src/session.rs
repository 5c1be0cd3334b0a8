//! The wash-sale driver loop.
//!
//! A [`WashSession`] repeatedly takes the earliest unprocessed loss, finds its
//! best replacement, splits whichever side holds more shares, and applies the
//! wash. Each iteration either resolves a whole loss lot or resolves part of it
//! and leaves a smaller remainder, so the number of shares held by unprocessed
//! losses strictly decreases and the loop ends.

use serde::Serialize;

use crate::{
    apply_wash, best_replacement_lot, earliest_loss_lot, split_lot, Highlights, Ledger, LotId,
    LotLogger, NullLogger, WashError,
};

/// Counts of what a session did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WashSummary {
    /// Loss/replacement pairs washed.
    pub washes: usize,
    /// Lots split to equalize a pair.
    pub splits: usize,
    /// Losses left standing because no replacement was eligible.
    pub unmatched_losses: usize,
    /// Iterations of the driver loop.
    pub iterations: usize,
}

/// Drives wash processing over a ledger, reporting each step to a logger.
pub struct WashSession<'a> {
    logger: &'a mut dyn LotLogger,
}

impl<'a> WashSession<'a> {
    /// Create a session that reports to `logger`.
    pub fn new(logger: &'a mut dyn LotLogger) -> Self {
        Self { logger }
    }

    /// Wash every loss in the ledger.
    ///
    /// Lots already marked `loss_processed` are left alone, so running a
    /// session over its own output changes nothing.
    pub fn run(&mut self, ledger: &mut Ledger) -> Result<WashSummary, WashError> {
        let mut summary = WashSummary::default();
        while let Some(loss_id) = earliest_loss_lot(ledger) {
            summary.iterations += 1;
            tracing::trace!(
                iteration = summary.iterations,
                pending_shares = ledger.unprocessed_loss_shares(),
                "wash iteration"
            );
            self.wash_one_lot(ledger, loss_id, &mut summary)?;
        }
        tracing::debug!(
            washes = summary.washes,
            splits = summary.splits,
            unmatched = summary.unmatched_losses,
            "wash session finished"
        );
        Ok(summary)
    }

    fn wash_one_lot(
        &mut self,
        ledger: &mut Ledger,
        loss_id: LotId,
        summary: &mut WashSummary,
    ) -> Result<(), WashError> {
        let loss = ledger
            .get(loss_id)
            .ok_or(WashError::UnknownLot(loss_id))?
            .clone();
        self.logger
            .print_lots("Found loss", ledger, &Highlights::none().loss(loss_id));

        let Some(replacement_id) = best_replacement_lot(&loss, ledger) else {
            if let Some(lot) = ledger.get_mut(loss_id) {
                lot.loss_processed = true;
            }
            summary.unmatched_losses += 1;
            tracing::debug!(loss = %loss_id, "no replacement, loss stands");
            self.logger.print_lots(
                "No replacement lot",
                ledger,
                &Highlights::none().loss(loss_id),
            );
            return Ok(());
        };

        self.logger.print_lots(
            "Found replacement",
            ledger,
            &Highlights::none().loss(loss_id).replacement(replacement_id),
        );

        let replacement_shares = ledger
            .get(replacement_id)
            .ok_or(WashError::UnknownLot(replacement_id))?
            .num_shares;

        if loss.num_shares > replacement_shares {
            let split_off = split_lot(ledger, loss_id, replacement_shares)?;
            summary.splits += 1;
            self.logger.print_lots(
                "Split loss",
                ledger,
                &Highlights::none()
                    .loss(loss_id)
                    .split_off_loss(split_off)
                    .replacement(replacement_id),
            );
        } else if replacement_shares > loss.num_shares {
            let split_off = split_lot(ledger, replacement_id, loss.num_shares)?;
            summary.splits += 1;
            self.logger.print_lots(
                "Split replacement",
                ledger,
                &Highlights::none()
                    .loss(loss_id)
                    .replacement(replacement_id)
                    .split_off_replacement(split_off),
            );
        }

        apply_wash(ledger, loss_id, replacement_id)?;
        summary.washes += 1;
        self.logger.print_lots(
            "Adjusted basis and buy date of replacement",
            ledger,
            &Highlights::none().loss(loss_id).replacement(replacement_id),
        );
        Ok(())
    }
}

/// Wash every loss in the ledger without reporting the steps anywhere.
pub fn wash_all_lots(ledger: &mut Ledger) -> Result<WashSummary, WashError> {
    let mut logger = NullLogger;
    WashSession::new(&mut logger).run(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Highlight, Lot};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[derive(Default)]
    struct RecordingLogger {
        steps: Vec<(String, Highlights)>,
    }

    impl LotLogger for RecordingLogger {
        fn print_lots(&mut self, message: &str, _ledger: &Ledger, highlights: &Highlights) {
            self.steps.push((message.to_string(), highlights.clone()));
        }
    }

    impl RecordingLogger {
        fn messages(&self) -> Vec<&str> {
            self.steps.iter().map(|(m, _)| m.as_str()).collect()
        }
    }

    #[test]
    fn test_reports_equal_pair() {
        let mut ledger = Ledger::new();
        let loss = ledger.push(
            Lot::new(10, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
        );
        let replacement = ledger.push(Lot::new(10, date(2012, 1, 1), 10_000));

        let mut logger = RecordingLogger::default();
        let summary = WashSession::new(&mut logger).run(&mut ledger).unwrap();

        assert_eq!(
            logger.messages(),
            vec![
                "Found loss",
                "Found replacement",
                "Adjusted basis and buy date of replacement"
            ]
        );
        let (_, last) = logger.steps.last().unwrap();
        assert_eq!(last.classify(loss), Some(Highlight::Loss));
        assert_eq!(last.classify(replacement), Some(Highlight::Replacement));
        assert_eq!(
            summary,
            WashSummary {
                washes: 1,
                splits: 0,
                unmatched_losses: 0,
                iterations: 1
            }
        );
    }

    #[test]
    fn test_reports_split_replacement() {
        let mut ledger = Ledger::new();
        let loss = ledger.push(
            Lot::new(6, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
        );
        let replacement = ledger.push(Lot::new(10, date(2012, 1, 1), 10_000));

        let mut logger = RecordingLogger::default();
        WashSession::new(&mut logger).run(&mut ledger).unwrap();

        let (message, highlights) = &logger.steps[2];
        assert_eq!(message, "Split replacement");
        assert_eq!(highlights.loss, vec![loss]);
        assert_eq!(highlights.replacement, vec![replacement]);
        assert_eq!(highlights.split_off_replacement.len(), 1);
        assert!(highlights.split_off_loss.is_empty());
    }

    #[test]
    fn test_reports_unmatched_loss() {
        let mut ledger = Ledger::new();
        let loss = ledger.push(
            Lot::new(10, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
        );

        let mut logger = RecordingLogger::default();
        let summary = WashSession::new(&mut logger).run(&mut ledger).unwrap();

        assert_eq!(logger.messages(), vec!["Found loss", "No replacement lot"]);
        assert_eq!(summary.unmatched_losses, 1);
        let lot = ledger.get(loss).unwrap();
        assert!(lot.loss_processed);
        assert!(lot.adjustment_code.is_empty());
        assert_eq!(lot.adjustment, 0);
    }

    #[test]
    fn test_empty_ledger() {
        let mut ledger = Ledger::new();
        assert_eq!(wash_all_lots(&mut ledger).unwrap(), WashSummary::default());
    }

    #[test]
    fn test_null_logger_matches_recording_logger() {
        let build = || {
            Ledger::from_lots(vec![
                Lot::new(10, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
                Lot::new(6, date(2012, 1, 1), 10_000),
                Lot::new(4, date(2012, 1, 3), 5_000),
            ])
        };
        let mut quiet = build();
        let mut traced = build();
        wash_all_lots(&mut quiet).unwrap();
        let mut logger = RecordingLogger::default();
        WashSession::new(&mut logger).run(&mut traced).unwrap();

        assert_eq!(quiet, traced);
        assert!(logger.steps.iter().all(|(_, h)| !h.is_empty()));
        assert!(traced.get(LotId::new(1)).unwrap().loss_processed);
    }
}
