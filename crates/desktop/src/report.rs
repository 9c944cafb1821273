//! Plain-text rendering of the four views.

use std::fmt;

use rukun_store::{ActiveView, DashboardSummary, RECENT_LIMIT, RecentActivity, Registry};
use rukun_treasury::{CurrencyFormat, LedgerTotals};

/// A view rendered against a registry snapshot. Use `to_string()` or print
/// it directly.
pub struct Report<'a> {
    view: ActiveView,
    registry: &'a Registry,
    currency: &'a CurrencyFormat,
}

pub fn render<'a>(
    view: ActiveView,
    registry: &'a Registry,
    currency: &'a CurrencyFormat,
) -> Report<'a> {
    Report {
        view,
        registry,
        currency,
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.view.title())?;
        match self.view {
            ActiveView::Dashboard => self.dashboard(f),
            ActiveView::Residents => self.residents(f),
            ActiveView::Dues => self.dues(f),
            ActiveView::Deaths => self.deaths(f),
        }
    }
}

impl Report<'_> {
    fn dashboard(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = DashboardSummary::from_registry(self.registry);
        writeln!(f, "{:<22}{}", "Residents", summary.total_residents())?;
        writeln!(f, "{:<22}{}", "Permanent residents", summary.permanent_residents())?;
        writeln!(f, "{:<22}{}", "Deaths", summary.total_deaths)?;
        writeln!(f, "{:<22}{}", "Treasury balance", summary.balance_text(self.currency))?;

        let recent = RecentActivity::from_registry(self.registry, RECENT_LIMIT);
        writeln!(f)?;
        writeln!(f, "Latest residents")?;
        if recent.residents.is_empty() {
            writeln!(f, "  (no data yet)")?;
        }
        for r in &recent.residents {
            writeln!(f, "  {:<24}{:<18}{}", r.name, r.national_id, r.status)?;
        }

        writeln!(f)?;
        writeln!(f, "Latest transactions")?;
        if recent.transactions.is_empty() {
            writeln!(f, "  (no transactions yet)")?;
        }
        for t in recent.transactions {
            writeln!(
                f,
                "  {}  {:<28}{}",
                t.date,
                t.note,
                self.currency.format_signed(t.kind, t.amount.units())
            )?;
        }
        Ok(())
    }

    fn residents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let residents = self.registry.residents();
        writeln!(f, "{} entries", residents.len())?;
        for (i, r) in residents.iter().enumerate() {
            writeln!(f, "{:>4}  {:<24}{:<18}{}", i, r.name, r.national_id, r.status.label())?;
        }
        Ok(())
    }

    fn dues(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = LedgerTotals::from_transactions(self.registry.transactions());
        writeln!(f, "{:<10}{}", "Inflow", self.currency.format(totals.inflow))?;
        writeln!(f, "{:<10}{}", "Outflow", self.currency.format(totals.outflow))?;
        writeln!(f, "{:<10}{}", "Balance", self.currency.format(totals.balance()))?;
        writeln!(f)?;
        for t in self.registry.transactions() {
            writeln!(
                f,
                "{}  {:<7}{:<28}{}",
                t.date,
                t.kind.as_str(),
                t.note,
                self.currency.format_signed(t.kind, t.amount.units())
            )?;
        }
        Ok(())
    }

    fn deaths(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.registry.deaths() {
            write!(f, "{}  {:<24}{:<18}", d.date_of_death, d.name, d.national_id)?;
            writeln!(f, "{}", d.note().unwrap_or("-"))?;
        }
        Ok(())
    }
}
