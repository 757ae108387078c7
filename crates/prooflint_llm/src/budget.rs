//! Cost accounting against the configured ceilings.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use prooflint_core::CostCeilings;
use tracing::debug;

use crate::error::LlmError;

/// Per-1K-token prices in US dollars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl ModelPricing {
    /// Pricing for a model name. Unknown models get the most expensive
    /// known rate so estimates stay conservative.
    pub fn for_model(model: &str) -> Self {
        if model.starts_with("gpt-4o-mini") {
            Self {
                input_per_1k: 0.000_15,
                output_per_1k: 0.000_6,
            }
        } else {
            Self {
                input_per_1k: 0.002_5,
                output_per_1k: 0.01,
            }
        }
    }

    /// Dollar cost of one call.
    pub fn cost(&self, prompt_tokens: u32, completion_tokens: u32) -> f64 {
        (f64::from(prompt_tokens) / 1000.0) * self.input_per_1k
            + (f64::from(completion_tokens) / 1000.0) * self.output_per_1k
    }
}

/// Rough token estimate: about four characters per token of English text.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.len() as f64 / 4.0).ceil() as u32
}

/// Spending cap for a single document run.
#[derive(Debug)]
pub struct DocumentBudget {
    ceiling: f64,
    spent: f64,
}

impl DocumentBudget {
    pub fn new(ceiling: f64) -> Self {
        Self {
            ceiling,
            spent: 0.0,
        }
    }

    /// True when `estimated` more dollars still fit under the ceiling.
    pub fn allows(&self, estimated: f64) -> bool {
        self.spent + estimated <= self.ceiling
    }

    pub fn record(&mut self, actual: f64) {
        self.spent += actual;
    }

    pub fn spent(&self) -> f64 {
        self.spent
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }
}

/// Tracks daily and monthly spending across documents.
///
/// A reservation holds the estimated cost while a call is in flight.
/// Commit swaps the hold for what the call actually cost; release drops
/// the hold when the call failed and nothing was billed. Windows reset
/// when the UTC day or month changes.
pub struct CostLedger {
    ceilings: CostCeilings,
    state: Mutex<LedgerState>,
}

struct LedgerState {
    day_key: String,
    month_key: String,
    daily_spent: f64,
    monthly_spent: f64,
    reserved: f64,
}

impl LedgerState {
    fn roll_over(&mut self, now: DateTime<Utc>) {
        let day = day_key(now);
        if day != self.day_key {
            debug!(day = %day, "daily spend window reset");
            self.day_key = day;
            self.daily_spent = 0.0;
        }
        let month = month_key(now);
        if month != self.month_key {
            debug!(month = %month, "monthly spend window reset");
            self.month_key = month;
            self.monthly_spent = 0.0;
        }
    }
}

fn day_key(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

fn month_key(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

impl CostLedger {
    pub fn new(ceilings: CostCeilings) -> Self {
        let now = Utc::now();
        Self {
            ceilings,
            state: Mutex::new(LedgerState {
                day_key: day_key(now),
                month_key: month_key(now),
                daily_spent: 0.0,
                monthly_spent: 0.0,
                reserved: 0.0,
            }),
        }
    }

    /// Reserves estimated spend, failing when a ceiling would be crossed.
    pub fn reserve(&self, estimated: f64) -> Result<(), LlmError> {
        let mut state = self.state.lock();
        state.roll_over(Utc::now());

        if state.daily_spent + state.reserved + estimated > self.ceilings.daily_usd {
            return Err(LlmError::BudgetExhausted(format!(
                "daily ceiling ${:.2} reached",
                self.ceilings.daily_usd
            )));
        }
        if state.monthly_spent + state.reserved + estimated > self.ceilings.monthly_usd {
            return Err(LlmError::BudgetExhausted(format!(
                "monthly ceiling ${:.2} reached",
                self.ceilings.monthly_usd
            )));
        }
        state.reserved += estimated;
        Ok(())
    }

    /// Replaces a reservation with the actual billed cost.
    pub fn commit(&self, reserved: f64, actual: f64) {
        let mut state = self.state.lock();
        state.reserved = (state.reserved - reserved).max(0.0);
        state.daily_spent += actual;
        state.monthly_spent += actual;
    }

    /// Drops a reservation without recording any cost.
    pub fn release(&self, reserved: f64) {
        let mut state = self.state.lock();
        state.reserved = (state.reserved - reserved).max(0.0);
    }

    /// Spend recorded in the current UTC day.
    pub fn daily_spent(&self) -> f64 {
        self.state.lock().daily_spent
    }

    /// Spend recorded in the current UTC month.
    pub fn monthly_spent(&self) -> f64 {
        self.state.lock().monthly_spent
    }
}
