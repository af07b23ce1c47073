//! Player wallets: the settlement collaborator's entity.
//!
//! The market engine never debits or credits a wallet. A caller checks and
//! reserves funds before submitting a buy order, and settles after
//! observing an accepted receipt. Keeping settlement outside the engine
//! means the pricing model never performs a financial side effect it
//! cannot roll back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settlement failure, local to wallets.
///
/// Kept separate from [`MarketError`](crate::MarketError): the engine's
/// taxonomy covers only engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Debit larger than the current balance.
    #[error("insufficient temporal credits: balance {balance}, requested {requested}")]
    InsufficientCredits { balance: u64, requested: u64 },
}

/// Whether a transaction added or removed credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

/// One entry in a wallet's transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    /// Amount moved, in fixed-point credits
    pub amount: u64,

    /// Credit or debit
    pub kind: TransactionKind,

    /// Human-readable reason, e.g. `sold 50 temporal-crystal`
    pub description: String,

    /// Timestamp in epoch milliseconds
    pub timestamp_ms: u64,
}

/// A player's temporal-credit balance with its transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWallet {
    /// Player identifier
    pub id: String,

    /// Current balance in fixed-point credits
    balance: u64,

    /// Append-only transaction log, oldest first
    transactions: Vec<WalletTransaction>,
}

impl PlayerWallet {
    /// Create a wallet with an opening balance and an empty log.
    pub fn new(id: impl Into<String>, opening_balance: u64) -> Self {
        Self {
            id: id.into(),
            balance: opening_balance,
            transactions: Vec::new(),
        }
    }

    /// Current balance in fixed-point credits.
    #[inline]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Whether the balance covers `amount`.
    #[inline]
    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    /// The transaction log, oldest first.
    #[inline]
    pub fn transactions(&self) -> &[WalletTransaction] {
        &self.transactions
    }

    /// Add credits and log the transaction.
    pub fn credit(&mut self, amount: u64, description: impl Into<String>, now_ms: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.transactions.push(WalletTransaction {
            amount,
            kind: TransactionKind::Credit,
            description: description.into(),
            timestamp_ms: now_ms,
        });
    }

    /// Remove credits and log the transaction.
    ///
    /// Fails without touching the balance or the log when the balance does
    /// not cover `amount`.
    pub fn debit(
        &mut self,
        amount: u64,
        description: impl Into<String>,
        now_ms: u64,
    ) -> Result<(), WalletError> {
        if self.balance < amount {
            return Err(WalletError::InsufficientCredits {
                balance: self.balance,
                requested: amount,
            });
        }

        self.balance -= amount;
        self.transactions.push(WalletTransaction {
            amount,
            kind: TransactionKind::Debit,
            description: description.into(),
            timestamp_ms: now_ms,
        });
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
