use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{FailurePolicy, RouterConfig};
use crate::dedup::{DedupKey, SeenKeys};
use crate::deposits::{DepositBook, DepositExpectation, RecordedDeposit};
use crate::error::{Result, RouterError};
use crate::notification::{Deposit, InboundNotification};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouterState {
    Idle,
    Processing,
}

/// What the router did with a notification. Every variant lets the transfer proceed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouterOutcome {
    /// Type id outside the allow-list.
    Ignored { type_id: B256 },
    /// Same dedup key seen before; nothing recorded.
    Duplicate(DedupKey),
    /// Deposit recorded, fulfilling an expectation if one matched.
    Recorded(RecordedDeposit),
    /// The router's own action failed and was dropped.
    Skipped { reason: String },
}

/// Universal receiver delegate for one account.
///
/// Runs synchronously inside the transfer that triggered it and never performs I/O.
#[derive(Debug)]
pub struct NotificationRouter {
    account: Address,
    config: RouterConfig,
    state: RouterState,
    seen: SeenKeys,
    deposits: DepositBook,
}

impl NotificationRouter {
    pub fn new(account: Address, config: RouterConfig) -> Self {
        Self {
            account,
            config,
            state: RouterState::Idle,
            seen: SeenKeys::default(),
            deposits: DepositBook::default(),
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn deposits(&self) -> &DepositBook {
        &self.deposits
    }

    pub fn expect(&mut self, expectation: DepositExpectation) {
        self.deposits.expect(expectation);
    }

    /// Handle one notification.
    ///
    /// Only returns an error under [`FailurePolicy::RejectTransfer`]; the host must then revert
    /// the transfer. The router is back in [`RouterState::Idle`] whatever the result.
    pub fn handle(&mut self, notification: &InboundNotification) -> Result<RouterOutcome> {
        if !self.config.is_allowed(&notification.type_id) {
            debug!(
                "ignoring notification {} from {}",
                notification.type_id, notification.notifier
            );
            return Ok(RouterOutcome::Ignored {
                type_id: notification.type_id,
            });
        }

        self.state = RouterState::Processing;
        let result = self.process(notification);
        self.state = RouterState::Idle;

        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => match self.config.failure_policy {
                FailurePolicy::SkipAction => {
                    warn!(
                        "router action for {} skipped, transfer proceeds: {}",
                        notification.notifier, e
                    );
                    Ok(RouterOutcome::Skipped {
                        reason: e.to_string(),
                    })
                }
                FailurePolicy::RejectTransfer => {
                    warn!("rejecting transfer from {}: {}", notification.notifier, e);
                    Err(e)
                }
            },
        }
    }

    fn process(&mut self, notification: &InboundNotification) -> Result<RouterOutcome> {
        let deposit = Deposit::decode(notification)?;
        if deposit.to != self.account {
            return Err(RouterError::WrongRecipient {
                account: self.account,
                recipient: deposit.to,
            });
        }
        if deposit.amount.is_zero() {
            return Err(RouterError::EmptyDeposit(deposit.from));
        }

        let key = deposit.dedup_key(notification.nonce);
        if self.seen.contains(&key) {
            debug!("duplicate notification {}", key);
            return Ok(RouterOutcome::Duplicate(key));
        }

        let recorded = self.deposits.record(key, deposit);
        self.seen.insert(key);
        match &recorded.fulfilled {
            Some(expectation) => info!(
                "deposit {} of {} fulfilled expectation for listing {:?}",
                key, recorded.deposit.amount, expectation.listing_id
            ),
            None => info!(
                "unsolicited deposit {} of {} from {}",
                key, recorded.deposit.amount, recorded.deposit.from
            ),
        }
        Ok(RouterOutcome::Recorded(recorded))
    }
}
