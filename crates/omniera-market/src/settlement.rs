//! Journaled execution of a settlement plan.

use tracing::{error, warn};

use crate::collaborators::{AssetTransfer, Transfer};
use crate::error::TransferError;

/// Why a plan could not be settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementFailure {
    pub source: TransferError,
    /// Index in the plan of the transfer that failed.
    pub failed_at: usize,
    pub unwound: bool,
}

/// Execute `plan` in order. If any transfer fails, every transfer already executed is undone in
/// reverse order, so either all movements happen or none do.
pub fn settle<T: AssetTransfer>(
    transfers: &mut T,
    plan: &[Transfer],
) -> Result<(), SettlementFailure> {
    for (index, step) in plan.iter().enumerate() {
        if let Err(source) =
            transfers.transfer(step.contract, step.id_or_amount, step.from, step.to)
        {
            warn!(
                "settlement step {} of {} failed: {}; unwinding",
                index + 1,
                plan.len(),
                source
            );
            let unwound = unwind(transfers, &plan[..index]);
            return Err(SettlementFailure {
                source,
                failed_at: index,
                unwound,
            });
        }
    }
    Ok(())
}

fn unwind<T: AssetTransfer>(transfers: &mut T, completed: &[Transfer]) -> bool {
    let mut clean = true;
    for step in completed.iter().rev() {
        let undo = step.reversed();
        if let Err(e) = transfers.transfer(undo.contract, undo.id_or_amount, undo.from, undo.to) {
            error!(
                "compensating transfer of {} on {} from {} to {} failed: {}",
                undo.id_or_amount, undo.contract, undo.from, undo.to, e
            );
            clean = false;
        }
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};

    #[derive(Default)]
    struct Recorder {
        log: Vec<Transfer>,
        fail_on_call: Option<usize>,
        calls: usize,
    }

    impl AssetTransfer for Recorder {
        fn transfer(
            &mut self,
            contract: Address,
            id_or_amount: U256,
            from: Address,
            to: Address,
        ) -> Result<(), TransferError> {
            self.calls += 1;
            if self.fail_on_call == Some(self.calls) {
                return Err(TransferError::Rejected("injected".into()));
            }
            self.log.push(Transfer::new(contract, id_or_amount, from, to));
            Ok(())
        }
    }

    fn plan() -> Vec<Transfer> {
        let a = Address::repeat_byte(0xa);
        let b = Address::repeat_byte(0xb);
        let token = Address::repeat_byte(0x1);
        vec![
            Transfer::new(token, U256::from(1), a, b),
            Transfer::new(token, U256::from(2), b, a),
            Transfer::new(token, U256::from(3), a, b),
        ]
    }

    #[test]
    fn settles_in_order() {
        let mut recorder = Recorder::default();
        settle(&mut recorder, &plan()).unwrap();
        assert_eq!(recorder.log, plan());
    }

    #[test]
    fn unwinds_completed_steps_in_reverse() {
        let mut recorder = Recorder {
            fail_on_call: Some(3),
            ..Default::default()
        };
        let failure = settle(&mut recorder, &plan()).unwrap_err();
        assert_eq!(failure.failed_at, 2);
        assert!(failure.unwound);

        let plan = plan();
        assert_eq!(
            recorder.log,
            vec![plan[0], plan[1], plan[1].reversed(), plan[0].reversed()]
        );
    }

    #[test]
    fn reports_failed_unwind() {
        // step 2 fails, then the compensation of step 1 (call 3) fails as well
        let mut recorder = Recorder {
            fail_on_call: Some(2),
            ..Default::default()
        };
        let failure = settle(&mut recorder, &plan()).unwrap_err();
        assert!(failure.unwound);

        let mut recorder = FailTwice::default();
        let failure = settle(&mut recorder, &plan()).unwrap_err();
        assert_eq!(failure.failed_at, 1);
        assert!(!failure.unwound);
    }

    #[derive(Default)]
    struct FailTwice {
        calls: usize,
    }

    impl AssetTransfer for FailTwice {
        fn transfer(
            &mut self,
            _contract: Address,
            _id_or_amount: U256,
            _from: Address,
            _to: Address,
        ) -> Result<(), TransferError> {
            self.calls += 1;
            if self.calls >= 2 {
                Err(TransferError::Unavailable("offline".into()))
            } else {
                Ok(())
            }
        }
    }
}
