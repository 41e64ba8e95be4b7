use std::sync::Arc;

use omniera_primitives::Operation;
use tokio::sync::{Mutex, MutexGuard};

use crate::collaborators::{AssetTransfer, OwnershipCheck};
use crate::error::Result;
use crate::machine::{CallContext, Marketplace, Outcome};

/// Cloneable handle that serializes every operation through one lock.
///
/// Two concurrent buys of the same listing are applied one after the other, so exactly one
/// of them observes an active listing.
pub struct SharedMarketplace<O, T> {
    inner: Arc<Mutex<Marketplace<O, T>>>,
}

impl<O, T> Clone for SharedMarketplace<O, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O, T> SharedMarketplace<O, T>
where
    O: OwnershipCheck,
    T: AssetTransfer,
{
    pub fn new(marketplace: Marketplace<O, T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(marketplace)),
        }
    }

    pub async fn apply(&self, ctx: CallContext, operation: Operation) -> Result<Outcome> {
        self.inner.lock().await.apply(&ctx, operation)
    }

    pub async fn apply_descriptor(&self, ctx: CallContext, descriptor: &[u8]) -> Result<Outcome> {
        self.inner.lock().await.apply_descriptor(&ctx, descriptor)
    }

    /// Exclusive access for reads that must see a consistent snapshot.
    pub async fn lock(&self) -> MutexGuard<'_, Marketplace<O, T>> {
        self.inner.lock().await
    }
}
