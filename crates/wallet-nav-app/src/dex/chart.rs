//! Candle loading for the DEX chart

use std::sync::Arc;

use chrono::{DateTime, Utc};
use wallet_nav_core::prelude::*;
use wallet_nav_core::{Candle, InfoPair, TimeFrame};

use crate::auth::AuthorizationUseCase;
use crate::storage::run_blocking;

/// Remote candle source
#[cfg_attr(test, mockall::automock)]
pub trait CandlesRepository: Send + Sync {
    fn candles(
        &self,
        account_address: &str,
        amount_asset: &str,
        price_asset: &str,
        time_start: DateTime<Utc>,
        time_end: DateTime<Utc>,
        time_frame: TimeFrame,
    ) -> Result<Vec<Candle>>;
}

/// Loads candles for one pair on behalf of the authorized wallet
pub struct DexChartInteractor<A, C> {
    auth: Arc<A>,
    repository: Arc<C>,
    pair: InfoPair,
}

impl<A, C> DexChartInteractor<A, C>
where
    A: AuthorizationUseCase + Sync,
    C: CandlesRepository + 'static,
{
    pub fn new(auth: Arc<A>, repository: Arc<C>, pair: InfoPair) -> Self {
        Self {
            auth,
            repository,
            pair,
        }
    }

    pub fn pair(&self) -> &InfoPair {
        &self.pair
    }

    /// Candles between `time_start` and `time_end`.
    ///
    /// Fails only when no wallet is authorized; a failing candle fetch
    /// yields an empty chart. The fetch runs on the blocking pool.
    pub async fn candles(
        &self,
        time_frame: TimeFrame,
        time_start: DateTime<Utc>,
        time_end: DateTime<Utc>,
    ) -> Result<Vec<Candle>> {
        let wallet = self.auth.authorized_wallet().await?;

        let repository = self.repository.clone();
        let amount_asset = self.pair.amount_asset.id.clone();
        let price_asset = self.pair.price_asset.id.clone();
        let fetched = run_blocking(move || {
            repository.candles(
                &wallet.address,
                &amount_asset,
                &price_asset,
                time_start,
                time_end,
                time_frame,
            )
        })
        .await;

        match fetched {
            Ok(candles) => Ok(candles),
            Err(e) => {
                warn!(
                    amount_asset = %self.pair.amount_asset.id,
                    price_asset = %self.pair.price_asset.id,
                    "Candle fetch failed, showing empty chart: {}",
                    e
                );
                Ok(Vec::new())
            }
        }
    }
}
