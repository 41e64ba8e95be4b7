use alloy::primitives::TxHash;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, StatusCode,
};
use serde::Deserialize;
use url::Url;

use super::{CctxReport, CctxStatus, CctxStatusSource};
use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize)]
struct InboundHashToCctxResponse {
    #[serde(rename = "CrossChainTxs", default)]
    cross_chain_txs: Vec<CrossChainTx>,
}

#[derive(Debug, Deserialize)]
struct CrossChainTx {
    #[serde(default)]
    index: String,
    cctx_status: CctxStatusBody,
}

#[derive(Debug, Deserialize)]
struct CctxStatusBody {
    status: CctxStatus,
    #[serde(default)]
    status_message: String,
}

/// Parse an `inTxHashToCctxData` response body.
pub fn parse_report(body: &str) -> Result<Option<CctxReport>> {
    let response: InboundHashToCctxResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::StatusQueryError(format!("Invalid response format: {e}")))?;
    Ok(response
        .cross_chain_txs
        .into_iter()
        .next()
        .map(|cctx| CctxReport {
            index: cctx.index,
            status: cctx.cctx_status.status,
            status_message: cctx.cctx_status.status_message,
        }))
}

/// Queries the bridge's public REST API for cross-chain transaction status.
#[derive(Debug, Clone)]
pub struct CctxApiClient {
    client: Client,
    api_url: Url,
}

impl CctxApiClient {
    pub fn new(api_url: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::StatusQueryError(e.to_string()))?;
        Ok(Self { client, api_url })
    }

    fn status_url(&self, origin_tx_hash: TxHash) -> Result<Url> {
        let base = self.api_url.as_str().trim_end_matches('/');
        Url::parse(&format!(
            "{base}/zeta-chain/crosschain/inTxHashToCctxData/{origin_tx_hash}"
        ))
        .map_err(|e| ClientError::ApiUrlParsingError(e.to_string()))
    }
}

#[async_trait]
impl CctxStatusSource for CctxApiClient {
    async fn query(&self, origin_tx_hash: TxHash) -> Result<Option<CctxReport>> {
        let url = self.status_url(origin_tx_hash)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::StatusQueryError(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ClientError::StatusQueryError(format!(
                "Bridge api returned error status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::StatusQueryError(e.to_string()))?;
        parse_report(&body)
    }
}
