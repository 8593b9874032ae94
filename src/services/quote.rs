use std::time::Duration;

use anyhow::Context;

use crate::errors::PaymentError;
use crate::models::{PaymentBreakdown, PaymentQuote, PaymentRequest, QuoteSource};
use crate::services::payment;

/// Produces payment quotes, preferring an external calculation service when
/// one is configured and falling back to the local calculator otherwise.
pub struct PaymentQuoter {
    remote_url: Option<String>,
    client: reqwest::Client,
}

impl PaymentQuoter {
    pub fn new(remote_url: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build payment service client")?;
        Ok(Self {
            remote_url: remote_url.map(|u| u.trim_end_matches('/').to_string()),
            client,
        })
    }

    pub fn local() -> Self {
        Self {
            remote_url: None,
            client: reqwest::Client::new(),
        }
    }

    pub async fn quote(&self, req: &PaymentRequest) -> Result<PaymentQuote, PaymentError> {
        // invalid input never reaches the network
        let local = payment::calculate(req.base_amount, req.discount_code.as_deref(), req.apply_tax)?;

        let Some(url) = &self.remote_url else {
            return Ok(PaymentQuote {
                breakdown: local,
                source: QuoteSource::Local,
            });
        };

        match self.fetch_remote(url, req).await {
            Ok(breakdown) => Ok(PaymentQuote {
                breakdown,
                source: QuoteSource::Remote,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "payment service unavailable, using local calculation");
                Ok(PaymentQuote {
                    breakdown: local,
                    source: QuoteSource::LocalFallback,
                })
            }
        }
    }

    async fn fetch_remote(
        &self,
        url: &str,
        req: &PaymentRequest,
    ) -> Result<PaymentBreakdown, PaymentError> {
        let unavailable = |e: reqwest::Error| PaymentError::RemoteUnavailable(e.to_string());

        self.client
            .post(format!("{url}/api/payment/calculate"))
            .json(req)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<PaymentBreakdown>()
            .await
            .map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request(amount: i64, code: Option<&str>) -> PaymentRequest {
        PaymentRequest {
            base_amount: Decimal::new(amount, 0),
            discount_code: code.map(String::from),
            apply_tax: true,
        }
    }

    #[tokio::test]
    async fn test_local_quote() {
        let quote = PaymentQuoter::local()
            .quote(&request(1000, Some("WEDDING10")))
            .await
            .unwrap();
        assert_eq!(quote.source, QuoteSource::Local);
        assert_eq!(quote.breakdown.total_amount, Decimal::new(1017, 0));
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back_and_says_so() {
        let quoter =
            PaymentQuoter::new(Some("http://127.0.0.1:9".to_string()), Duration::from_secs(2))
                .unwrap();
        let quote = quoter.quote(&request(500, None)).await.unwrap();
        assert_eq!(quote.source, QuoteSource::LocalFallback);
        assert_eq!(
            quote.breakdown,
            payment::calculate(Decimal::new(500, 0), None, true).unwrap()
        );
    }

    #[tokio::test]
    async fn test_invalid_amount_is_rejected_before_remote() {
        let quoter =
            PaymentQuoter::new(Some("http://127.0.0.1:9".to_string()), Duration::from_secs(2))
                .unwrap();
        assert!(matches!(
            quoter.quote(&request(-5, Some(""))).await,
            Err(PaymentError::InvalidAmount(_))
        ));
    }
}
