use crate::domain::{models::booking::PaymentDetails, ports::PaymentGateway};
use crate::error::AppError;
use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};

/// Stand-in for a real payment provider. A form without a `method` is
/// rejected deterministically; otherwise the authorization succeeds unless
/// the configured decline rate draws a failure.
pub struct SimulatedPaymentGateway {
    decline_rate: f64,
}

impl SimulatedPaymentGateway {
    pub fn new(decline_rate: f64) -> Self {
        Self { decline_rate }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn authorize(&self, payment: &PaymentDetails) -> Result<(), AppError> {
        let method = payment.method.as_deref().filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::Payment("Payment method is required".to_string()))?;

        let declined = rand::thread_rng().gen::<f64>() < self.decline_rate;
        if declined {
            warn!("Simulated gateway declined payment via {}", method);
            return Err(AppError::Payment("Payment processing failed. Please try again.".to_string()));
        }

        info!("Payment authorized via {}", method);
        Ok(())
    }
}
