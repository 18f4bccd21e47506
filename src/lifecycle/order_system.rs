use crate::clients::{GeminiClient, SheetsClient};
use crate::config::Config;
use crate::extractor::{Extractor, RetryPolicy};
use crate::lifecycle::{OrderError, SetupError};
use crate::model::{Order, OrderRecord};
use crate::order_sheet::OrderSheet;
use crate::services::{CompletionService, SheetStore, CALL_TIMEOUT};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Headroom on top of the outbound calls for parsing and response writing.
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// The order pipeline, wired from explicitly constructed service handles.
///
/// `OrderSystem` is responsible for:
/// - **Dependency Wiring**: the [`Extractor`] gets the completion service, the
///   [`OrderSheet`] gets the sheet store
/// - **Request Flow**: message → extraction → validation → append
///
/// It holds no mutable state, so one instance is cloned into every request.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let system = OrderSystem::from_config(&config).await?;
///
/// let order = system.place_order("2kg chicken for Ravi, paid by UPI").await?;
/// let recorded = system.list_orders().await?;
/// ```
#[derive(Clone)]
pub struct OrderSystem {
    extractor: Extractor,
    order_sheet: OrderSheet,
    request_timeout: Duration,
}

impl OrderSystem {
    /// Wires the pipeline from the given service handles.
    pub fn new(
        completion: Arc<dyn CompletionService>,
        store: Arc<dyn SheetStore>,
        range: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        // every completion attempt and back-off, then one sheet call
        let request_timeout = retry
            .worst_case(CALL_TIMEOUT)
            .saturating_add(CALL_TIMEOUT)
            .saturating_add(REQUEST_SLACK);
        Self {
            extractor: Extractor::new(completion, retry),
            order_sheet: OrderSheet::new(store, range),
            request_timeout,
        }
    }

    /// Builds the Gemini and Sheets clients described by `config`.
    pub async fn from_config(config: &Config) -> Result<Self, SetupError> {
        let completion = GeminiClient::new(&config.gemini_api_key, &config.gemini_model)?;
        let store =
            SheetsClient::connect(&config.spreadsheet_id, config.credentials_path.as_deref())
                .await?;
        info!(
            model = %config.gemini_model,
            range = %config.sheet_range,
            "Service clients ready"
        );

        Ok(Self::new(
            Arc::new(completion),
            Arc::new(store),
            config.sheet_range.clone(),
            config.retry,
        ))
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn order_sheet(&self) -> &OrderSheet {
        &self.order_sheet
    }

    /// How long one request may run before it is reported as timed out.
    ///
    /// Always longer than the slowest extraction the retry policy allows
    /// plus one sheet call, so a timeout never cuts a retry loop short.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Extracts an order from `message` and records one row per item.
    #[instrument(skip(self, message))]
    pub async fn place_order(&self, message: &str) -> Result<Order, OrderError> {
        if message.is_empty() {
            return Err(OrderError::MissingInput);
        }
        debug!(%message, "place_order called");

        let extracted = self.extractor.extract(message).await?;
        let order = Order::try_from(extracted).map_err(|reason| {
            warn!(%reason, "Extracted order rejected");
            OrderError::MalformedOrder(reason)
        })?;

        let rows = self.order_sheet.append_order(&order).await?;
        info!(rows, customer = %order.customer_name, "Order recorded");
        Ok(order)
    }

    /// Lists every recorded order line.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrderError> {
        Ok(self.order_sheet.list_orders().await?)
    }
}
