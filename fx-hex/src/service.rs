//! Rates Application Service
//!
//! Orchestrates domain operations through the repository port and hands
//! stored quotes to the resolution engine.
//! Contains NO infrastructure logic - pure business orchestration.

use chrono::NaiveDate;

use fx_types::{
    AppError, Currency, CurrencyCode, CurrencyId, DirectQuote, DomainError, NewRate, Rate,
    RateCalcResponse, RateId, RateRequest, RatesRepository,
};

/// Application service for currencies, rates and cross-rate lookups.
///
/// Generic over `R: RatesRepository` - the adapter is injected at compile time.
pub struct RatesService<R: RatesRepository> {
    repo: R,
}

impl<R: RatesRepository> RatesService<R> {
    /// Creates a new rates service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new currency.
    pub async fn create_currency(&self, code: CurrencyCode) -> Result<Currency, AppError> {
        self.repo.create_currency(code).await.map_err(Into::into)
    }

    /// Lists all registered currencies.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, AppError> {
        self.repo.list_currencies().await.map_err(Into::into)
    }

    /// Renames a currency.
    pub async fn update_currency(
        &self,
        id: CurrencyId,
        code: CurrencyCode,
    ) -> Result<Currency, AppError> {
        self.repo
            .update_currency(id, code)
            .await
            .map_err(|e| not_found_as(e, || format!("Currency {} not found.", id)))
    }

    /// Removes a currency that no rate references.
    pub async fn delete_currency(&self, code: CurrencyCode) -> Result<(), AppError> {
        self.repo
            .delete_currency(code)
            .await
            .map_err(|e| not_found_as(e, || DomainError::CurrencyNotFound(code).to_string()))
    }

    /// Resolves a code to a registered currency, `NotFound` otherwise.
    pub async fn get_currency(&self, code: CurrencyCode) -> Result<Currency, AppError> {
        self.repo
            .get_currency_by_code(code)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| DomainError::CurrencyNotFound(code).into())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a direct rate between two registered currencies.
    pub async fn create_rate(&self, req: RateRequest) -> Result<Rate, AppError> {
        let rate = self.new_rate(req).await?;
        self.repo.create_rate(rate).await.map_err(Into::into)
    }

    /// Fetches a stored rate by id.
    pub async fn get_rate(&self, id: RateId) -> Result<Rate, AppError> {
        self.repo
            .get_rate(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound(format!("Rate {} not found.", id)))
    }

    /// Overwrites an existing rate.
    pub async fn update_rate(&self, id: RateId, req: RateRequest) -> Result<Rate, AppError> {
        let rate = self.new_rate(req).await?;
        self.repo
            .update_rate(id, rate)
            .await
            .map_err(|e| not_found_as(e, || format!("Rate {} not found.", id)))
    }

    /// Deletes a rate.
    pub async fn delete_rate(&self, id: RateId) -> Result<(), AppError> {
        self.repo
            .delete_rate(id)
            .await
            .map_err(|e| not_found_as(e, || format!("Rate {} not found.", id)))
    }

    /// All recorded rates for one ordered pair, oldest first.
    pub async fn rate_history(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Vec<Rate>, AppError> {
        let base = self.get_currency(base).await?;
        let target = self.get_currency(target).await?;

        self.repo
            .list_rates(Some(base.id), Some(target.id))
            .await
            .map_err(Into::into)
    }

    /// Effective rate from `base` to `target` on `date`, through any chain
    /// of that day's quotes.
    ///
    /// An unreachable pair is a successful response with a null rate; a day
    /// without any quotes is `NotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn rate_for_date(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        date: NaiveDate,
    ) -> Result<RateCalcResponse, AppError> {
        if base == target {
            return Err(DomainError::SameCurrency(base).into());
        }

        let rates = self.repo.list_rates_for_date(date).await?;
        if rates.is_empty() {
            return Err(AppError::NotFound(format!(
                "No rates {}/{} for {}.",
                base, target, date
            )));
        }

        let quotes: Vec<DirectQuote> = rates
            .iter()
            .filter_map(|rate| match rate.to_quote() {
                Ok(quote) => Some(quote),
                Err(err) => {
                    tracing::warn!(rate_id = %rate.id, error = %err, "Skipping invalid stored rate");
                    None
                }
            })
            .collect();

        let result = exchange_rates::resolve_rate(base, target, &quotes);
        tracing::debug!(
            quotes = quotes.len(),
            reachable = result.is_reachable(),
            "Resolved cross rate"
        );

        Ok(RateCalcResponse::from_result(base, target, date, result))
    }

    async fn new_rate(&self, req: RateRequest) -> Result<NewRate, AppError> {
        let base = self.get_currency(req.currency_base).await?;
        let target = self.get_currency(req.currency_target).await?;
        NewRate::new(base, target, req.rate, req.date).map_err(Into::into)
    }
}

/// Maps `RepoError::NotFound` to a message naming the missing entity.
fn not_found_as(err: fx_types::RepoError, message: impl FnOnce() -> String) -> AppError {
    match err {
        fx_types::RepoError::NotFound => AppError::NotFound(message()),
        other => other.into(),
    }
}
