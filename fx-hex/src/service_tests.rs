//! RatesService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use fx_types::{
        AppError, Currency, CurrencyCode, CurrencyId, NewRate, Rate, RateId, RateRequest,
        RatesRepository, RepoError,
    };

    use crate::RatesService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        currencies: Mutex<Vec<Currency>>,
        rates: Mutex<Vec<Rate>>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                currencies: Mutex::new(Vec::new()),
                rates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RatesRepository for MockRepo {
        async fn create_currency(&self, code: CurrencyCode) -> Result<Currency, RepoError> {
            let mut currencies = self.currencies.lock().unwrap();
            if currencies.iter().any(|c| c.code == code) {
                return Err(RepoError::Conflict("Currency already registered".into()));
            }
            let currency = Currency::new(code);
            currencies.push(currency.clone());
            Ok(currency)
        }

        async fn update_currency(
            &self,
            id: CurrencyId,
            code: CurrencyCode,
        ) -> Result<Currency, RepoError> {
            let mut currencies = self.currencies.lock().unwrap();
            let currency = currencies
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(RepoError::NotFound)?;
            currency.code = code;
            Ok(currency.clone())
        }

        async fn delete_currency(&self, code: CurrencyCode) -> Result<(), RepoError> {
            let mut currencies = self.currencies.lock().unwrap();
            let index = currencies
                .iter()
                .position(|c| c.code == code)
                .ok_or(RepoError::NotFound)?;
            let in_use = self
                .rates
                .lock()
                .unwrap()
                .iter()
                .any(|r| r.currency_base == code || r.currency_target == code);
            if in_use {
                return Err(RepoError::Conflict(format!("Currency {} is in use", code)));
            }
            currencies.remove(index);
            Ok(())
        }

        async fn get_currency_by_code(
            &self,
            code: CurrencyCode,
        ) -> Result<Option<Currency>, RepoError> {
            Ok(self
                .currencies
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.code == code)
                .cloned())
        }

        async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError> {
            Ok(self.currencies.lock().unwrap().clone())
        }

        async fn create_rate(&self, rate: NewRate) -> Result<Rate, RepoError> {
            let rate = rate.into_rate(RateId::new());
            self.rates.lock().unwrap().push(rate.clone());
            Ok(rate)
        }

        async fn update_rate(&self, id: RateId, rate: NewRate) -> Result<Rate, RepoError> {
            let mut rates = self.rates.lock().unwrap();
            let existing = rates
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(RepoError::NotFound)?;
            *existing = rate.into_rate(id);
            Ok(existing.clone())
        }

        async fn delete_rate(&self, id: RateId) -> Result<(), RepoError> {
            let mut rates = self.rates.lock().unwrap();
            let before = rates.len();
            rates.retain(|r| r.id != id);
            if rates.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }

        async fn get_rate(&self, id: RateId) -> Result<Option<Rate>, RepoError> {
            Ok(self.rates.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn list_rates(
            &self,
            base: Option<CurrencyId>,
            target: Option<CurrencyId>,
        ) -> Result<Vec<Rate>, RepoError> {
            let code_of = |id: Option<CurrencyId>| {
                id.and_then(|id| {
                    self.currencies
                        .lock()
                        .unwrap()
                        .iter()
                        .find(|c| c.id == id)
                        .map(|c| c.code)
                })
            };
            let base = code_of(base);
            let target = code_of(target);

            let mut rates: Vec<Rate> = self
                .rates
                .lock()
                .unwrap()
                .iter()
                .filter(|r| base.is_none_or(|b| r.currency_base == b))
                .filter(|r| target.is_none_or(|t| r.currency_target == t))
                .cloned()
                .collect();
            rates.sort_by_key(|r| r.date);
            Ok(rates)
        }

        async fn list_rates_for_date(&self, date: NaiveDate) -> Result<Vec<Rate>, RepoError> {
            Ok(self
                .rates
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.date == date)
                .cloned()
                .collect())
        }
    }

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn rate_req(base: &str, target: &str, rate: f64, date: NaiveDate) -> RateRequest {
        RateRequest {
            rate,
            currency_base: code(base),
            currency_target: code(target),
            date,
        }
    }

    async fn service_with(codes: &[&str]) -> RatesService<MockRepo> {
        let service = RatesService::new(MockRepo::new());
        for c in codes {
            service.create_currency(code(c)).await.unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_create_currency() {
        let service = RatesService::new(MockRepo::new());

        let currency = service.create_currency(code("usd")).await.unwrap();

        assert_eq!(currency.code.as_str(), "USD");
        assert_eq!(service.list_currencies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_currency_conflicts() {
        let service = service_with(&["USD"]).await;

        let result = service.create_currency(code("USD")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_currency_not_found() {
        let service = service_with(&[]).await;

        let result = service.update_currency(CurrencyId::new(), code("USD")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_currency_not_found_message() {
        let service = service_with(&[]).await;

        let result = service.delete_currency(code("XYZ")).await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Currency XYZ not found."),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rate_requires_registered_currencies() {
        let service = service_with(&["USD"]).await;

        let result = service
            .create_rate(rate_req("USD", "EUR", 0.9, day(1)))
            .await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Currency EUR not found."),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rate_rejects_invalid_values() {
        let service = service_with(&["USD", "EUR"]).await;

        let same = service
            .create_rate(rate_req("USD", "USD", 1.0, day(1)))
            .await;
        assert!(matches!(same, Err(AppError::BadRequest(_))));

        let zero = service
            .create_rate(rate_req("USD", "EUR", 0.0, day(1)))
            .await;
        assert!(matches!(zero, Err(AppError::BadRequest(_))));

        let nan = service
            .create_rate(rate_req("USD", "EUR", f64::NAN, day(1)))
            .await;
        assert!(matches!(nan, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_rate() {
        let service = service_with(&["USD", "EUR"]).await;
        let created = service
            .create_rate(rate_req("USD", "EUR", 0.9, day(1)))
            .await
            .unwrap();

        let updated = service
            .update_rate(created.id, rate_req("EUR", "USD", 1.1, day(2)))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.currency_base, code("EUR"));

        service.delete_rate(created.id).await.unwrap();
        let again = service.delete_rate(created.id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_rate() {
        let service = service_with(&["USD", "EUR"]).await;
        let created = service
            .create_rate(rate_req("USD", "EUR", 0.9, day(1)))
            .await
            .unwrap();

        let fetched = service.get_rate(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.rate, 0.9);

        let missing = RateId::new();
        match service.get_rate(missing).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, format!("Rate {} not found.", missing)),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_history_for_pair() {
        let service = service_with(&["USD", "EUR", "GBP"]).await;
        service
            .create_rate(rate_req("USD", "EUR", 0.93, day(2)))
            .await
            .unwrap();
        service
            .create_rate(rate_req("USD", "EUR", 0.92, day(1)))
            .await
            .unwrap();
        service
            .create_rate(rate_req("USD", "GBP", 0.8, day(1)))
            .await
            .unwrap();

        let history = service
            .rate_history(code("USD"), code("EUR"))
            .await
            .unwrap();

        let rates: Vec<f64> = history.iter().map(|r| r.rate).collect();
        assert_eq!(rates, vec![0.92, 0.93]);
    }

    #[tokio::test]
    async fn test_rate_history_unknown_currency() {
        let service = service_with(&["USD"]).await;

        let result = service.rate_history(code("USD"), code("EUR")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rate_for_date_chains_quotes() {
        let service = service_with(&["USD", "EUR", "GBP"]).await;
        service
            .create_rate(rate_req("USD", "EUR", 0.9, day(1)))
            .await
            .unwrap();
        service
            .create_rate(rate_req("EUR", "GBP", 0.8, day(1)))
            .await
            .unwrap();

        let response = service
            .rate_for_date(code("USD"), code("GBP"), day(1))
            .await
            .unwrap();

        assert!((response.rate.unwrap() - 0.72).abs() < 1e-12);
        assert_eq!(response.currency_base, code("USD"));
        assert_eq!(response.currency_target, code("GBP"));
        assert_eq!(response.date, day(1));
        let hops: Vec<(String, String)> = response
            .cross_pairs
            .iter()
            .map(|p| (p.from.to_string(), p.to.to_string()))
            .collect();
        assert_eq!(
            hops,
            vec![
                ("USD".to_string(), "EUR".to_string()),
                ("EUR".to_string(), "GBP".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_rate_for_date_ignores_other_days() {
        let service = service_with(&["USD", "EUR", "GBP"]).await;
        service
            .create_rate(rate_req("USD", "EUR", 0.9, day(1)))
            .await
            .unwrap();
        service
            .create_rate(rate_req("EUR", "GBP", 0.8, day(2)))
            .await
            .unwrap();

        let response = service
            .rate_for_date(code("USD"), code("GBP"), day(1))
            .await
            .unwrap();

        assert_eq!(response.rate, None);
        assert!(response.cross_pairs.is_empty());
    }

    #[tokio::test]
    async fn test_rate_for_date_without_quotes_not_found() {
        let service = service_with(&["USD", "EUR"]).await;

        let result = service
            .rate_for_date(code("USD"), code("EUR"), day(1))
            .await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No rates USD/EUR for 2024-01-01."),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_for_date_same_currency_bad_request() {
        let service = service_with(&["USD", "EUR"]).await;
        service
            .create_rate(rate_req("USD", "EUR", 0.9, day(1)))
            .await
            .unwrap();

        let result = service
            .rate_for_date(code("USD"), code("USD"), day(1))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
