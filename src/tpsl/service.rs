use std::sync::Arc;

use crate::database::models::{NewTpslOrder, TpslOrder};
use crate::database::repositories::TpslRepository;
use crate::models::TpslRecord;
use crate::validator::validate_tpsl;

use super::errors::TpslServiceError;

/// TP/SL order service
///
/// Validation is fully resolved before any repository call, so a rejected
/// record never produces a partial write.
pub struct TpslService {
    repository: Arc<dyn TpslRepository>,
}

impl TpslService {
    pub fn new(repository: Arc<dyn TpslRepository>) -> Self {
        Self { repository }
    }

    /// All orders, optionally restricted to one ticker
    pub fn list(&self, ticker: Option<&str>) -> Result<Vec<TpslOrder>, TpslServiceError> {
        let orders = match ticker {
            Some(ticker) => self.repository.find_by_ticker(ticker),
            None => self.repository.get_all(),
        }
        .map_err(|e| {
            tracing::error!("Failed to load TP/SL orders: {}", e);
            e
        })?;

        Ok(orders)
    }

    /// One order by ID
    pub fn get(&self, id: i64) -> Result<TpslOrder, TpslServiceError> {
        self.repository
            .find_by_id(id)?
            .ok_or(TpslServiceError::OrderNotFound(id))
    }

    /// Validate a record without writing it
    pub fn check(&self, record: &TpslRecord) -> Result<(), TpslServiceError> {
        validate_tpsl(record)?;
        Ok(())
    }

    /// Validate and insert a new order
    pub fn create(&self, record: &TpslRecord) -> Result<TpslOrder, TpslServiceError> {
        let new_order = Self::accept(record)?;

        let order = self.repository.insert(new_order).map_err(|e| {
            tracing::error!("Failed to insert TP/SL order for {}: {}", record.ticker, e);
            e
        })?;

        tracing::info!(
            "Inserted TP/SL order {} ({} {} {})",
            order.id,
            order.ticker,
            order.side,
            order.strategy
        );
        Ok(order)
    }

    /// Validate and replace the editable fields of an existing order
    ///
    /// The ID in the path is authoritative; `record.id` is ignored.
    pub fn update(&self, id: i64, record: &TpslRecord) -> Result<TpslOrder, TpslServiceError> {
        let new_order = Self::accept(record)?;

        let order = self
            .repository
            .update(id, new_order)
            .map_err(|e| {
                tracing::error!("Failed to update TP/SL order {}: {}", id, e);
                e
            })?
            .ok_or(TpslServiceError::OrderNotFound(id))?;

        tracing::info!("Updated TP/SL order {} ({})", order.id, order.ticker);
        Ok(order)
    }

    /// Delete an order; not validated
    pub fn delete(&self, id: i64) -> Result<(), TpslServiceError> {
        let deleted = self.repository.delete(id).map_err(|e| {
            tracing::error!("Failed to delete TP/SL order {}: {}", id, e);
            e
        })?;

        if !deleted {
            return Err(TpslServiceError::OrderNotFound(id));
        }

        tracing::info!("Deleted TP/SL order {}", id);
        Ok(())
    }

    fn accept(record: &TpslRecord) -> Result<NewTpslOrder, TpslServiceError> {
        NewTpslOrder::try_from(record).map_err(|e| {
            tracing::warn!("Rejected TP/SL record for {:?}: {}", record.ticker, e);
            TpslServiceError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repositories::InMemoryTpslRepository;
    use crate::models::{PriceInput, TpslField};
    use crate::validator::TpslValidationError;
    use rust_decimal_macros::dec;

    fn service() -> (TpslService, Arc<InMemoryTpslRepository>) {
        let repo = Arc::new(InMemoryTpslRepository::new());
        (TpslService::new(repo.clone()), repo)
    }

    fn call_record() -> TpslRecord {
        TpslRecord::new("AAPL", "call", "strategy1").with_levels(dec!(10), dec!(12), dec!(14), dec!(16))
    }

    #[test]
    fn test_create_valid_record() {
        let (service, repo) = service();

        let order = service.create(&call_record()).unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.tp1, Some(dec!(12)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_create_invalid_record_writes_nothing() {
        let (service, repo) = service();
        let record = call_record().with_level(TpslField::Tp1, dec!(9));

        let err = service.create(&record).unwrap_err();

        assert!(matches!(
            err,
            TpslServiceError::Validation(TpslValidationError::OrderingViolation { .. })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_update_replaces_record() {
        let (service, _repo) = service();
        let order = service.create(&call_record()).unwrap();

        let record = TpslRecord::new("AAPL", "put", "strategy5").with_levels(
            dec!(5),
            PriceInput::Absent,
            PriceInput::Absent,
            PriceInput::Absent,
        );
        let updated = service.update(order.id, &record).unwrap();

        assert_eq!(updated.strategy, "strategy5");
        assert_eq!(updated.tp1, None);
        assert_eq!(service.get(order.id).unwrap().sl, Some(dec!(5)));
    }

    #[test]
    fn test_invalid_update_leaves_store_unchanged() {
        let (service, _repo) = service();
        let order = service.create(&call_record()).unwrap();

        let record = TpslRecord::new("AAPL", "short", "strategy1");
        let err = service.update(order.id, &record).unwrap_err();

        assert!(err.is_validation_error());
        assert_eq!(service.get(order.id).unwrap(), order);
    }

    #[test]
    fn test_update_unknown_id() {
        let (service, _repo) = service();
        let err = service.update(99, &call_record()).unwrap_err();
        assert!(matches!(err, TpslServiceError::OrderNotFound(99)));
    }

    #[test]
    fn test_validation_runs_before_not_found() {
        let (service, _repo) = service();
        let record = TpslRecord::new("AAPL", "call", "strategy7");

        let err = service.update(99, &record).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_delete() {
        let (service, repo) = service();
        let order = service.create(&call_record()).unwrap();

        service.delete(order.id).unwrap();
        assert!(repo.is_empty());
        assert!(matches!(
            service.delete(order.id),
            Err(TpslServiceError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_list_by_ticker() {
        let (service, _repo) = service();
        service.create(&call_record()).unwrap();
        let mut msft = call_record();
        msft.ticker = "MSFT".to_string();
        service.create(&msft).unwrap();

        assert_eq!(service.list(None).unwrap().len(), 2);
        assert_eq!(service.list(Some("MSFT")).unwrap().len(), 1);
        assert!(service.list(Some("TSLA")).unwrap().is_empty());
    }

    #[test]
    fn test_check_does_not_write() {
        let (service, repo) = service();

        service.check(&call_record()).unwrap();
        assert!(service.check(&TpslRecord::new("AAPL", "x", "strategy1")).is_err());
        assert!(repo.is_empty());
    }
}
