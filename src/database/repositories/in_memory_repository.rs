use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::database::connection::DatabaseError;
use crate::database::models::{NewTpslOrder, TpslOrder};

use super::tpsl_repository::TpslRepository;

/// In-process TP/SL store
///
/// Used when no `DATABASE_URL` is configured, and by tests. IDs are assigned
/// sequentially starting at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryTpslRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    orders: BTreeMap<i64, TpslOrder>,
    last_id: i64,
}

impl InMemoryTpslRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TpslRepository for InMemoryTpslRepository {
    fn get_all(&self) -> Result<Vec<TpslOrder>, DatabaseError> {
        Ok(self.inner.read().orders.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<TpslOrder>, DatabaseError> {
        Ok(self.inner.read().orders.get(&id).cloned())
    }

    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<TpslOrder>, DatabaseError> {
        Ok(self
            .inner
            .read()
            .orders
            .values()
            .filter(|order| order.ticker == ticker)
            .cloned()
            .collect())
    }

    fn insert(&self, new_order: NewTpslOrder) -> Result<TpslOrder, DatabaseError> {
        let mut inner = self.inner.write();
        inner.last_id += 1;

        let order = TpslOrder::from_new(inner.last_id, new_order, Utc::now());
        inner.orders.insert(order.id, order.clone());

        Ok(order)
    }

    fn update(&self, id: i64, order: NewTpslOrder) -> Result<Option<TpslOrder>, DatabaseError> {
        let mut inner = self.inner.write();

        let Some(existing) = inner.orders.get_mut(&id) else {
            return Ok(None);
        };

        let mut updated = TpslOrder::from_new(id, order, Utc::now());
        updated.created_at = existing.created_at;
        *existing = updated.clone();

        Ok(Some(updated))
    }

    fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.inner.write().orders.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TpslRecord;
    use rust_decimal_macros::dec;

    fn new_order(ticker: &str) -> NewTpslOrder {
        let record = TpslRecord::new(ticker, "call", "strategy1")
            .with_levels(dec!(10), dec!(12), dec!(14), dec!(16));
        NewTpslOrder::try_from(&record).unwrap()
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryTpslRepository::new();

        let first = repo.insert(new_order("AAPL")).unwrap();
        let second = repo.insert(new_order("MSFT")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let repo = InMemoryTpslRepository::new();

        let first = repo.insert(new_order("AAPL")).unwrap();
        assert!(repo.delete(first.id).unwrap());
        assert!(!repo.delete(first.id).unwrap());

        let second = repo.insert(new_order("AAPL")).unwrap();
        assert_eq!(second.id, 2);
        assert!(!repo.is_empty());
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_created_at() {
        let repo = InMemoryTpslRepository::new();
        let original = repo.insert(new_order("AAPL")).unwrap();

        let record = TpslRecord::new("AAPL", "put", "strategy1")
            .with_levels(dec!(20), dec!(18), dec!(16), dec!(14));
        let updated = repo
            .update(original.id, NewTpslOrder::try_from(&record).unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(updated.side, "put");
        assert_eq!(updated.sl, Some(dec!(20)));
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(repo.find_by_id(original.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_unknown_id() {
        let repo = InMemoryTpslRepository::new();
        assert_eq!(repo.update(42, new_order("AAPL")).unwrap(), None);
    }

    #[test]
    fn test_find_by_ticker() {
        let repo = InMemoryTpslRepository::new();
        repo.insert(new_order("AAPL")).unwrap();
        repo.insert(new_order("MSFT")).unwrap();
        repo.insert(new_order("AAPL")).unwrap();

        let orders = repo.find_by_ticker("AAPL").unwrap();
        assert_eq!(orders.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
