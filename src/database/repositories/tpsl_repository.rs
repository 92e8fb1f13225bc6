use crate::database::connection::{DatabaseError, PgPooledConnection};
use crate::database::models::{NewTpslOrder, TpslOrder};
use crate::database::schema::tpsl_orders;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

/// TP/SL repository trait - defines interface for TP/SL order persistence
///
/// Accepts only [`NewTpslOrder`] on the write path, so nothing reaches the
/// store without passing validation.
pub trait TpslRepository: Send + Sync {
    /// Get all orders, ordered by ID
    fn get_all(&self) -> Result<Vec<TpslOrder>, DatabaseError>;

    /// Find order by ID
    fn find_by_id(&self, id: i64) -> Result<Option<TpslOrder>, DatabaseError>;

    /// Get all orders for a ticker
    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<TpslOrder>, DatabaseError>;

    /// Insert a new order, returning it with its assigned ID
    fn insert(&self, new_order: NewTpslOrder) -> Result<TpslOrder, DatabaseError>;

    /// Replace the editable fields of an order
    /// Returns None if no order has this ID
    fn update(&self, id: i64, order: NewTpslOrder) -> Result<Option<TpslOrder>, DatabaseError>;

    /// Delete order by ID
    /// Returns true if a row was removed
    fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

/// Concrete implementation of TpslRepository backed by PostgreSQL
pub struct TpslRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<PgPooledConnection, DatabaseError> + Send + Sync>,
}

impl TpslRepositoryImpl {
    /// Create new TP/SL repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<PgPooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

impl TpslRepository for TpslRepositoryImpl {
    fn get_all(&self) -> Result<Vec<TpslOrder>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        tpsl_orders::table
            .order(tpsl_orders::id.asc())
            .load::<TpslOrder>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<TpslOrder>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        tpsl_orders::table
            .find(id)
            .first::<TpslOrder>(&mut conn)
            .optional()
            .map_err(DatabaseError::from)
    }

    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<TpslOrder>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        tpsl_orders::table
            .filter(tpsl_orders::ticker.eq(ticker))
            .order(tpsl_orders::id.asc())
            .load::<TpslOrder>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn insert(&self, new_order: NewTpslOrder) -> Result<TpslOrder, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        diesel::insert_into(tpsl_orders::table)
            .values(&new_order)
            .get_result::<TpslOrder>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn update(&self, id: i64, order: NewTpslOrder) -> Result<Option<TpslOrder>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        diesel::update(tpsl_orders::table.find(id))
            .set((&order, tpsl_orders::updated_at.eq(Utc::now())))
            .get_result::<TpslOrder>(&mut conn)
            .optional()
            .map_err(DatabaseError::from)
    }

    fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        let deleted = diesel::delete(tpsl_orders::table.find(id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::connection::{establish_connection_pool, get_connection, run_pending_migrations};
    use crate::models::{PriceInput, TpslField, TpslRecord};
    use rust_decimal_macros::dec;

    #[test]
    fn test_tpsl_repository_round_trip() {
        // Requires a reachable database; skipped when DATABASE_URL is unset
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return;
        };

        let pool = establish_connection_pool(&DatabaseConfig {
            url,
            pool_size: 2,
            connection_timeout_secs: 5,
            run_migrations: true,
        })
        .unwrap();
        run_pending_migrations(&pool).unwrap();
        let repo = TpslRepositoryImpl::new(move || get_connection(&pool));

        let ticker = format!("RT{}", std::process::id());
        let ladder = TpslRecord::new(&ticker, "call", "strategy1")
            .with_levels(dec!(10), dec!(12), dec!(14), dec!(16.25));
        let inserted = repo.insert(NewTpslOrder::try_from(&ladder).unwrap()).unwrap();

        assert!(inserted.id > 0);
        assert_eq!(inserted.tp1, Some(dec!(12)));
        assert_eq!(inserted.tp3, Some(dec!(16.25)));
        assert_eq!(repo.find_by_id(inserted.id).unwrap(), Some(inserted.clone()));

        // Switching to a stop-loss-only strategy clears the take-profits
        let stop_only = TpslRecord::new(&ticker, "put", "strategy5").with_levels(
            dec!(9),
            PriceInput::Absent,
            PriceInput::Absent,
            PriceInput::Absent,
        );
        let updated = repo
            .update(inserted.id, NewTpslOrder::try_from(&stop_only).unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.strategy, "strategy5");
        assert_eq!(updated.tp1, None);
        assert_eq!(updated.tp2, None);
        assert_eq!(updated.tp3, None);
        assert_eq!(updated.levels(), vec![(TpslField::Sl, dec!(9))]);
        assert_eq!(updated.created_at, inserted.created_at);

        let by_ticker = repo.find_by_ticker(&ticker).unwrap();
        assert_eq!(by_ticker, vec![updated]);

        assert!(repo.delete(inserted.id).unwrap());
        assert!(!repo.delete(inserted.id).unwrap());
        assert_eq!(repo.find_by_id(inserted.id).unwrap(), None);
        assert_eq!(repo.update(inserted.id, NewTpslOrder::try_from(&ladder).unwrap()).unwrap(), None);
    }
}
