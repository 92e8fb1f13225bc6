pub mod tpsl;

pub use tpsl::{PriceInput, Side, Strategy, TpslField, TpslRecord};
