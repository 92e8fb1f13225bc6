pub mod tpsl_order;

pub use tpsl_order::{NewTpslOrder, TpslOrder};
