pub mod auto;
pub mod client;
pub mod order;
pub mod order_entry;
pub mod sale;
pub mod sale_entry;

pub use auto::{AutoInput, Model as Auto};
pub use client::{ClientInput, Model as Client};
pub use order::{CreateOrderInput, Model as Order};
pub use order_entry::Model as OrderEntry;
pub use sale::Model as Sale;
pub use sale_entry::Model as SaleEntry;
