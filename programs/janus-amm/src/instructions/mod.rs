pub mod commons;
pub mod factory_config;
pub mod factory_create_pair;
pub mod factory_initialize;
pub mod pair_burn;
pub mod pair_mint;
pub mod pair_quote;
pub mod pair_set_fee_percent;
pub mod pair_set_stable_swap;
pub mod pair_skim;
pub mod pair_swap;
pub mod pair_sync;

pub use commons::*;
pub use factory_config::*;
pub use factory_create_pair::*;
pub use factory_initialize::*;
pub use pair_burn::*;
pub use pair_mint::*;
pub use pair_quote::*;
pub use pair_set_fee_percent::*;
pub use pair_set_stable_swap::*;
pub use pair_skim::*;
pub use pair_swap::*;
pub use pair_sync::*;
