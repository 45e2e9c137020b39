pub mod borrow;
pub mod fund_reserve;
pub mod provide_liquidity;
pub mod remove_liquidity;
pub mod repay;
pub mod swap;
