pub mod flash_loan;
pub mod pool;

pub use flash_loan::*;
pub use pool::*;
