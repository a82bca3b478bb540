mod account_id;
mod allocator;
mod customer_id;
mod transaction_id;

pub use account_id::AccountId;
pub use allocator::IdAllocator;
pub use customer_id::CustomerId;
pub use transaction_id::TransactionId;
