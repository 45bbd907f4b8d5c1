pub mod broker;
pub mod category;
pub mod grade;

pub use broker::Broker;
pub use category::Category;
pub use grade::Grade;
