pub mod assess;
pub mod catalog;
pub mod dispatch;
pub mod next;
pub mod rank;
pub mod score;
pub mod shared;
