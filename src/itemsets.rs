pub mod count;
pub mod hashtree;
pub mod search;

pub use count::generate_frequent_itemsets;
pub use hashtree::HashTree;
pub use search::generate_candidates_from_prev;
