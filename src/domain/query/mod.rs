mod condition;
mod order;
mod pagination;

pub use condition::{Condition, Conditions, Operand, Operator};
pub use order::{Direction, OrderBy};
pub use pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE, Page, PageMeta, PageRequest};
