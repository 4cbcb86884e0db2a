pub mod applications;
pub mod classrooms;
pub mod docs;
pub mod schedule;
pub mod search;

pub use applications::*;
pub use classrooms::*;
pub use docs::*;
pub use schedule::*;
pub use search::*;
