pub mod record;
pub mod table;

pub use record::*;
pub use table::*;

// Day columns of the interaction table, in template order
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

// Cell values that tick a day column
pub const CHECK_MARKS: [&str; 5] = ["x", "✓", "✔", "true", "yes"];
