use crate::error::Result;
use crate::models::RawTable;

mod json;
mod links;

pub use json::{parse_snapshot, JsonSnapshot};
pub use links::fold_links;

/// Where the document's tables come from. The reader that turns the template
/// into cells lives outside this crate; implementations only hand over the
/// exported grid.
pub trait TableSource {
    fn load_tables(&self) -> Result<Vec<RawTable>>;
    fn describe(&self) -> String;
}

impl TableSource for Vec<RawTable> {
    fn load_tables(&self) -> Result<Vec<RawTable>> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory tables", self.len())
    }
}
