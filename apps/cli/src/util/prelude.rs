pub use crate::print_output;
pub use crate::util::output::{display_name, table};
