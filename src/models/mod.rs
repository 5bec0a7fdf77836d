pub mod priority;
pub mod scenario;
pub mod selection;
pub mod step;
pub mod test_case;

pub use priority::Priority;
pub use scenario::Scenario;
pub use selection::{toggle_selection, SelectionSet, StepRef};
pub use step::{next_case_no, Side, Step};
pub use test_case::TestCase;
