//! Problem-file parsing and solution-file writing for the Rover numeric
//! planning domain.

pub mod parser;
pub mod solution;
pub mod writer;

pub use parser::{parse, ParseError, ParseOrValidationError, Problem, ValidationError};
pub use solution::{parse_solution, ParsedSolution, SolutionParseError};
pub use writer::{render, write_to_file, WriteError};
