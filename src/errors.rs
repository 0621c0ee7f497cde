// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use error_chain::error_chain;

error_chain! {
    errors {
        /// A maze needs at least one row and one column.
        InvalidDimension(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must both be at least 1",
                    width, height)
        }

        /// The grid handed to the solver has no entrance/exit pair joined by open walls.
        /// Never produced for a grid built by the generator.
        BrokenInvariant(reason: String) {
            description("maze invariant violated")
            display("maze invariant violated: {}", reason)
        }
    }
}
