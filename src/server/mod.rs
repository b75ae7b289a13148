mod router;
mod state;

pub use router::{build_router, ROOT_MESSAGE};
pub use state::ServeState;
