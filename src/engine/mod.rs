pub mod pipeline;
pub mod session;

pub use pipeline::{ElementPath, InspectError, Inspector, LoadedPage, Selection};
pub use session::{SelectionSession, SessionId, SELECTION_TIMEOUT};
