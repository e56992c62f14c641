//! Interactive session: debounced annotation, stale-result suppression and
//! the single-flight export guard

pub mod debounce;
pub mod sheet_session;

pub use debounce::{Debouncer, DEBOUNCE_MS};
pub use sheet_session::{AnnotationRequest, ExportTicket, SheetSession};
