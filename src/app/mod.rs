pub mod router;
pub mod session;
pub mod state;

pub use router::{NavOutcome, PendingNavigation, Router};
pub use session::{ImageSlot, Session, SessionError};
pub use state::{Action, AppState, ConfirmAction, Notice, NoticeLevel, PendingConfirm};
