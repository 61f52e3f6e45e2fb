pub mod clock;
pub mod ledger;
pub mod news;
pub mod session;


pub use clock::SimClock;
pub use ledger::PositionLedger;
pub use news::NewsDesk;
pub use session::{SessionController, SessionPhase};
