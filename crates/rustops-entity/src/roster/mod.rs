//! Roster report values.

pub mod outcome;
pub mod report;

pub use outcome::AddMemberOutcome;
pub use report::{MemberSource, RosterLine, RosterReport, RosterSummary};
