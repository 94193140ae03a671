pub mod document;
pub mod funds;
pub mod progress;
pub mod project;
pub mod schedule;
pub mod user;

pub use document::{NewDocument, ProjectDocument};
pub use funds::{Expense, FundDisbursement, NewDisbursement, NewExpense};
pub use progress::{NewFeedback, NewProgressUpdate, ProgressFeedback, ProgressUpdate};
pub use project::{NewProject, Project, DRAFT_STATUS};
pub use schedule::{NewScheduleItem, ScheduleItem};
pub use user::{NewUser, User};
