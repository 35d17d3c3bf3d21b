pub use super::staff_closure::Entity as StaffClosure;
pub use super::tournament_session::Entity as TournamentSession;
