pub mod prelude;

pub mod staff_closure;
pub mod tournament_session;
