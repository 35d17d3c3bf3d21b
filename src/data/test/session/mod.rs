use crate::data::session::TournamentSessionRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod lifecycle;
mod queue;
mod staff_closure;
