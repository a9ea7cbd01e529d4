//! Team domain - teams and their user memberships

mod entity;

pub use entity::{NewTeam, Team, TeamField, TeamMember, UpdateTeam};
