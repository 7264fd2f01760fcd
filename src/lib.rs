//! HackHub core library
//!
//! Team formation and hackathon enrollment for a competition platform:
//! users found teams, invite candidates, hand leadership down, and enroll
//! their teams into events under each hackathon's deadline and capacity
//! rules. This crate owns those lifecycles and their invariants;
//! authentication, durable storage, and any HTTP or UI surface belong to
//! the calling layer.

pub mod domain;
pub mod infrastructure;
pub mod services;
