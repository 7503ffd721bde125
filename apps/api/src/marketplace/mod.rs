// Freelancer browsing and hiring. Hire writes require a client session.

pub mod handlers;
