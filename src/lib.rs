//! Presentation helpers for the pattoo web dashboard: chart links and
//! translation lookups resolved from GraphQL responses.

pub mod config;
pub mod graphql;
pub mod pair_xlate;
pub mod uri;
