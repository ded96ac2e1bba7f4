//! Types shared between the back-office frontend and its REST API, and the
//! import wizard's business rules.

pub mod domain;
pub mod usecases;
