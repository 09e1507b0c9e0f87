pub mod errors;
pub mod response;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
