pub mod hauling;

pub use hauling::HaulingPage;
