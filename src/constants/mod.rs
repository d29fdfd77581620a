pub mod fare;
