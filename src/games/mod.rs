pub mod spotlight;
