pub mod oversight;
