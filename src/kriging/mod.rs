pub mod ordinary;
