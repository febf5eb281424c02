pub mod magnitude;
